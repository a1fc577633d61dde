//! Calendar selection state.
//!
//! # Invariants
//! - Starts as `Unselected`; every tap moves to `Selected(date)`.
//! - There is no transition back to `Unselected`.

use crate::model::exam::ExamDate;

/// Day currently selected in the calendar view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Unselected,
    Selected(ExamDate),
}

impl SelectionState {
    /// Records a day tap, overwriting any earlier selection.
    pub fn select(&mut self, date: ExamDate) {
        *self = Self::Selected(date);
    }

    pub fn selected_date(&self) -> Option<ExamDate> {
        match self {
            Self::Unselected => None,
            Self::Selected(date) => Some(*date),
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected(_))
    }
}
