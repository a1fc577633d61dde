//! Placeholder map coordinates for exams.
//!
//! # Responsibility
//! - Derive one `GeoMarker` per exam, in exam order.
//!
//! # Invariants
//! - Latitude is uniform in `[-90, 90]`, longitude uniform in `[-180, 180]`.
//! - Empty input yields empty output.
//! - Output is not reproducible across sessions unless a seed is supplied.

use crate::model::exam::ExamRecord;
use crate::model::marker::{GeoMarker, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generator of synthetic exam locations over an injectable random source.
pub struct LocationSynthesizer<R: Rng = StdRng> {
    rng: R,
}

impl LocationSynthesizer<StdRng> {
    /// Production synthesizer seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Reproducible synthesizer; equal seeds yield equal marker sequences.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> LocationSynthesizer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draws one independent coordinate pair per exam.
    pub fn synthesize(&mut self, exams: &[ExamRecord]) -> Vec<GeoMarker> {
        let markers = exams
            .iter()
            .map(|exam| GeoMarker {
                date: exam.date,
                latitude: self.rng.random_range(MIN_LATITUDE..=MAX_LATITUDE),
                longitude: self.rng.random_range(MIN_LONGITUDE..=MAX_LONGITUDE),
            })
            .collect::<Vec<_>>();
        debug!(
            "event=markers_synthesized module=location status=ok count={}",
            markers.len()
        );
        markers
    }
}
