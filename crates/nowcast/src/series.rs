//! Per-cell precipitation series and point-in-time interpolation.

use chrono::{DateTime, Utc};

/// One observation of a cell: capture time and decoded rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecipitationSample {
    /// Capture time of the frame the sample came from.
    pub timestamp: DateTime<Utc>,
    /// Precipitation rate in mm/h, never negative.
    pub rate_mm_h: f64,
}

/// The time-ordered precipitation rates of one grid cell.
///
/// Always derived from a snapshot set, never assembled independently,
/// so samples are strictly ascending by timestamp.
#[derive(Debug, Clone)]
pub struct PrecipitationSeries {
    samples: Vec<PrecipitationSample>,
}

impl PrecipitationSeries {
    pub(crate) fn new(samples: Vec<PrecipitationSample>) -> Self {
        Self { samples }
    }

    /// The samples in ascending timestamp order.
    pub fn samples(&self) -> &[PrecipitationSample] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Estimate the rate at an arbitrary instant.
    ///
    /// Linear interpolation between the two samples bracketing the
    /// instant. Instants before the first sample or after the last
    /// clamp to that endpoint's rate; there is no extrapolation beyond
    /// the observed range. At a sample's exact timestamp the sample's
    /// own rate comes back.
    pub fn rate_at(&self, instant: DateTime<Utc>) -> f64 {
        let (first, last) = match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };

        if instant <= first.timestamp {
            return first.rate_mm_h;
        }
        if instant >= last.timestamp {
            return last.rate_mm_h;
        }

        // first < instant < last, so both neighbors exist
        let upper = self
            .samples
            .partition_point(|sample| sample.timestamp <= instant);
        let lo = &self.samples[upper - 1];
        let hi = &self.samples[upper];

        let span_ms = (hi.timestamp - lo.timestamp).num_milliseconds() as f64;
        let offset_ms = (instant - lo.timestamp).num_milliseconds() as f64;
        let fraction = offset_ms / span_ms;

        lo.rate_mm_h + (hi.rate_mm_h - lo.rate_mm_h) * fraction
    }
}
