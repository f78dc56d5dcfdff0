//! Rain-event detection over a precipitation series.
//!
//! The scan walks the series once and reports the first rain window it
//! finds. A single dry sample inside a window does not end it; the
//! window only closes for good when two consecutive dry samples are
//! observed, at which point scanning stops so a later second event is
//! never folded into the first.

use chrono::{DateTime, Duration, Utc};
use radolan_parser::INTERVALS_PER_HOUR;

use crate::series::PrecipitationSeries;

/// The next rain window found in a series.
///
/// `start` is absent when no rain is forecast at all. `end` is absent
/// when rain is still falling at the series' last sample, so the
/// window's close lies beyond the forecast horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainEvent {
    /// First sample with a non-zero rate.
    pub start: Option<DateTime<Utc>>,
    /// First dry sample after the window, if one was observed.
    pub end: Option<DateTime<Utc>>,
    /// Highest rate inside the window, in mm/h.
    pub peak_mm_h: f64,
    /// Accumulated precipitation over the window, in mm.
    pub total_mm: f64,
}

impl RainEvent {
    /// Duration of the window, known only when both ends are.
    pub fn length(&self) -> Option<Duration> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Whether the window touches the span `[now, now + horizon]`.
    ///
    /// A window that already started counts as starting now; a missing
    /// start never matches.
    pub fn starts_within(&self, now: DateTime<Utc>, horizon: Duration) -> bool {
        match self.start {
            Some(start) => start.max(now) - now <= horizon,
            None => false,
        }
    }
}

enum ScanState {
    Searching,
    Active,
    Ended,
}

/// Scan a series for its next rain event.
///
/// Three states drive the scan. `Searching` skips dry samples until the
/// first wet one opens the window. `Active` accumulates peak and total;
/// a dry sample records a provisional end and moves to `Ended`. From
/// `Ended` a wet sample reopens the window (the single dry sample is
/// healed into it), while a second dry sample confirms the end and
/// stops the scan.
///
/// The total divides the summed hourly-rate samples by the sampling
/// cadence, turning 5-minute rate observations into accumulated mm.
pub fn next_rain_event(series: &PrecipitationSeries) -> RainEvent {
    let mut state = ScanState::Searching;
    let mut start = None;
    let mut end = None;
    let mut peak = 0.0f64;
    let mut total = 0.0f64;

    for sample in series.samples() {
        let wet = sample.rate_mm_h > 0.0;
        match state {
            ScanState::Searching if wet => {
                start = Some(sample.timestamp);
                peak = sample.rate_mm_h;
                total = sample.rate_mm_h;
                state = ScanState::Active;
            }
            ScanState::Searching => {}
            ScanState::Active if wet => {
                peak = peak.max(sample.rate_mm_h);
                total += sample.rate_mm_h;
            }
            ScanState::Active => {
                end = Some(sample.timestamp);
                state = ScanState::Ended;
            }
            ScanState::Ended if wet => {
                end = None;
                peak = peak.max(sample.rate_mm_h);
                total += sample.rate_mm_h;
                state = ScanState::Active;
            }
            ScanState::Ended => break,
        }
    }

    RainEvent {
        start,
        end,
        peak_mm_h: peak,
        total_mm: total / INTERVALS_PER_HOUR,
    }
}
