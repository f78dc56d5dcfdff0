//! Radar frame decoding.
//!
//! One container member is one 5-minute frame. The member name carries
//! the frame's capture time in its trailing characters: a 10-character
//! base time (`yymmddHHMM`), one separator, then a 3-digit forecast
//! minute offset. `DE1200_RV2408251200_005` is the 12:00 UTC run's
//! +5 minute frame.
//!
//! The payload is an ASCII product header terminated by a single ETX
//! byte (0x03); everything after it is the grid, packed as unsigned
//! 16-bit little-endian codes in row-major order.

use bytes::Bytes;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use radar_common::{GridExtent, GridIndex, DE1200_EXTENT};

use crate::error::FormatError;

/// Header terminator byte (ASCII ETX).
const ETX: u8 = 0x03;

/// Code bit marking a cell with no valid measurement.
pub const NO_DATA_FLAG: u16 = 0x2000;

/// Mask selecting the quantized precipitation bits of a code.
pub const VALUE_MASK: u16 = 0x0FFF;

/// Frames per hour at the composite's 5-minute cadence.
pub const INTERVALS_PER_HOUR: f64 = 12.0;

/// One member of a composite container: its path inside the archive and
/// its raw payload bytes.
#[derive(Debug, Clone)]
pub struct ArchiveMember {
    pub name: String,
    pub payload: Bytes,
}

impl ArchiveMember {
    pub fn new(name: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            payload: payload.into(),
        }
    }
}

/// A decoded radar frame: one capture instant plus the full intensity
/// grid, immutable once constructed.
#[derive(Debug, Clone)]
pub struct RadarFrame {
    timestamp: DateTime<Utc>,
    extent: GridExtent,
    grid: Vec<u16>,
}

impl RadarFrame {
    /// Decode one archive member into a frame on the DE1200 grid.
    pub fn decode(member: &ArchiveMember) -> Result<Self, FormatError> {
        let timestamp = parse_member_timestamp(&member.name)?;
        let grid = unpack_grid(&member.name, &member.payload, DE1200_EXTENT)?;

        Ok(Self {
            timestamp,
            extent: DE1200_EXTENT,
            grid,
        })
    }

    /// Build a frame from already unpacked codes.
    ///
    /// The code count must match the extent. Used by ingest tooling and
    /// tests that work with grids smaller than the full composite.
    pub fn from_codes(
        timestamp: DateTime<Utc>,
        extent: GridExtent,
        grid: Vec<u16>,
    ) -> Result<Self, FormatError> {
        if grid.len() != extent.len() {
            return Err(FormatError::CellCount {
                expected: extent.len(),
                actual: grid.len(),
            });
        }

        Ok(Self {
            timestamp,
            extent,
            grid,
        })
    }

    /// Capture time of this frame in UTC.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Grid extent of this frame.
    pub fn extent(&self) -> GridExtent {
        self.extent
    }

    /// Raw 16-bit code at a cell. The index must lie inside the extent.
    pub fn code_at(&self, index: GridIndex) -> u16 {
        self.grid[self.extent.flat_index(index)]
    }

    /// Precipitation rate at a cell in mm/h.
    pub fn rate_at(&self, index: GridIndex) -> f64 {
        rate_from_code(self.code_at(index))
    }
}

/// Decode a raw grid code into a precipitation rate in mm/h.
///
/// Codes carry a 5-minute accumulation quantized in units of 0.01 mm.
/// A set no-data flag reads as no precipitation rather than poisoning
/// the series.
pub fn rate_from_code(code: u16) -> f64 {
    if code & NO_DATA_FLAG != 0 {
        return 0.0;
    }

    (code & VALUE_MASK) as f64 / 100.0 * INTERVALS_PER_HOUR
}

/// Extract the frame timestamp from a member name.
///
/// The base time is `name[len-14 .. len-4]`, the minute offset
/// `name[len-3 ..]`; one separator character sits between them.
fn parse_member_timestamp(name: &str) -> Result<DateTime<Utc>, FormatError> {
    if !name.is_ascii() || name.len() < 14 {
        return Err(FormatError::MemberName {
            name: name.to_string(),
            reason: "shorter than the 14 trailing timestamp characters".to_string(),
        });
    }

    let base = &name[name.len() - 14..name.len() - 4];
    let offset = &name[name.len() - 3..];

    let offset_minutes: i64 = offset.parse().map_err(|_| FormatError::MemberName {
        name: name.to_string(),
        reason: format!("minute offset '{}' is not numeric", offset),
    })?;

    let base_time =
        NaiveDateTime::parse_from_str(base, "%y%m%d%H%M").map_err(|e| FormatError::Timestamp {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

    let base_time = DateTime::<Utc>::from_naive_utc_and_offset(base_time, Utc);

    Ok(base_time + Duration::minutes(offset_minutes))
}

/// Split a payload at the header terminator and unpack the grid codes.
fn unpack_grid(name: &str, payload: &[u8], extent: GridExtent) -> Result<Vec<u16>, FormatError> {
    let etx = payload
        .iter()
        .position(|&b| b == ETX)
        .ok_or_else(|| FormatError::MissingEtx {
            name: name.to_string(),
        })?;

    let buffer = &payload[etx + 1..];
    let expected = extent.len() * 2;

    if buffer.len() != expected {
        return Err(FormatError::PayloadLength {
            name: name.to_string(),
            expected,
            actual: buffer.len(),
        });
    }

    Ok(buffer
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect())
}
