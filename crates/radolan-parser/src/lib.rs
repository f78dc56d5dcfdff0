//! RADOLAN composite parser.
//!
//! Decodes the DWD RV precipitation composite: a bzip2-compressed tar
//! container whose members are binary radar frames. Each member is an
//! ASCII product header terminated by a single ETX byte, followed by the
//! full DE1200 grid packed as unsigned 16-bit little-endian codes.

pub mod archive;
pub mod error;
pub mod frame;

pub use archive::{decode_composite, read_composite_archive};
pub use error::FormatError;
pub use frame::{rate_from_code, ArchiveMember, RadarFrame, INTERVALS_PER_HOUR};
