//! Composite container handling.
//!
//! A composite arrives as a bzip2-compressed tar archive holding one
//! member per forecast frame. Decompression and unpacking are streamed
//! so the compressed input is walked once.

use std::io::Read;

use bzip2::read::BzDecoder;
use tar::Archive;
use tracing::debug;

use crate::error::FormatError;
use crate::frame::{ArchiveMember, RadarFrame};

/// Unpack a tar.bz2 composite container into its raw members.
///
/// Non-file entries are skipped. Member order follows the archive.
pub fn read_composite_archive(bytes: &[u8]) -> Result<Vec<ArchiveMember>, FormatError> {
    let decoder = BzDecoder::new(bytes);
    let mut archive = Archive::new(decoder);

    let entries = archive
        .entries()
        .map_err(|e| FormatError::Archive(e.to_string()))?;

    let mut members = Vec::new();
    for entry in entries {
        let mut entry = entry.map_err(|e| FormatError::Archive(e.to_string()))?;
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let name = entry
            .path()
            .map_err(|e| FormatError::Archive(e.to_string()))?
            .to_string_lossy()
            .into_owned();

        let mut payload = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut payload)
            .map_err(|e| FormatError::Archive(e.to_string()))?;

        members.push(ArchiveMember::new(name, payload));
    }

    debug!(members = members.len(), "unpacked composite container");

    Ok(members)
}

/// Decode a complete composite container into radar frames.
///
/// Frames come back in archive order; callers that need a time axis
/// sort by timestamp themselves.
pub fn decode_composite(bytes: &[u8]) -> Result<Vec<RadarFrame>, FormatError> {
    let members = read_composite_archive(bytes)?;

    let mut frames = Vec::with_capacity(members.len());
    for member in &members {
        frames.push(RadarFrame::decode(member)?);
    }

    Ok(frames)
}
