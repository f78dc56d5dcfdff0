//! Builders for synthetic composite containers.
//!
//! Tests assemble containers in memory instead of shipping captured
//! downloads: a member payload is an ASCII product header, an ETX
//! terminator and little-endian code pairs, and a container is a
//! bzip2-compressed tar of such members.

use bzip2::write::BzEncoder;
use bzip2::Compression;
use radar_common::GridExtent;

/// Header terminator byte of the composite payload layout.
pub const ETX: u8 = 0x03;

/// Formats a member name for a run base time and forecast offset.
///
/// `base` is the `yymmddHHMM` run time, `offset_minutes` the forecast
/// lead in minutes.
///
/// # Example
///
/// ```
/// use test_utils::member_name;
///
/// assert_eq!(member_name("2408251200", 5), "DE1200_RV2408251200_005");
/// ```
pub fn member_name(base: &str, offset_minutes: u32) -> String {
    format!("DE1200_RV{}_{:03}", base, offset_minutes)
}

/// Builds a member payload from raw grid codes.
///
/// The payload carries a short ASCII header, the ETX terminator and the
/// codes packed little-endian in row-major order.
pub fn member_payload(codes: &[u16]) -> Vec<u8> {
    let mut payload = b"RV synthetic product header BY0000000000".to_vec();
    payload.push(ETX);
    for code in codes {
        payload.extend_from_slice(&code.to_le_bytes());
    }
    payload
}

/// Builds a tar.bz2 container from named member payloads.
///
/// Panics on I/O errors; in-memory archive assembly only fails on
/// malformed member names, which a fixture should never produce.
pub fn build_container(members: &[(String, Vec<u8>)]) -> Vec<u8> {
    let mut encoder = BzEncoder::new(Vec::new(), Compression::fast());
    {
        let mut builder = tar::Builder::new(&mut encoder);
        for (name, payload) in members {
            let mut header = tar::Header::new_gnu();
            header.set_size(payload.len() as u64);
            builder
                .append_data(&mut header, name, payload.as_slice())
                .expect("append tar member");
        }
        builder.finish().expect("finish tar stream");
    }
    encoder.finish().expect("finish bzip2 stream")
}

/// Builds a complete container for one run: one member per forecast
/// offset, every frame on the given extent.
pub fn build_run_container(
    base: &str,
    extent: GridExtent,
    frames: &[(u32, Vec<u16>)],
) -> Vec<u8> {
    let members: Vec<(String, Vec<u8>)> = frames
        .iter()
        .map(|(offset, codes)| {
            assert_eq!(codes.len(), extent.len(), "codes must fill the extent");
            (member_name(base, *offset), member_payload(codes))
        })
        .collect();
    build_container(&members)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_name() {
        assert_eq!(member_name("2408251200", 0), "DE1200_RV2408251200_000");
        assert_eq!(member_name("2408251200", 120), "DE1200_RV2408251200_120");
    }

    #[test]
    fn test_member_payload_layout() {
        let payload = member_payload(&[0x0102, 0x0304]);
        let etx = payload.iter().position(|&b| b == ETX).unwrap();
        assert_eq!(&payload[etx + 1..], &[0x02, 0x01, 0x04, 0x03]);
    }

    #[test]
    fn test_build_container_is_bzip2() {
        let container = build_container(&[(
            member_name("2408251200", 0),
            member_payload(&[0, 0, 0, 0]),
        )]);
        // bzip2 stream magic
        assert_eq!(&container[0..3], b"BZh");
    }
}
