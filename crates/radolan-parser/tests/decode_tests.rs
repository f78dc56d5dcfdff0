//! End-to-end decoding of synthetic composite containers.

use chrono::{TimeZone, Utc};
use radar_common::{GridIndex, DE1200_EXTENT};
use radolan_parser::{decode_composite, FormatError};
use test_utils::{assert_approx_eq, build_run_container, code_for_rate, codes_with};

#[test]
fn test_decode_full_run() {
    let cell = GridIndex::new(543, 599);
    let container = build_run_container(
        "2408251200",
        DE1200_EXTENT,
        &[
            (0, codes_with(DE1200_EXTENT, &[(cell, code_for_rate(1.2))])),
            (5, codes_with(DE1200_EXTENT, &[(cell, code_for_rate(6.0))])),
            (10, codes_with(DE1200_EXTENT, &[])),
        ],
    );

    let frames = decode_composite(&container).unwrap();
    assert_eq!(frames.len(), 3);

    assert_eq!(
        frames[0].timestamp(),
        Utc.with_ymd_and_hms(2024, 8, 25, 12, 0, 0).unwrap()
    );
    assert_eq!(
        frames[2].timestamp(),
        Utc.with_ymd_and_hms(2024, 8, 25, 12, 10, 0).unwrap()
    );

    assert_approx_eq!(frames[0].rate_at(cell), 1.2, 1e-9);
    assert_approx_eq!(frames[1].rate_at(cell), 6.0, 1e-9);
    assert_eq!(frames[2].rate_at(cell), 0.0);
    assert_eq!(frames[0].rate_at(GridIndex::new(0, 0)), 0.0);
}

#[test]
fn test_decode_keeps_no_data_cells_dry() {
    let cell = GridIndex::new(100, 200);
    let container = build_run_container(
        "2408251200",
        DE1200_EXTENT,
        &[(0, codes_with(DE1200_EXTENT, &[(cell, 0x2000 | 50)]))],
    );

    let frames = decode_composite(&container).unwrap();
    assert_eq!(frames[0].code_at(cell), 0x2032);
    assert_eq!(frames[0].rate_at(cell), 0.0);
}

#[test]
fn test_decode_rejects_undersized_member() {
    let container = test_utils::build_container(&[(
        test_utils::member_name("2408251200", 0),
        test_utils::member_payload(&[0u16; 4]),
    )]);

    let err = decode_composite(&container).unwrap_err();
    assert!(
        matches!(err, FormatError::PayloadLength { .. }),
        "expected PayloadLength, got {:?}",
        err
    );
}
