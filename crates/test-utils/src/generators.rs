//! Test data generators for synthetic radar grids.
//!
//! These generators create predictable, verifiable code grids that can
//! be used across the test suite. Codes are the raw 16-bit values a
//! composite payload carries; rates decoded from them can be asserted
//! exactly.

use radar_common::{GridExtent, GridIndex};

/// Code units per mm/h: codes quantize a 5-minute accumulation in
/// steps of 0.01 mm, so 100 units of 0.01 mm per 5 minutes is 12 mm/h.
const CODE_UNITS_PER_MM_H: f64 = 100.0 / 12.0;

/// Encodes a precipitation rate in mm/h as a raw grid code.
///
/// Rounds to the nearest representable code. Panics if the rate does
/// not fit the 12-bit value range, which keeps bad fixtures loud.
///
/// # Example
///
/// ```
/// use test_utils::code_for_rate;
///
/// assert_eq!(code_for_rate(12.0), 100);
/// assert_eq!(code_for_rate(0.0), 0);
/// ```
pub fn code_for_rate(rate_mm_h: f64) -> u16 {
    let code = (rate_mm_h * CODE_UNITS_PER_MM_H).round();
    assert!(
        (0.0..=0x0FFF as f64).contains(&code),
        "rate {} mm/h does not fit the code value range",
        rate_mm_h
    );
    code as u16
}

/// Creates a grid filled with a constant code.
///
/// Useful for testing edge cases and simple scenarios.
pub fn constant_codes(extent: GridExtent, code: u16) -> Vec<u16> {
    vec![code; extent.len()]
}

/// Creates a zero grid with specific codes planted at chosen cells.
///
/// # Example
///
/// ```
/// use radar_common::{GridExtent, GridIndex};
/// use test_utils::codes_with;
///
/// let extent = GridExtent::new(10, 5);
/// let codes = codes_with(extent, &[(GridIndex::new(3, 2), 100)]);
/// assert_eq!(codes[2 * 10 + 3], 100);
/// assert_eq!(codes[0], 0);
/// ```
pub fn codes_with(extent: GridExtent, cells: &[(GridIndex, u16)]) -> Vec<u16> {
    let mut codes = vec![0u16; extent.len()];
    for (cell, code) in cells {
        codes[extent.flat_index(*cell)] = *code;
    }
    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_for_rate() {
        assert_eq!(code_for_rate(12.0), 100);
        assert_eq!(code_for_rate(0.12), 1);
        assert_eq!(code_for_rate(0.0), 0);
        assert_eq!(code_for_rate(6.0), 50);
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn test_code_for_rate_rejects_oversized_rates() {
        // 0x0FFF units is 491.64 mm/h
        code_for_rate(500.0);
    }

    #[test]
    fn test_constant_codes() {
        let extent = GridExtent::new(4, 3);
        let codes = constant_codes(extent, 7);
        assert_eq!(codes.len(), 12);
        assert!(codes.iter().all(|&c| c == 7));
    }

    #[test]
    fn test_codes_with() {
        let extent = GridExtent::new(10, 5);
        let codes = codes_with(
            extent,
            &[(GridIndex::new(0, 0), 1), (GridIndex::new(9, 4), 2)],
        );
        assert_eq!(codes[0], 1);
        assert_eq!(codes[49], 2);
        assert_eq!(codes.iter().filter(|&&c| c != 0).count(), 2);
    }
}
