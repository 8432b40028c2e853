//! Packed binary-coded-decimal helpers.
//!
//! The DS3231 stores most time and date values as two BCD nibbles per byte:
//! the high nibble holds the tens digit and the low nibble the units digit,
//! so decimal 59 is stored as `0x59`. These helpers convert between that
//! packed form and plain binary values.

/// Packs a decimal value in `0..=99` into BCD.
///
/// No range checking is performed; inputs above 99 produce bytes that are
/// not valid BCD. Callers are responsible for staying in range.
#[must_use]
pub const fn decimal_to_packed(value: u8) -> u8 {
    (value / 10) * 16 + value % 10
}

/// Unpacks a BCD byte into its decimal value in `0..=99`.
///
/// The inverse of [`decimal_to_packed`]. Bytes whose nibbles are not both
/// in `0..=9` produce meaningless results; decoding does not validate.
#[must_use]
pub const fn packed_to_decimal(value: u8) -> u8 {
    (value / 16) * 10 + value % 16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_all_two_digit_values() {
        for v in 0..=99u8 {
            assert_eq!(packed_to_decimal(decimal_to_packed(v)), v);
        }
    }

    #[test]
    fn packs_tens_into_high_nibble() {
        assert_eq!(decimal_to_packed(0), 0x00);
        assert_eq!(decimal_to_packed(9), 0x09);
        assert_eq!(decimal_to_packed(10), 0x10);
        assert_eq!(decimal_to_packed(59), 0x59);
        assert_eq!(decimal_to_packed(99), 0x99);
    }

    #[test]
    fn unpacks_register_bytes() {
        assert_eq!(packed_to_decimal(0x00), 0);
        assert_eq!(packed_to_decimal(0x31), 31);
        assert_eq!(packed_to_decimal(0x45), 45);
        assert_eq!(packed_to_decimal(0x99), 99);
    }
}
