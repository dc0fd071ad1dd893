// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hex string and bit helpers shared by the status decoder and the command
//! payload builder.
//!
//! Byte `N` of a hex string occupies characters `[2N, 2N + 2)`. Bits are
//! numbered from the least significant (bit 0) to the most significant
//! (bit 7).

use std::fmt::Write as _;

use crate::error::PayloadDefect;

/// Reads byte `index` from a hex string.
///
/// Only the two characters of that byte are validated.
///
/// # Errors
///
/// Returns [`PayloadDefect::TooShort`] if the string ends before the byte,
/// or [`PayloadDefect::InvalidHex`] if either character is not a hex digit.
pub fn byte_at(raw: &str, index: usize) -> Result<u8, PayloadDefect> {
    let bytes = raw.as_bytes();
    let start = index * 2;
    if bytes.len() < start + 2 {
        return Err(PayloadDefect::TooShort {
            required: start + 2,
            actual: bytes.len(),
        });
    }

    let high = nibble(bytes[start], start)?;
    let low = nibble(bytes[start + 1], start + 1)?;
    Ok((high << 4) | low)
}

fn nibble(byte: u8, position: usize) -> Result<u8, PayloadDefect> {
    char::from(byte)
        .to_digit(16)
        .and_then(|digit| u8::try_from(digit).ok())
        .ok_or(PayloadDefect::InvalidHex { position })
}

/// Returns whether bit `bit` (0 = least significant) of `byte` is set.
#[must_use]
pub const fn bit(byte: u8, bit: u8) -> bool {
    (byte >> bit) & 1 == 1
}

/// Converts whole degrees Fahrenheit to Celsius, rounded to the nearest degree.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn fahrenheit_to_celsius(fahrenheit: u8) -> i16 {
    let celsius = (f64::from(fahrenheit) - 32.0) * 5.0 / 9.0;
    celsius.round() as i16
}

/// Appends `value` as two upper-case, zero-padded hex digits.
pub fn push_byte(out: &mut String, value: u8) {
    // Writing to a String cannot fail.
    let _ = write!(out, "{value:02X}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_at_reads_position() {
        let raw = "00112233445566778899AABBCCDDEEFF";
        assert_eq!(byte_at(raw, 0), Ok(0x00));
        assert_eq!(byte_at(raw, 7), Ok(0x77));
        assert_eq!(byte_at(raw, 15), Ok(0xFF));
    }

    #[test]
    fn byte_at_accepts_lower_case() {
        assert_eq!(byte_at("ab", 0), Ok(0xAB));
    }

    #[test]
    fn byte_at_past_end() {
        assert_eq!(
            byte_at("0011", 2),
            Err(PayloadDefect::TooShort {
                required: 6,
                actual: 4
            })
        );
    }

    #[test]
    fn byte_at_rejects_non_hex() {
        assert_eq!(
            byte_at("00G1", 1),
            Err(PayloadDefect::InvalidHex { position: 2 })
        );
    }

    #[test]
    fn byte_at_rejects_multibyte_characters() {
        assert_eq!(
            byte_at("0\u{e9}", 0),
            Err(PayloadDefect::InvalidHex { position: 1 })
        );
    }

    #[test]
    fn bit_positions() {
        assert!(bit(0b0000_0010, 1));
        assert!(!bit(0b0000_0010, 0));
        assert!(bit(0b1000_0000, 7));
        assert!(!bit(0b0111_1111, 7));
    }

    #[test]
    fn fahrenheit_conversion_rounds() {
        assert_eq!(fahrenheit_to_celsius(32), 0);
        assert_eq!(fahrenheit_to_celsius(41), 5);
        assert_eq!(fahrenheit_to_celsius(100), 38);
        assert_eq!(fahrenheit_to_celsius(104), 40);
        assert_eq!(fahrenheit_to_celsius(0), -18);
    }

    #[test]
    fn push_byte_pads_and_uppercases() {
        let mut out = String::from("8888");
        push_byte(&mut out, 0x0A);
        push_byte(&mut out, 0xB5);
        assert_eq!(out, "88880AB5");
    }
}
