// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoding of the spa status payload.
//!
//! The cloud delivers the spa state as the hex representation of a fixed
//! binary record. [`decode`] turns that string into a [`StatusRecord`].
//!
//! # Layout
//!
//! | Byte | Content |
//! |------|---------|
//! | 5    | Running indicators: bit 1 filter, 2 heat, 3 jet, 4 bubble, 5 sanitizer |
//! | 6    | Flashing indicators: bit 2 heat (red) |
//! | 7    | Current temperature or error code |
//! | 12   | Bit 7: filter online |
//! | 13   | Bit 7: sanitizer online |
//! | 14   | Bit 7: heat online |
//! | 15   | Target temperature |
//!
//! Byte 7 is banded: `0..=40` is Celsius, `41..=179` is Fahrenheit,
//! `180..=199` is error `E<value - 100>` and `200` or more means heating
//! ended after 72 hours. An error supersedes every other field.

mod device_status;
mod error_code;

pub use device_status::DeviceStatus;
pub use error_code::ErrorCode;

use serde::Serialize;

use crate::error::{ParseError, PayloadDefect};
use crate::hex;
use crate::types::Celsius;

/// Number of hex characters in a complete status record.
pub const PAYLOAD_HEX_LEN: usize = 32;

const BYTE_RUNNING: usize = 5;
const BYTE_FLASHING: usize = 6;
const BYTE_PRIMARY: usize = 7;
const BYTE_FILTER_ONLINE: usize = 12;
const BYTE_SANITIZER_ONLINE: usize = 13;
const BYTE_HEAT_ONLINE: usize = 14;
const BYTE_TARGET: usize = 15;

const BIT_FILTER: u8 = 1;
const BIT_HEAT: u8 = 2;
const BIT_JET: u8 = 3;
const BIT_BUBBLE: u8 = 4;
const BIT_SANITIZER: u8 = 5;
const BIT_HEAT_FLASHING: u8 = 2;
const BIT_ONLINE: u8 = 7;

/// Decoded spa state.
///
/// A record carries either an error or an operating snapshot, never both.
///
/// # Examples
///
/// ```
/// use intex_spa::status::decode;
/// use intex_spa::types::Celsius;
///
/// let record = decode("FFFF110F010600260000000080800026").unwrap();
/// assert_eq!(record.error(), None);
/// assert_eq!(record.current_temperature(), Some(Celsius::new(38)));
/// assert_eq!(record.is_filter_running(), Some(true));
/// assert_eq!(record.is_heat_running(), Some(true));
/// assert_eq!(record.is_jet_running(), Some(false));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorCode>,
    #[serde(flatten)]
    operating: Option<OperatingStatus>,
}

/// Temperatures and feature flags of a spa that reports no error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct OperatingStatus {
    /// Current water temperature.
    pub current_temperature: Celsius,
    /// Target water temperature.
    pub target_temperature: Celsius,
    /// Filter pump is running.
    #[serde(rename = "is_filter_running")]
    pub filter_running: bool,
    /// Heater is running.
    #[serde(rename = "is_heat_running")]
    pub heat_running: bool,
    /// Massage jets are running.
    #[serde(rename = "is_jet_running")]
    pub jet_running: bool,
    /// Bubbles are running.
    #[serde(rename = "is_bubble_running")]
    pub bubble_running: bool,
    /// Sanitizer is running.
    #[serde(rename = "is_sanitizer_running")]
    pub sanitizer_running: bool,
    /// Heat indicator is flashing red.
    #[serde(rename = "is_heat_flashing_red")]
    pub heat_flashing_red: bool,
    /// Filter is online.
    #[serde(rename = "is_filter_online")]
    pub filter_online: bool,
    /// Heater is online.
    #[serde(rename = "is_heat_online")]
    pub heat_online: bool,
    /// Sanitizer is online.
    #[serde(rename = "is_sanitizer_online")]
    pub sanitizer_online: bool,
}

impl StatusRecord {
    /// Returns the reported error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<ErrorCode> {
        self.error
    }

    /// Returns the operating snapshot, absent when an error is reported.
    #[must_use]
    pub const fn operating(&self) -> Option<&OperatingStatus> {
        self.operating.as_ref()
    }

    /// Returns the current water temperature.
    #[must_use]
    pub fn current_temperature(&self) -> Option<Celsius> {
        self.operating.map(|s| s.current_temperature)
    }

    /// Returns the target water temperature.
    #[must_use]
    pub fn target_temperature(&self) -> Option<Celsius> {
        self.operating.map(|s| s.target_temperature)
    }

    /// Returns whether the filter is running.
    #[must_use]
    pub fn is_filter_running(&self) -> Option<bool> {
        self.operating.map(|s| s.filter_running)
    }

    /// Returns whether the heater is running.
    #[must_use]
    pub fn is_heat_running(&self) -> Option<bool> {
        self.operating.map(|s| s.heat_running)
    }

    /// Returns whether the jets are running.
    #[must_use]
    pub fn is_jet_running(&self) -> Option<bool> {
        self.operating.map(|s| s.jet_running)
    }

    /// Returns whether the bubbles are running.
    #[must_use]
    pub fn is_bubble_running(&self) -> Option<bool> {
        self.operating.map(|s| s.bubble_running)
    }

    /// Returns whether the sanitizer is running.
    #[must_use]
    pub fn is_sanitizer_running(&self) -> Option<bool> {
        self.operating.map(|s| s.sanitizer_running)
    }

    /// Returns whether the heat indicator flashes red.
    #[must_use]
    pub fn is_heat_flashing_red(&self) -> Option<bool> {
        self.operating.map(|s| s.heat_flashing_red)
    }

    /// Returns whether the filter is online.
    #[must_use]
    pub fn is_filter_online(&self) -> Option<bool> {
        self.operating.map(|s| s.filter_online)
    }

    /// Returns whether the heater is online.
    #[must_use]
    pub fn is_heat_online(&self) -> Option<bool> {
        self.operating.map(|s| s.heat_online)
    }

    /// Returns whether the sanitizer is online.
    #[must_use]
    pub fn is_sanitizer_online(&self) -> Option<bool> {
        self.operating.map(|s| s.sanitizer_online)
    }
}

/// Decodes a hex status payload.
///
/// # Errors
///
/// Returns `ParseError::MalformedPayload` if `raw` is shorter than
/// [`PAYLOAD_HEX_LEN`] characters or a byte read by the decoder is not
/// valid hex.
pub fn decode(raw: &str) -> Result<StatusRecord, ParseError> {
    if raw.len() < PAYLOAD_HEX_LEN {
        return Err(PayloadDefect::TooShort {
            required: PAYLOAD_HEX_LEN,
            actual: raw.len(),
        }
        .into());
    }

    let primary = hex::byte_at(raw, BYTE_PRIMARY)?;
    if let Some(error) = primary_error(primary) {
        return Ok(StatusRecord {
            error: Some(error),
            operating: None,
        });
    }

    let running = hex::byte_at(raw, BYTE_RUNNING)?;
    let flashing = hex::byte_at(raw, BYTE_FLASHING)?;
    let filter_online = hex::byte_at(raw, BYTE_FILTER_ONLINE)?;
    let sanitizer_online = hex::byte_at(raw, BYTE_SANITIZER_ONLINE)?;
    let heat_online = hex::byte_at(raw, BYTE_HEAT_ONLINE)?;
    let target = hex::byte_at(raw, BYTE_TARGET)?;

    Ok(StatusRecord {
        error: None,
        operating: Some(OperatingStatus {
            current_temperature: current_temperature(primary),
            target_temperature: target_temperature(target),
            filter_running: hex::bit(running, BIT_FILTER),
            heat_running: hex::bit(running, BIT_HEAT),
            jet_running: hex::bit(running, BIT_JET),
            bubble_running: hex::bit(running, BIT_BUBBLE),
            sanitizer_running: hex::bit(running, BIT_SANITIZER),
            heat_flashing_red: hex::bit(flashing, BIT_HEAT_FLASHING),
            filter_online: hex::bit(filter_online, BIT_ONLINE),
            heat_online: hex::bit(heat_online, BIT_ONLINE),
            sanitizer_online: hex::bit(sanitizer_online, BIT_ONLINE),
        }),
    })
}

fn primary_error(value: u8) -> Option<ErrorCode> {
    match value {
        200.. => Some(ErrorCode::HeatingEndedAfter72h),
        180..=199 => Some(ErrorCode::Coded(value - 100)),
        _ => None,
    }
}

fn current_temperature(value: u8) -> Celsius {
    if value <= 40 {
        Celsius::new(i16::from(value))
    } else {
        Celsius::new(hex::fahrenheit_to_celsius(value))
    }
}

fn target_temperature(value: u8) -> Celsius {
    if (10..=40).contains(&value) {
        Celsius::new(i16::from(value))
    } else {
        Celsius::new(hex::fahrenheit_to_celsius(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a payload with the given primary, running and target bytes.
    fn payload(primary: u8, running: u8, target: u8) -> String {
        let mut bytes = [0u8; 16];
        bytes[BYTE_RUNNING] = running;
        bytes[BYTE_PRIMARY] = primary;
        bytes[BYTE_TARGET] = target;
        encode(&bytes)
    }

    fn encode(bytes: &[u8]) -> String {
        let mut out = String::new();
        for byte in bytes {
            hex::push_byte(&mut out, *byte);
        }
        out
    }

    #[test]
    fn celsius_band_is_taken_as_is() {
        for value in 0..=40u8 {
            let record = decode(&payload(value, 0, 38)).unwrap();
            assert_eq!(record.error(), None);
            assert_eq!(
                record.current_temperature(),
                Some(Celsius::new(i16::from(value)))
            );
        }
    }

    #[test]
    fn fahrenheit_band_is_converted() {
        for value in 41..=179u8 {
            let record = decode(&payload(value, 0, 38)).unwrap();
            let expected = ((f64::from(value) - 32.0) * 5.0 / 9.0).round();
            #[allow(clippy::cast_possible_truncation)]
            let expected = Celsius::new(expected as i16);
            assert_eq!(record.current_temperature(), Some(expected), "byte {value}");
        }
    }

    #[test]
    fn error_band_yields_coded_errors() {
        for value in 180..=199u8 {
            let record = decode(&payload(value, 0xFF, 38)).unwrap();
            let error = record.error().unwrap();
            assert_eq!(error, ErrorCode::Coded(value - 100));
            assert!(error.to_string().starts_with(&format!("E{}", value - 100)));
        }
    }

    #[test]
    fn described_error_codes() {
        let record = decode(&payload(190, 0, 0)).unwrap();
        assert_eq!(record.error().unwrap().to_string(), "E90: No water flow");

        let record = decode(&payload(185, 0, 0)).unwrap();
        assert_eq!(record.error().unwrap().to_string(), "E85");
    }

    #[test]
    fn heating_ended_from_200_upwards() {
        for value in 200..=255u8 {
            let record = decode(&payload(value, 0xFF, 38)).unwrap();
            assert_eq!(record.error(), Some(ErrorCode::HeatingEndedAfter72h));
        }
    }

    #[test]
    fn error_clears_every_other_field() {
        let mut bytes = [0xFFu8; 16];
        bytes[BYTE_PRIMARY] = 190;
        let record = decode(&encode(&bytes)).unwrap();

        assert!(record.error().is_some());
        assert!(record.operating().is_none());
        assert_eq!(record.current_temperature(), None);
        assert_eq!(record.target_temperature(), None);
        assert_eq!(record.is_filter_running(), None);
        assert_eq!(record.is_heat_running(), None);
        assert_eq!(record.is_jet_running(), None);
        assert_eq!(record.is_bubble_running(), None);
        assert_eq!(record.is_sanitizer_running(), None);
        assert_eq!(record.is_heat_flashing_red(), None);
        assert_eq!(record.is_filter_online(), None);
        assert_eq!(record.is_heat_online(), None);
        assert_eq!(record.is_sanitizer_online(), None);
    }

    #[test]
    fn error_branch_does_not_read_feature_bytes() {
        let mut raw = payload(190, 0, 0);
        // Corrupt byte 5 and byte 15; only byte 7 is read on the error branch.
        raw.replace_range(10..12, "ZZ");
        raw.replace_range(30..32, "ZZ");
        assert_eq!(decode(&raw).unwrap().error(), Some(ErrorCode::Coded(90)));
    }

    #[test]
    fn running_bits_match_positions() {
        for combination in 0u8..32 {
            let running = combination << 1;
            let record = decode(&payload(30, running, 38)).unwrap();
            assert_eq!(record.is_filter_running(), Some(combination & 0b00001 != 0));
            assert_eq!(record.is_heat_running(), Some(combination & 0b00010 != 0));
            assert_eq!(record.is_jet_running(), Some(combination & 0b00100 != 0));
            assert_eq!(record.is_bubble_running(), Some(combination & 0b01000 != 0));
            assert_eq!(record.is_sanitizer_running(), Some(combination & 0b10000 != 0));
        }
    }

    #[test]
    fn bit_zero_of_running_byte_is_ignored() {
        let record = decode(&payload(30, 0b0000_0001, 38)).unwrap();
        let status = record.operating().unwrap();
        assert!(!status.filter_running);
        assert!(!status.heat_running);
        assert!(!status.jet_running);
        assert!(!status.bubble_running);
        assert!(!status.sanitizer_running);
    }

    #[test]
    fn flashing_and_online_bits() {
        let mut bytes = [0u8; 16];
        bytes[BYTE_PRIMARY] = 30;
        bytes[BYTE_TARGET] = 38;
        bytes[BYTE_FLASHING] = 0b0000_0100;
        bytes[BYTE_FILTER_ONLINE] = 0x80;
        bytes[BYTE_SANITIZER_ONLINE] = 0x7F;
        bytes[BYTE_HEAT_ONLINE] = 0x80;
        let record = decode(&encode(&bytes)).unwrap();

        assert_eq!(record.is_heat_flashing_red(), Some(true));
        assert_eq!(record.is_filter_online(), Some(true));
        assert_eq!(record.is_sanitizer_online(), Some(false));
        assert_eq!(record.is_heat_online(), Some(true));
    }

    #[test]
    fn target_temperature_bands() {
        let at = |target| decode(&payload(30, 0, target)).unwrap().target_temperature();
        assert_eq!(at(10), Some(Celsius::new(10)));
        assert_eq!(at(40), Some(Celsius::new(40)));
        assert_eq!(at(104), Some(Celsius::new(40)));
        assert_eq!(at(50), Some(Celsius::new(10)));
        assert_eq!(at(9), Some(Celsius::new(-13)));
    }

    #[test]
    fn sample_payload() {
        let record = decode("FFFF110F010600260000000080800026").unwrap();
        let status = record.operating().unwrap();
        assert_eq!(status.current_temperature, Celsius::new(38));
        assert_eq!(status.target_temperature, Celsius::new(38));
        assert!(status.filter_running);
        assert!(status.heat_running);
        assert!(!status.jet_running);
        assert!(!status.bubble_running);
        assert!(!status.sanitizer_running);
        assert!(status.filter_online);
        assert!(status.sanitizer_online);
        assert!(!status.heat_online);
    }

    #[test]
    fn short_payload_is_malformed() {
        let err = decode("FFFF110F01060026").unwrap_err();
        assert!(matches!(
            err,
            ParseError::MalformedPayload(PayloadDefect::TooShort {
                required: 32,
                actual: 16
            })
        ));
    }

    #[test]
    fn empty_payload_is_malformed() {
        assert!(matches!(
            decode(""),
            Err(ParseError::MalformedPayload(PayloadDefect::TooShort { .. }))
        ));
    }

    #[test]
    fn non_hex_primary_is_malformed() {
        let mut raw = payload(30, 0, 38);
        raw.replace_range(14..16, "XY");
        assert!(matches!(
            decode(&raw),
            Err(ParseError::MalformedPayload(PayloadDefect::InvalidHex {
                position: 14
            }))
        ));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let raw = format!("{}DEADBEEF", payload(30, 0, 38));
        assert_eq!(
            decode(&raw).unwrap().current_temperature(),
            Some(Celsius::new(30))
        );
    }

    #[test]
    fn serializes_flat() {
        let record = decode(&payload(30, 0b0000_0010, 38)).unwrap();
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["current_temperature"], 30);
        assert_eq!(json["target_temperature"], 38);
        assert_eq!(json["is_filter_running"], true);
        assert!(json.get("error").is_none());

        let record = decode(&payload(200, 0, 0)).unwrap();
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": "END: Heating ended after 72h, pump hibernating"})
        );
    }
}
