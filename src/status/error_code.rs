// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spa error codes reported in the primary status byte.

use std::fmt;

use serde::{Serialize, Serializer};

/// Known error code descriptions, as printed in the spa manual.
const DESCRIPTIONS: [(u8, &str); 9] = [
    (81, "Transmission signal failure"),
    (90, "No water flow"),
    (
        91,
        "Low salt level / Titanium plates issue / Possible electrolytic cell failure",
    ),
    (92, "High salt level"),
    (94, "Water temperature to low"),
    (95, "Water temperature to high"),
    (96, "System error"),
    (97, "Dry-fine protection"),
    (99, "Water temperature sensor broken"),
];

const HEATING_ENDED: &str = "Heating ended after 72h, pump hibernating";

/// An error reported by the spa instead of a temperature reading.
///
/// # Examples
///
/// ```
/// use intex_spa::status::ErrorCode;
///
/// let code = ErrorCode::Coded(90);
/// assert_eq!(code.description(), Some("No water flow"));
/// assert_eq!(code.to_string(), "E90: No water flow");
///
/// assert_eq!(ErrorCode::Coded(85).to_string(), "E85");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The heater ran for 72 hours and the pump went into hibernation (`END`).
    HeatingEndedAfter72h,
    /// A numbered error `E<code>`.
    Coded(u8),
}

impl ErrorCode {
    /// Returns the numeric code, if this is a numbered error.
    #[must_use]
    pub const fn code(&self) -> Option<u8> {
        match self {
            Self::HeatingEndedAfter72h => None,
            Self::Coded(code) => Some(*code),
        }
    }

    /// Returns the human-readable description, if one is known.
    #[must_use]
    pub fn description(&self) -> Option<&'static str> {
        match self {
            Self::HeatingEndedAfter72h => Some(HEATING_ENDED),
            Self::Coded(code) => DESCRIPTIONS
                .iter()
                .find(|(known, _)| known == code)
                .map(|(_, text)| *text),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeatingEndedAfter72h => write!(f, "END: {HEATING_ENDED}"),
            Self::Coded(code) => match self.description() {
                Some(text) => write!(f, "E{code}: {text}"),
                None => write!(f, "E{code}"),
            },
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
