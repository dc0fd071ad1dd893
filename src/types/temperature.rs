// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature types.
//!
//! The spa reports whole degrees only. Readings are always normalized to
//! Celsius by the status decoder; targets sent with `TempSet` are validated
//! Celsius values.

use std::fmt;

use serde::Serialize;

use crate::error::ValueError;

/// A whole-degree Celsius reading.
///
/// Signed because Fahrenheit readings outside the documented bands convert
/// to values below zero.
///
/// # Examples
///
/// ```
/// use intex_spa::types::Celsius;
///
/// let t = Celsius::new(37);
/// assert_eq!(t.value(), 37);
/// assert_eq!(t.to_string(), "37°C");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Celsius(i16);

impl Celsius {
    /// Creates a reading from whole degrees Celsius.
    #[must_use]
    pub const fn new(degrees: i16) -> Self {
        Self(degrees)
    }

    /// Returns the degrees Celsius.
    #[must_use]
    pub const fn value(&self) -> i16 {
        self.0
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°C", self.0)
    }
}

impl From<TargetTemperature> for Celsius {
    fn from(target: TargetTemperature) -> Self {
        Self(i16::from(target.0))
    }
}

/// Target water temperature for the `TempSet` command (10-40 °C).
///
/// # Examples
///
/// ```
/// use intex_spa::types::TargetTemperature;
///
/// let target = TargetTemperature::new(38).unwrap();
/// assert_eq!(target.value(), 38);
///
/// assert!(TargetTemperature::new(9).is_err());
/// assert!(TargetTemperature::new(41).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetTemperature(u8);

impl TargetTemperature {
    /// Lowest accepted target.
    pub const MIN: Self = Self(10);

    /// Highest accepted target.
    pub const MAX: Self = Self(40);

    /// Creates a target temperature.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `celsius` is outside 10-40.
    pub fn new(celsius: i16) -> Result<Self, ValueError> {
        let min = i16::from(Self::MIN.0);
        let max = i16::from(Self::MAX.0);
        let out_of_range = ValueError::OutOfRange {
            min,
            max,
            actual: celsius,
        };
        if !(min..=max).contains(&celsius) {
            return Err(out_of_range);
        }
        u8::try_from(celsius).map(Self).map_err(|_| out_of_range)
    }

    /// Returns the target in degrees Celsius.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for TargetTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°C", self.0)
    }
}

impl TryFrom<i16> for TargetTemperature {
    type Error = ValueError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
