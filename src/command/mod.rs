// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spa command definitions.
//!
//! The cloud knows eight commands per spa. All of them except `TempSet` are
//! toggles or a status refresh and carry no argument.
//!
//! # Available Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `PowerOnOff` | Toggle the spa power |
//! | `JetOnOff` | Toggle the massage jets |
//! | `BubbleOnOff` | Toggle the bubbles |
//! | `HeatOnOff` | Toggle the heater |
//! | `FilterOnOff` | Toggle the filter pump |
//! | `SanitizerOnOff` | Toggle the sanitizer |
//! | `Refresh` | Ask the spa to report its current state |
//! | `TempSet` | Set the target temperature |
//!
//! # Examples
//!
//! ```
//! use intex_spa::command::{Command, CommandName};
//! use intex_spa::types::TargetTemperature;
//!
//! let cmd = Command::TempSet(TargetTemperature::new(38).unwrap());
//! assert_eq!(cmd.name(), CommandName::TempSet);
//! assert_eq!(cmd.name().as_str(), "TempSet");
//! ```

mod template;

pub use template::{CommandTemplate, PayloadSuffix, SUFFIX_TABLE, suffix_for};

use std::fmt;
use std::str::FromStr;

use crate::error::CommandError;
use crate::types::TargetTemperature;

/// Name of a spa command as used in the device command catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandName {
    /// Toggle the spa power.
    PowerOnOff,
    /// Toggle the massage jets.
    JetOnOff,
    /// Toggle the bubbles.
    BubbleOnOff,
    /// Toggle the heater.
    HeatOnOff,
    /// Toggle the filter pump.
    FilterOnOff,
    /// Toggle the sanitizer.
    SanitizerOnOff,
    /// Refresh the reported state.
    Refresh,
    /// Set the target temperature.
    TempSet,
}

impl CommandName {
    /// All command names.
    pub const ALL: [Self; 8] = [
        Self::PowerOnOff,
        Self::JetOnOff,
        Self::BubbleOnOff,
        Self::HeatOnOff,
        Self::FilterOnOff,
        Self::SanitizerOnOff,
        Self::Refresh,
        Self::TempSet,
    ];

    /// Returns the catalog name of the command.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PowerOnOff => "PowerOnOff",
            Self::JetOnOff => "JetOnOff",
            Self::BubbleOnOff => "BubbleOnOff",
            Self::HeatOnOff => "HeatOnOff",
            Self::FilterOnOff => "FilterOnOff",
            Self::SanitizerOnOff => "SanitizerOnOff",
            Self::Refresh => "Refresh",
            Self::TempSet => "TempSet",
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandName {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| CommandError::UnsupportedCommand(s.to_string()))
    }
}

/// A command request for one spa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Toggle the spa power.
    PowerOnOff,
    /// Toggle the massage jets.
    JetOnOff,
    /// Toggle the bubbles.
    BubbleOnOff,
    /// Toggle the heater.
    HeatOnOff,
    /// Toggle the filter pump.
    FilterOnOff,
    /// Toggle the sanitizer.
    SanitizerOnOff,
    /// Refresh the reported state.
    Refresh,
    /// Set the target temperature.
    TempSet(TargetTemperature),
}

impl Command {
    /// Returns the catalog name of the command.
    #[must_use]
    pub const fn name(&self) -> CommandName {
        match self {
            Self::PowerOnOff => CommandName::PowerOnOff,
            Self::JetOnOff => CommandName::JetOnOff,
            Self::BubbleOnOff => CommandName::BubbleOnOff,
            Self::HeatOnOff => CommandName::HeatOnOff,
            Self::FilterOnOff => CommandName::FilterOnOff,
            Self::SanitizerOnOff => CommandName::SanitizerOnOff,
            Self::Refresh => CommandName::Refresh,
            Self::TempSet(_) => CommandName::TempSet,
        }
    }

    /// Returns the target temperature carried by `TempSet`.
    #[must_use]
    pub const fn target_temperature(&self) -> Option<TargetTemperature> {
        match self {
            Self::TempSet(target) => Some(*target),
            _ => None,
        }
    }
}

/// A spa feature that can be switched on and off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Massage jets.
    Jet,
    /// Bubbles.
    Bubble,
    /// Heater.
    Heat,
    /// Filter pump.
    Filter,
    /// Sanitizer.
    Sanitizer,
}

impl Feature {
    /// Returns the command toggling this feature.
    #[must_use]
    pub const fn toggle_command(&self) -> Command {
        match self {
            Self::Jet => Command::JetOnOff,
            Self::Bubble => Command::BubbleOnOff,
            Self::Heat => Command::HeatOnOff,
            Self::Filter => Command::FilterOnOff,
            Self::Sanitizer => Command::SanitizerOnOff,
        }
    }

    /// Returns whether this feature is running according to `record`.
    ///
    /// Returns `None` when the record reports an error.
    #[must_use]
    pub fn is_running(&self, record: &crate::status::StatusRecord) -> Option<bool> {
        match self {
            Self::Jet => record.is_jet_running(),
            Self::Bubble => record.is_bubble_running(),
            Self::Heat => record.is_heat_running(),
            Self::Filter => record.is_filter_running(),
            Self::Sanitizer => record.is_sanitizer_running(),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Jet => "jet",
            Self::Bubble => "bubble",
            Self::Heat => "heat",
            Self::Filter => "filter",
            Self::Sanitizer => "sanitizer",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_round_trips_through_catalog_string() {
        for name in CommandName::ALL {
            assert_eq!(name.as_str().parse::<CommandName>().unwrap(), name);
        }
    }

    #[test]
    fn unknown_catalog_name_is_unsupported() {
        let err = "LightOnOff".parse::<CommandName>().unwrap_err();
        assert!(matches!(err, CommandError::UnsupportedCommand(ref name) if name == "LightOnOff"));
    }

    #[test]
    fn catalog_names_are_case_sensitive() {
        assert!("poweronoff".parse::<CommandName>().is_err());
    }

    #[test]
    fn command_names() {
        assert_eq!(Command::Refresh.name(), CommandName::Refresh);
        assert_eq!(Command::Refresh.target_temperature(), None);

        let target = TargetTemperature::new(25).unwrap();
        let cmd = Command::TempSet(target);
        assert_eq!(cmd.name().to_string(), "TempSet");
        assert_eq!(cmd.target_temperature(), Some(target));
    }

    #[test]
    fn feature_toggle_commands() {
        assert_eq!(Feature::Jet.toggle_command(), Command::JetOnOff);
        assert_eq!(Feature::Bubble.toggle_command(), Command::BubbleOnOff);
        assert_eq!(Feature::Heat.toggle_command(), Command::HeatOnOff);
        assert_eq!(Feature::Filter.toggle_command(), Command::FilterOnOff);
        assert_eq!(Feature::Sanitizer.toggle_command(), Command::SanitizerOnOff);
    }

    #[test]
    fn feature_reads_its_running_flag() {
        // Byte 5 = 0b0000_1000: only the jets run.
        let record = crate::status::decode("0000000000080026000000000000001A").unwrap();
        assert_eq!(Feature::Jet.is_running(&record), Some(true));
        assert_eq!(Feature::Heat.is_running(&record), Some(false));
    }
}
