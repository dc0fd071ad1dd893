// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command payload templates.
//!
//! The catalog only delivers the payload prefix. The cloud rejects a command
//! unless a per-command suffix byte is appended, and `TempSet` carries two
//! computed bytes instead.

use crate::command::{Command, CommandName};
use crate::error::CommandError;
use crate::hex;
use crate::response::CommandDefinition;
use crate::types::TargetTemperature;

/// What follows the catalog prefix in a command payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadSuffix {
    /// A constant hex suffix.
    Fixed(&'static str),
    /// The target temperature byte followed by `206 - target`.
    TargetTemperature,
}

/// Payload suffix of every command.
pub const SUFFIX_TABLE: [(CommandName, PayloadSuffix); 8] = [
    (CommandName::PowerOnOff, PayloadSuffix::Fixed("98")),
    (CommandName::JetOnOff, PayloadSuffix::Fixed("C8")),
    (CommandName::BubbleOnOff, PayloadSuffix::Fixed("D4")),
    (CommandName::HeatOnOff, PayloadSuffix::Fixed("C8")),
    (CommandName::FilterOnOff, PayloadSuffix::Fixed("D4")),
    (CommandName::SanitizerOnOff, PayloadSuffix::Fixed("D7")),
    (CommandName::Refresh, PayloadSuffix::Fixed("DA")),
    (CommandName::TempSet, PayloadSuffix::TargetTemperature),
];

/// Offset the second `TempSet` byte is computed from.
const TEMPERATURE_CHECK_BASE: u8 = 206;

/// A catalog entry resolved against the suffix table.
///
/// # Examples
///
/// ```
/// use intex_spa::command::{Command, CommandTemplate};
/// use intex_spa::response::CommandDefinition;
/// use intex_spa::types::TargetTemperature;
///
/// let definition = CommandDefinition::new("PowerOnOff", "8888060F014000");
/// let template = CommandTemplate::from_definition(&definition).unwrap();
/// assert_eq!(template.render(&Command::PowerOnOff).unwrap(), "8888060F01400098");
///
/// let definition = CommandDefinition::new("TempSet", "8888050F0C");
/// let template = CommandTemplate::from_definition(&definition).unwrap();
/// let cmd = Command::TempSet(TargetTemperature::new(25).unwrap());
/// assert_eq!(template.render(&cmd).unwrap(), "8888050F0C19B5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    name: CommandName,
    prefix: String,
    suffix: PayloadSuffix,
}

impl CommandTemplate {
    /// Resolves a catalog entry.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::UnsupportedCommand` if the entry's name has no
    /// suffix table entry.
    pub fn from_definition(definition: &CommandDefinition) -> Result<Self, CommandError> {
        let name: CommandName = definition.command_name.parse()?;
        let suffix = suffix_for(name)
            .ok_or_else(|| CommandError::UnsupportedCommand(name.to_string()))?;

        Ok(Self {
            name,
            prefix: definition.command_data.clone(),
            suffix,
        })
    }

    /// Returns the command name.
    #[must_use]
    pub fn name(&self) -> CommandName {
        self.name
    }

    /// Returns the catalog payload prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the payload suffix.
    #[must_use]
    pub fn suffix(&self) -> PayloadSuffix {
        self.suffix
    }

    /// Builds the complete payload for `command`.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::MissingTargetTemperature` if the template needs
    /// a target temperature and `command` carries none.
    pub fn render(&self, command: &Command) -> Result<String, CommandError> {
        let mut payload = self.prefix.clone();
        match self.suffix {
            PayloadSuffix::Fixed(suffix) => payload.push_str(suffix),
            PayloadSuffix::TargetTemperature => {
                let target = command
                    .target_temperature()
                    .ok_or(CommandError::MissingTargetTemperature)?;
                push_target_temperature(&mut payload, target);
            }
        }
        Ok(payload)
    }
}

/// Looks up the suffix of `name` in [`SUFFIX_TABLE`].
#[must_use]
pub fn suffix_for(name: CommandName) -> Option<PayloadSuffix> {
    SUFFIX_TABLE
        .iter()
        .find(|(entry, _)| *entry == name)
        .map(|(_, suffix)| *suffix)
}

fn push_target_temperature(payload: &mut String, target: TargetTemperature) {
    let value = target.value();
    hex::push_byte(payload, value);
    hex::push_byte(payload, TEMPERATURE_CHECK_BASE - value);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(name: &str, prefix: &str) -> CommandTemplate {
        CommandTemplate::from_definition(&CommandDefinition::new(name, prefix)).unwrap()
    }

    #[test]
    fn every_command_has_a_suffix() {
        for name in CommandName::ALL {
            let suffix = suffix_for(name).unwrap();
            match suffix {
                PayloadSuffix::Fixed(hex) => {
                    assert_ne!(name, CommandName::TempSet);
                    assert_eq!(hex.len(), 2);
                }
                PayloadSuffix::TargetTemperature => assert_eq!(name, CommandName::TempSet),
            }
        }
    }

    #[test]
    fn fixed_suffixes() {
        let cases = [
            ("PowerOnOff", "8888060F014000", Command::PowerOnOff, "8888060F01400098"),
            ("JetOnOff", "8888060F011000", Command::JetOnOff, "8888060F011000C8"),
            ("BubbleOnOff", "8888060F010400", Command::BubbleOnOff, "8888060F010400D4"),
            ("HeatOnOff", "8888060F010010", Command::HeatOnOff, "8888060F010010C8"),
            ("FilterOnOff", "8888060F010004", Command::FilterOnOff, "8888060F010004D4"),
            ("SanitizerOnOff", "8888060F010001", Command::SanitizerOnOff, "8888060F010001D7"),
            ("Refresh", "8888060FEE0F01", Command::Refresh, "8888060FEE0F01DA"),
        ];
        for (name, prefix, command, expected) in cases {
            assert_eq!(template(name, prefix).render(&command).unwrap(), expected);
        }
    }

    #[test]
    fn temp_set_bytes() {
        let tpl = template("TempSet", "8888050F0C");
        let render = |celsius| {
            tpl.render(&Command::TempSet(TargetTemperature::new(celsius).unwrap()))
                .unwrap()
        };
        assert_eq!(render(25), "8888050F0C19B5");
        assert_eq!(render(10), "8888050F0C0AC4");
        assert_eq!(render(40), "8888050F0C28A6");
    }

    #[test]
    fn temp_set_without_target() {
        let tpl = template("TempSet", "8888050F0C");
        assert!(matches!(
            tpl.render(&Command::Refresh),
            Err(CommandError::MissingTargetTemperature)
        ));
    }

    #[test]
    fn unsupported_catalog_entry() {
        let definition = CommandDefinition::new("LightOnOff", "8888060F010002");
        assert!(matches!(
            CommandTemplate::from_definition(&definition),
            Err(CommandError::UnsupportedCommand(ref name)) if name == "LightOnOff"
        ));
    }

    #[test]
    fn template_accessors() {
        let tpl = template("Refresh", "8888060FEE0F01");
        assert_eq!(tpl.name(), CommandName::Refresh);
        assert_eq!(tpl.prefix(), "8888060FEE0F01");
        assert_eq!(tpl.suffix(), PayloadSuffix::Fixed("DA"));
    }
}
