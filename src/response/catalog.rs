// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command catalog entries.

use serde::Deserialize;

/// One entry of a device's command catalog.
///
/// `command_data` is the opaque hex prefix of the command payload; the
/// dispatcher appends the per-command suffix before submitting it.
///
/// # Examples
///
/// ```
/// use intex_spa::response::CommandDefinition;
///
/// let json = r#"{
///     "id": 3,
///     "commandSetTypeId": 1,
///     "commandName": "JetOnOff",
///     "commandData": "8888060F011000"
/// }"#;
/// let definition: CommandDefinition = serde_json::from_str(json).unwrap();
/// assert_eq!(definition.command_name, "JetOnOff");
/// assert_eq!(definition.command_data, "8888060F011000");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandDefinition {
    /// Catalog entry identifier.
    #[serde(default)]
    pub id: Option<i64>,
    /// Command set type identifier.
    #[serde(default)]
    pub command_set_type_id: Option<i64>,
    /// Command set version.
    #[serde(default)]
    pub current_version: Option<String>,
    /// Command set type name.
    #[serde(default)]
    pub command_set_type: Option<String>,
    /// Command name, e.g. `PowerOnOff`.
    #[serde(default)]
    pub command_name: String,
    /// Hex payload prefix.
    #[serde(default)]
    pub command_data: String,
}

impl CommandDefinition {
    /// Creates a catalog entry with only a name and payload prefix.
    #[must_use]
    pub fn new(command_name: impl Into<String>, command_data: impl Into<String>) -> Self {
        Self {
            command_name: command_name.into(),
            command_data: command_data.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_catalog_list() {
        let json = r#"[
            {"commandName":"PowerOnOff","commandData":"8888060F014000"},
            {"commandName":"TempSet","commandData":"8888050F0C","currentVersion":"1"}
        ]"#;
        let catalog: Vec<CommandDefinition> = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[1], CommandDefinition {
            current_version: Some("1".to_string()),
            ..CommandDefinition::new("TempSet", "8888050F0C")
        });
    }
}
