// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command submission request and acknowledgement.

use serde::{Deserialize, Serialize};

/// Acknowledgement status meaning the command was queued for the device.
pub const STATUS_SENDED: &str = "Sended";

/// Body of a command submission.
///
/// # Examples
///
/// ```
/// use intex_spa::response::CommandSubmission;
///
/// let body = CommandSubmission::new("1700000000000", "8888060F01400098");
/// let json = serde_json::to_value(&body).unwrap();
/// assert_eq!(json["type"], "1");
/// assert_eq!(json["data"], "8888060F01400098");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSubmission {
    /// Session tag chosen by the client.
    pub sid: String,
    /// Type marker, always `"1"` for device commands.
    #[serde(rename = "type")]
    pub kind: String,
    /// Complete hex payload.
    pub data: String,
}

impl CommandSubmission {
    /// Type marker used for device commands.
    pub const COMMAND_TYPE: &'static str = "1";

    /// Creates a submission for a device command.
    #[must_use]
    pub fn new(sid: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            sid: sid.into(),
            kind: Self::COMMAND_TYPE.to_string(),
            data: data.into(),
        }
    }
}

/// Acknowledgement returned by the submit endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandStatus {
    /// Submission status; `Sended` on success.
    #[serde(default, rename = "c2DCommandStatus")]
    pub c2d_command_status: Option<String>,
    /// Device the command was queued for.
    #[serde(default)]
    pub device_id: Option<String>,
    /// Data type of the queued message.
    #[serde(default)]
    pub iot_data_type: Option<String>,
    /// Session to poll for feedback.
    #[serde(default)]
    pub session_id: Option<String>,
}

impl CommandStatus {
    /// Returns whether the cloud queued the command.
    #[must_use]
    pub fn is_sended(&self) -> bool {
        self.c2d_command_status.as_deref() == Some(STATUS_SENDED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sended_status() {
        let json = r#"{
            "c2DCommandStatus": "Sended",
            "deviceId": "d-1",
            "iotDataType": "C2DCommand",
            "sessionId": "s-42"
        }"#;
        let status: CommandStatus = serde_json::from_str(json).unwrap();
        assert!(status.is_sended());
        assert_eq!(status.session_id.as_deref(), Some("s-42"));
    }

    #[test]
    fn other_status_is_not_sended() {
        let status: CommandStatus =
            serde_json::from_str(r#"{"c2DCommandStatus":"Failed"}"#).unwrap();
        assert!(!status.is_sended());

        let status: CommandStatus = serde_json::from_str("{}").unwrap();
        assert!(!status.is_sended());
    }
}
