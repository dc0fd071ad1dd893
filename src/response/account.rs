// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Account and device listing responses.

use serde::Deserialize;

/// Response of the authentication endpoint.
///
/// Only `token` is required by this library; the other fields are kept for
/// callers that want to show account details.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Account identifier.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Account name.
    #[serde(default)]
    pub user_name: Option<String>,
    /// Registered email address.
    #[serde(default)]
    pub email_address: Option<String>,
    /// Registered phone number.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Bearer token for subsequent calls.
    #[serde(default)]
    pub token: Option<String>,
    /// Refresh token. The cloud accepts a fresh login instead, which is what
    /// this library does.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// A spa registered with the account.
///
/// # Examples
///
/// ```
/// use intex_spa::response::DeviceInfo;
///
/// let json = r#"{
///     "deviceId": "4a2c9f1e",
///     "deviceAliasName": "Garden Spa",
///     "deviceTypeName": "SPA",
///     "onlineState": true
/// }"#;
/// let device: DeviceInfo = serde_json::from_str(json).unwrap();
/// assert_eq!(device.device_id, "4a2c9f1e");
/// assert_eq!(device.alias_name(), Some("Garden Spa"));
/// assert!(device.is_online());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    /// Cloud device identifier (GUID), used in every device endpoint.
    pub device_id: String,
    /// Owning account.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Role of the account for this device.
    #[serde(default)]
    pub user_device_role_id: Option<i64>,
    /// Name given to the device in the app.
    #[serde(default)]
    pub device_alias_name: Option<String>,
    /// Role name of the account for this device.
    #[serde(default)]
    pub user_device_role: Option<String>,
    /// Hardware identifier.
    #[serde(default)]
    pub device_identifier: Option<String>,
    /// Whether remote control is enabled.
    #[serde(default, rename = "remoteControll")]
    pub remote_control: Option<bool>,
    /// Device sub type identifier.
    #[serde(default)]
    pub sub_device_type_id: Option<i64>,
    /// Device type identifier.
    #[serde(default)]
    pub device_type_id: Option<i64>,
    /// Device type name.
    #[serde(default)]
    pub device_type_name: Option<String>,
    /// Device sub type name.
    #[serde(default)]
    pub sub_type_name: Option<String>,
    /// Command set type identifier.
    #[serde(default)]
    pub command_set_type_id: Option<i64>,
    /// Installed firmware version.
    #[serde(default)]
    pub current_firmware_version: Option<String>,
    /// Whether a newer firmware is available.
    #[serde(default)]
    pub has_latest_firmware_version: Option<bool>,
    /// Local IP address.
    #[serde(default)]
    pub ip_address: Option<String>,
    /// Wi-Fi network name.
    #[serde(default)]
    pub ssid: Option<String>,
    /// Local port.
    #[serde(default)]
    pub port: Option<String>,
    /// Offline flag reported by the cloud.
    #[serde(default)]
    pub offline_state: Option<bool>,
    /// Online flag reported by the cloud.
    #[serde(default)]
    pub online_state: Option<bool>,
}

impl DeviceInfo {
    /// Returns the alias name, if set.
    #[must_use]
    pub fn alias_name(&self) -> Option<&str> {
        self.device_alias_name.as_deref()
    }

    /// Returns whether the cloud reports the device as online.
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.online_state.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_user() {
        let json = r#"{"userId":"u-1","userName":"jane","token":"abc","refreshToken":"def"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.token.as_deref(), Some("abc"));
        assert_eq!(user.user_name.as_deref(), Some("jane"));
        assert!(user.email_address.is_none());
    }

    #[test]
    fn parse_device_with_vendor_spelling() {
        let json = r#"{
            "deviceId": "d-1",
            "remoteControll": true,
            "currentFirmwareVersion": "1.2.3",
            "offlineState": false
        }"#;
        let device: DeviceInfo = serde_json::from_str(json).unwrap();
        assert_eq!(device.remote_control, Some(true));
        assert_eq!(device.current_firmware_version.as_deref(), Some("1.2.3"));
        assert!(!device.is_online());
        assert!(device.alias_name().is_none());
    }

    #[test]
    fn device_requires_id() {
        let result: Result<DeviceInfo, _> = serde_json::from_str(r#"{"deviceAliasName":"Spa"}"#);
        assert!(result.is_err());
    }
}
