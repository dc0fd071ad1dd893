// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Feedback envelope of the feedback and latest-status endpoints.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Result value reported for a successful command.
pub const RESULT_OK: &str = "ok";

/// Raw feedback as returned by the cloud.
///
/// `data` is the hex status payload; see [`crate::status::decode`]. The
/// bookkeeping fields `sid`, `type` and `result` are read leniently: the
/// cloud sends them as numbers or strings depending on the endpoint, and a
/// value of another shape is treated as absent.
///
/// # Examples
///
/// ```
/// use intex_spa::response::Feedback;
///
/// let json = r#"{"sid":1700000000000,"type":"1","result":"ok","data":"FFFF"}"#;
/// let feedback: Feedback = serde_json::from_str(json).unwrap();
/// assert_eq!(feedback.sid.as_deref(), Some("1700000000000"));
/// assert_eq!(feedback.kind, Some(1));
/// assert!(feedback.is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Feedback {
    /// Session tag of the command this feedback belongs to.
    #[serde(default, deserialize_with = "loose_string")]
    pub sid: Option<String>,
    /// Message type.
    #[serde(default, rename = "type", deserialize_with = "loose_integer")]
    pub kind: Option<i64>,
    /// Execution result, `"ok"` on success.
    #[serde(default, deserialize_with = "loose_text")]
    pub result: String,
    /// Hex status payload.
    #[serde(default)]
    pub data: Option<String>,
}

impl Feedback {
    /// Returns whether the command succeeded.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result == RESULT_OK
    }
}

fn loose_integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn loose_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn loose_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(loose_string(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ok_feedback() {
        let json = r#"{"sid":"1700000000000","type":1,"result":"ok","data":"FFFF110F010600260000000080800026"}"#;
        let feedback: Feedback = serde_json::from_str(json).unwrap();
        assert!(feedback.is_ok());
        assert_eq!(feedback.kind, Some(1));
        assert_eq!(feedback.data.as_deref(), Some("FFFF110F010600260000000080800026"));
    }

    #[test]
    fn type_sent_as_string() {
        let json = r#"{"sid":"1","type":"1","result":"ok","data":"FFFF110F010600260000000080800026"}"#;
        let feedback: Feedback = serde_json::from_str(json).unwrap();
        assert!(feedback.is_ok());
        assert_eq!(feedback.kind, Some(1));
        assert_eq!(feedback.sid.as_deref(), Some("1"));
    }

    #[test]
    fn odd_bookkeeping_fields_are_dropped() {
        let json = r#"{"sid":null,"type":{"code":3},"result":"ok","data":"FFFF"}"#;
        let feedback: Feedback = serde_json::from_str(json).unwrap();
        assert!(feedback.is_ok());
        assert_eq!(feedback.sid, None);
        assert_eq!(feedback.kind, None);

        let feedback: Feedback = serde_json::from_str(r#"{"type":"status","result":null}"#).unwrap();
        assert_eq!(feedback.kind, None);
        assert!(!feedback.is_ok());
    }

    #[test]
    fn missing_result_is_not_ok() {
        let feedback: Feedback = serde_json::from_str(r#"{"sid":"1"}"#).unwrap();
        assert!(!feedback.is_ok());
        assert!(feedback.data.is_none());
    }
}
