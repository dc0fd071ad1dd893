// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Feedback envelope with its decoded status record.

use crate::error::ParseError;
use crate::response::Feedback;
use crate::status::{StatusRecord, decode};

/// Status reported by the cloud, decoded when constructed.
///
/// # Examples
///
/// ```
/// use intex_spa::response::Feedback;
/// use intex_spa::status::DeviceStatus;
///
/// let feedback = Feedback {
///     sid: Some("1700000000000".to_string()),
///     kind: Some(1),
///     result: "ok".to_string(),
///     data: Some("FFFF110F010600260000000080800026".to_string()),
/// };
/// let status = DeviceStatus::from_feedback(feedback).unwrap();
/// assert_eq!(status.result(), "ok");
/// assert_eq!(status.record().current_temperature().unwrap().value(), 38);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceStatus {
    sid: Option<String>,
    kind: Option<i64>,
    result: String,
    raw: String,
    record: StatusRecord,
}

impl DeviceStatus {
    /// Decodes the payload carried by `feedback`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` if the feedback has no payload, or
    /// `ParseError::MalformedPayload` if the payload cannot be decoded.
    pub fn from_feedback(feedback: Feedback) -> Result<Self, ParseError> {
        let raw = feedback
            .data
            .ok_or_else(|| ParseError::MissingField("data".to_string()))?;
        let record = decode(&raw)?;

        Ok(Self {
            sid: feedback.sid,
            kind: feedback.kind,
            result: feedback.result,
            raw,
            record,
        })
    }

    /// Returns the session tag of the command that produced this status.
    #[must_use]
    pub fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    /// Returns the message type.
    #[must_use]
    pub fn kind(&self) -> Option<i64> {
        self.kind
    }

    /// Returns the result reported by the cloud.
    #[must_use]
    pub fn result(&self) -> &str {
        &self.result
    }

    /// Returns the raw hex payload.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the decoded status record.
    #[must_use]
    pub fn record(&self) -> &StatusRecord {
        &self.record
    }

    /// Consumes the status and returns the decoded record.
    #[must_use]
    pub fn into_record(self) -> StatusRecord {
        self.record
    }
}
