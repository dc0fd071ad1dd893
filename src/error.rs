// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `intex_spa` library.
//!
//! This module provides the error hierarchy for the library: value
//! validation, cloud API communication, payload parsing, and the command
//! dispatch protocol.

use thiserror::Error;

use crate::command::CommandName;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the cloud API.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response or status payload.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A command could not be resolved, submitted or confirmed.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// No device registered with the account matches the lookup.
    #[error("device not found: {0}")]
    DeviceNotFound(String),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: i16,
        /// Maximum allowed value.
        max: i16,
        /// The actual value that was provided.
        actual: i16,
    },
}

/// Errors related to communication with the cloud API.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The API answered with a body that does not match the expected shape.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Authentication failed or the token was rejected.
    #[error("authentication failed")]
    AuthenticationFailed,
}

impl ProtocolError {
    /// Returns whether repeating the same request may succeed.
    ///
    /// Network failures and non-success HTTP statuses are transient. A body
    /// that cannot be read, a bad address or rejected credentials fail the
    /// same way every time.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        !matches!(
            self,
            Self::UnexpectedResponse(_) | Self::InvalidAddress(_) | Self::AuthenticationFailed
        )
    }
}

/// Errors related to parsing cloud responses and status payloads.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// The hex status payload cannot be decoded.
    #[error("malformed status payload: {0}")]
    MalformedPayload(#[from] PayloadDefect),
}

/// What is wrong with a hex status payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayloadDefect {
    /// The payload is shorter than the fixed record layout.
    #[error("expected at least {required} hex characters, got {actual}")]
    TooShort {
        /// Minimum number of hex characters.
        required: usize,
        /// Number of characters present.
        actual: usize,
    },

    /// A character read by the decoder is not a hex digit.
    #[error("non-hex character at position {position}")]
    InvalidHex {
        /// Character offset within the payload.
        position: usize,
    },
}

/// Errors raised by the command dispatch protocol.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The device catalog has no entry for the requested command.
    #[error("command {name} not found in the catalog of device {device_id}")]
    UnknownCommand {
        /// The requested command name.
        name: String,
        /// The device whose catalog was searched.
        device_id: String,
    },

    /// The command has no entry in the payload suffix table.
    #[error("no payload suffix known for command {0}")]
    UnsupportedCommand(String),

    /// `TempSet` was resolved without a target temperature.
    #[error("command TempSet requires a target temperature")]
    MissingTargetTemperature,

    /// The cloud did not accept the submission.
    #[error("command {command} was rejected on submit with status {status:?}")]
    SubmitRejected {
        /// The submitted command.
        command: CommandName,
        /// The acknowledgement status returned instead of `Sended`.
        status: String,
    },

    /// The device reported a non-ok result for the command.
    #[error("command {command} failed: {result:?}")]
    CommandFailed {
        /// The submitted command.
        command: CommandName,
        /// The result reported by the feedback endpoint.
        result: String,
    },

    /// No feedback was received within the retry budget.
    #[error("no feedback for command {command} after {attempts} attempts: {last_error}")]
    FeedbackTimeout {
        /// The submitted command.
        command: CommandName,
        /// Number of poll attempts made.
        attempts: u32,
        /// The transport error of the last attempt.
        #[source]
        last_error: ProtocolError,
    },

    /// The confirmed status reports another target temperature than requested.
    #[error("target temperature {requested} was not applied, device reports {reported:?}")]
    TargetTemperatureNotApplied {
        /// The requested target in degrees Celsius.
        requested: i16,
        /// The target reported after confirmation, if any.
        reported: Option<i16>,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
