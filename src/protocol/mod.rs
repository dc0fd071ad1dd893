// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport to the Intex cloud.
//!
//! [`DeviceTransport`] is the seam between the command protocol and the
//! vendor API. [`HttpTransport`] implements it over HTTPS with a cached
//! bearer token; tests substitute an in-memory implementation.

#[cfg(feature = "http")]
mod auth;
#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use auth::TokenCache;
#[cfg(feature = "http")]
pub use http::{CloudConfig, HttpTransport};

use crate::error::ProtocolError;
use crate::response::{CommandDefinition, CommandStatus, CommandSubmission, DeviceInfo, Feedback};

/// Authenticated access to the cloud endpoints used by this library.
///
/// Every call is expected to be authenticated by the implementation; the
/// callers never handle tokens.
#[allow(async_fn_in_trait)]
pub trait DeviceTransport {
    /// Lists the spas registered with the account.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails.
    async fn devices(&self) -> Result<Vec<DeviceInfo>, ProtocolError>;

    /// Fetches the command catalog of a device.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails.
    async fn command_catalog(
        &self,
        device_id: &str,
    ) -> Result<Vec<CommandDefinition>, ProtocolError>;

    /// Submits a command for asynchronous execution.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails.
    async fn submit_command(
        &self,
        device_id: &str,
        submission: &CommandSubmission,
    ) -> Result<CommandStatus, ProtocolError>;

    /// Polls the feedback of a submitted command.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails, including when the
    /// feedback is not available yet.
    async fn poll_feedback(
        &self,
        device_id: &str,
        session_id: &str,
    ) -> Result<Feedback, ProtocolError>;

    /// Fetches the last status the cloud received, without asking the spa.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails.
    async fn latest_status(&self, device_id: &str) -> Result<Feedback, ProtocolError>;
}
