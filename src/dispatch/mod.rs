// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command dispatch and confirmation.
//!
//! Submitting a command only queues it on the device link; whether the spa
//! executed it has to be polled. One [`CommandDispatcher::execute`] call
//! walks through four stages:
//!
//! 1. **Resolving** - find the command in the device catalog and build its
//!    payload from the catalog prefix and the suffix table.
//! 2. **Submitted** - send the payload; anything but a `Sended`
//!    acknowledgement fails without retry.
//! 3. **Polling** - poll the feedback endpoint under the [`RetryPolicy`].
//!    Transient transport errors (network, HTTP status) are retried. An
//!    unreadable answer or a non-ok result ends the dispatch at once.
//! 4. **Confirmed** - decode the returned status payload.
//!
//! Dispatches are independent: no state is kept between calls and nothing
//! serializes two commands sent to the same spa.

mod retry;

pub use retry::RetryPolicy;

use std::sync::Arc;

use chrono::Utc;

use crate::command::{Command, CommandTemplate};
use crate::error::{CommandError, Error, ParseError};
use crate::protocol::DeviceTransport;
use crate::response::{CommandSubmission, Feedback};
use crate::status::DeviceStatus;

/// Correlation state of one in-flight command.
#[derive(Debug)]
struct CommandSession<'a> {
    device_id: &'a str,
    session_id: String,
}

/// Executes commands through a [`DeviceTransport`].
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use intex_spa::command::Command;
/// use intex_spa::dispatch::CommandDispatcher;
/// use intex_spa::protocol::CloudConfig;
///
/// # async fn example() -> intex_spa::Result<()> {
/// let transport = CloudConfig::new("jane@example.com", "secret").into_transport()?;
/// let dispatcher = CommandDispatcher::new(Arc::new(transport));
///
/// let status = dispatcher.execute("4a2c9f1e", &Command::Refresh).await?;
/// println!("{:?}", status.record().current_temperature());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CommandDispatcher<T> {
    transport: Arc<T>,
    policy: RetryPolicy,
}

impl<T> Clone for CommandDispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            policy: self.policy,
        }
    }
}

impl<T: DeviceTransport> CommandDispatcher<T> {
    /// Creates a dispatcher with the default retry policy (5 attempts, 2 s apart).
    #[must_use]
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            policy: RetryPolicy::default(),
        }
    }

    /// Sets the feedback retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the feedback retry policy.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Executes `command` on a device and waits for its confirmation.
    ///
    /// # Errors
    ///
    /// - `CommandError::UnknownCommand` if the device catalog lacks the command
    /// - `CommandError::UnsupportedCommand` if the command has no payload suffix
    /// - `CommandError::SubmitRejected` if the submission is not acknowledged
    /// - `CommandError::CommandFailed` if the device reports a non-ok result
    /// - `CommandError::FeedbackTimeout` if every poll attempt fails
    /// - `ParseError` if the confirmed status cannot be decoded
    /// - `ProtocolError` if fetching the catalog or submitting fails, or if
    ///   polling fails with an error that is not transient
    pub async fn execute(&self, device_id: &str, command: &Command) -> Result<DeviceStatus, Error> {
        let template = self.resolve(device_id, command).await?;
        let payload = template.render(command)?;
        let session = self.submit(device_id, command, payload).await?;
        self.poll(&session, command).await
    }

    /// Looks up `command` in the device catalog.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::UnknownCommand` or
    /// `CommandError::UnsupportedCommand` if the command cannot be resolved,
    /// or `ProtocolError` if the catalog cannot be fetched.
    pub async fn resolve(
        &self,
        device_id: &str,
        command: &Command,
    ) -> Result<CommandTemplate, Error> {
        let name = command.name();
        let catalog = self.transport.command_catalog(device_id).await?;
        let definition = catalog
            .iter()
            .find(|definition| definition.command_name == name.as_str())
            .ok_or_else(|| CommandError::UnknownCommand {
                name: name.to_string(),
                device_id: device_id.to_string(),
            })?;

        Ok(CommandTemplate::from_definition(definition)?)
    }

    async fn submit<'a>(
        &self,
        device_id: &'a str,
        command: &Command,
        payload: String,
    ) -> Result<CommandSession<'a>, Error> {
        let submission = CommandSubmission::new(Utc::now().timestamp_millis().to_string(), payload);

        tracing::debug!(
            device_id = %device_id,
            command = %command.name(),
            sid = %submission.sid,
            data = %submission.data,
            "Submitting command"
        );

        let status = self.transport.submit_command(device_id, &submission).await?;
        if !status.is_sended() {
            return Err(CommandError::SubmitRejected {
                command: command.name(),
                status: status.c2d_command_status.unwrap_or_default(),
            }
            .into());
        }

        let session_id = status
            .session_id
            .ok_or_else(|| ParseError::MissingField("sessionId".to_string()))?;

        Ok(CommandSession {
            device_id,
            session_id,
        })
    }

    async fn poll(
        &self,
        session: &CommandSession<'_>,
        command: &Command,
    ) -> Result<DeviceStatus, Error> {
        let mut attempt = 1;
        loop {
            tracing::debug!(
                device_id = %session.device_id,
                session_id = %session.session_id,
                attempt,
                "Polling command feedback"
            );

            match self
                .transport
                .poll_feedback(session.device_id, &session.session_id)
                .await
            {
                Ok(feedback) => return confirm(session, command, feedback),
                Err(error) if !error.is_transient() => return Err(error.into()),
                Err(error) if attempt >= self.policy.max_attempts() => {
                    return Err(CommandError::FeedbackTimeout {
                        command: command.name(),
                        attempts: attempt,
                        last_error: error,
                    }
                    .into());
                }
                Err(error) => {
                    tracing::warn!(
                        device_id = %session.device_id,
                        command = %command.name(),
                        attempt,
                        error = %error,
                        "Feedback not available yet"
                    );
                    tokio::time::sleep(self.policy.delay()).await;
                    attempt += 1;
                }
            }
        }
    }
}

fn confirm(
    session: &CommandSession<'_>,
    command: &Command,
    feedback: Feedback,
) -> Result<DeviceStatus, Error> {
    if !feedback.is_ok() {
        return Err(CommandError::CommandFailed {
            command: command.name(),
            result: feedback.result,
        }
        .into());
    }

    let status = DeviceStatus::from_feedback(feedback)?;
    tracing::info!(
        device_id = %session.device_id,
        command = %command.name(),
        "Command confirmed"
    );
    Ok(status)
}
