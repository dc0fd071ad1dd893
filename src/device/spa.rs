// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-spa handle.

use crate::command::{Command, Feature};
use crate::dispatch::CommandDispatcher;
use crate::error::{CommandError, Error};
use crate::protocol::DeviceTransport;
use crate::response::{CommandDefinition, DeviceInfo};
use crate::status::DeviceStatus;
use crate::types::{Celsius, TargetTemperature};

/// A spa registered with the account.
///
/// Every toggle returns the status confirmed by the cloud after the command
/// was executed.
#[derive(Debug)]
pub struct Spa<T> {
    device: DeviceInfo,
    dispatcher: CommandDispatcher<T>,
}

impl<T: DeviceTransport> Spa<T> {
    pub(crate) fn new(device: DeviceInfo, dispatcher: CommandDispatcher<T>) -> Self {
        Self { device, dispatcher }
    }

    /// Returns the device listing entry.
    #[must_use]
    pub fn device(&self) -> &DeviceInfo {
        &self.device
    }

    /// Returns the cloud device id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.device.device_id
    }

    /// Fetches the commands this spa supports.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn command_catalog(&self) -> Result<Vec<CommandDefinition>, Error> {
        Ok(self.dispatcher.transport().command_catalog(self.id()).await?)
    }

    /// Executes a command and waits for its confirmation.
    ///
    /// # Errors
    ///
    /// See [`CommandDispatcher::execute`].
    pub async fn execute(&self, command: &Command) -> Result<DeviceStatus, Error> {
        self.dispatcher.execute(self.id(), command).await
    }

    // ========== Status ==========

    /// Returns the last status the cloud received, without asking the spa.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the payload cannot be decoded.
    pub async fn latest_status(&self) -> Result<DeviceStatus, Error> {
        let feedback = self.dispatcher.transport().latest_status(self.id()).await?;
        Ok(DeviceStatus::from_feedback(feedback)?)
    }

    /// Asks the spa for its current status.
    ///
    /// # Errors
    ///
    /// Returns error if the refresh command fails.
    pub async fn refresh_status(&self) -> Result<DeviceStatus, Error> {
        self.execute(&Command::Refresh).await
    }

    // ========== Toggles ==========

    /// Toggles the spa power.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn toggle_power(&self) -> Result<DeviceStatus, Error> {
        self.execute(&Command::PowerOnOff).await
    }

    /// Toggles the massage jets.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn toggle_jet(&self) -> Result<DeviceStatus, Error> {
        self.execute(&Command::JetOnOff).await
    }

    /// Toggles the bubbles.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn toggle_bubble(&self) -> Result<DeviceStatus, Error> {
        self.execute(&Command::BubbleOnOff).await
    }

    /// Toggles the heater.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn toggle_heat(&self) -> Result<DeviceStatus, Error> {
        self.execute(&Command::HeatOnOff).await
    }

    /// Toggles the filter pump.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn toggle_filter(&self) -> Result<DeviceStatus, Error> {
        self.execute(&Command::FilterOnOff).await
    }

    /// Toggles the sanitizer.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn toggle_sanitizer(&self) -> Result<DeviceStatus, Error> {
        self.execute(&Command::SanitizerOnOff).await
    }

    // ========== Targets ==========

    /// Switches a feature on or off.
    ///
    /// The spa only knows toggles, so the current state is refreshed first
    /// and the toggle is sent only if the feature is not already in the
    /// requested state. A spa reporting an error has no known state and is
    /// always toggled.
    ///
    /// # Errors
    ///
    /// Returns error if the refresh or the toggle fails.
    pub async fn set_feature(&self, feature: Feature, on: bool) -> Result<DeviceStatus, Error> {
        let current = self.refresh_status().await?;
        if feature.is_running(current.record()) == Some(on) {
            tracing::debug!(device_id = %self.id(), feature = %feature, on, "Feature already in requested state");
            return Ok(current);
        }
        self.execute(&feature.toggle_command()).await
    }

    /// Sets the target water temperature.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::TargetTemperatureNotApplied` if the confirmed
    /// status reports another target, or another error if the command fails.
    pub async fn set_target_temperature(
        &self,
        target: TargetTemperature,
    ) -> Result<DeviceStatus, Error> {
        let status = self.execute(&Command::TempSet(target)).await?;
        let reported = status.record().target_temperature();
        if reported != Some(Celsius::from(target)) {
            return Err(CommandError::TargetTemperatureNotApplied {
                requested: i16::from(target.value()),
                reported: reported.map(|celsius| celsius.value()),
            }
            .into());
        }
        Ok(status)
    }
}
