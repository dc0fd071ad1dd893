// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level account and spa API.
//!
//! [`IntexCloud`] represents the account: it lists the registered spas and
//! hands out a [`Spa`] handle per device. The handle wraps the command
//! dispatcher with one method per spa operation.
//!
//! ```no_run
//! use intex_spa::IntexCloud;
//! use intex_spa::command::Feature;
//! use intex_spa::protocol::CloudConfig;
//! use intex_spa::types::TargetTemperature;
//!
//! # async fn example() -> intex_spa::Result<()> {
//! let cloud = IntexCloud::http(CloudConfig::new("jane@example.com", "secret"))?;
//! let spa = cloud.spa_by_name("Garden Spa").await?;
//!
//! let status = spa.refresh_status().await?;
//! println!("water at {:?}", status.record().current_temperature());
//!
//! spa.set_feature(Feature::Heat, true).await?;
//! spa.set_target_temperature(TargetTemperature::new(38)?).await?;
//! # Ok(())
//! # }
//! ```

mod spa;

pub use spa::Spa;

use std::sync::Arc;

use crate::dispatch::{CommandDispatcher, RetryPolicy};
use crate::error::Error;
#[cfg(feature = "http")]
use crate::protocol::{CloudConfig, HttpTransport};
use crate::protocol::DeviceTransport;
use crate::response::{CommandDefinition, DeviceInfo};

/// An Intex cloud account.
#[derive(Debug)]
pub struct IntexCloud<T> {
    dispatcher: CommandDispatcher<T>,
}

#[cfg(feature = "http")]
impl IntexCloud<HttpTransport> {
    /// Creates an account client over HTTPS.
    ///
    /// No request is made until the first call.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP transport cannot be created.
    pub fn http(config: CloudConfig) -> Result<Self, Error> {
        let transport = config.into_transport()?;
        Ok(Self::new(transport))
    }
}

impl<T: DeviceTransport> IntexCloud<T> {
    /// Creates an account client over any transport.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            dispatcher: CommandDispatcher::new(Arc::new(transport)),
        }
    }

    /// Sets the feedback retry policy used by every spa handle.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.dispatcher = self.dispatcher.with_retry_policy(policy);
        self
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        self.dispatcher.transport()
    }

    /// Lists the spas registered with the account.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn devices(&self) -> Result<Vec<DeviceInfo>, Error> {
        Ok(self.transport().devices().await?)
    }

    /// Finds a spa by its cloud device id.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` if no spa has this id.
    pub async fn device_by_id(&self, device_id: &str) -> Result<DeviceInfo, Error> {
        self.devices()
            .await?
            .into_iter()
            .find(|device| device.device_id == device_id)
            .ok_or_else(|| Error::DeviceNotFound(device_id.to_string()))
    }

    /// Finds a spa by the alias name given in the app.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` if no spa has this name.
    pub async fn device_by_name(&self, name: &str) -> Result<DeviceInfo, Error> {
        self.devices()
            .await?
            .into_iter()
            .find(|device| device.alias_name() == Some(name))
            .ok_or_else(|| Error::DeviceNotFound(name.to_string()))
    }

    /// Fetches the commands a spa supports.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn command_catalog(&self, device_id: &str) -> Result<Vec<CommandDefinition>, Error> {
        Ok(self.transport().command_catalog(device_id).await?)
    }

    /// Returns a handle for a spa found by alias name.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` if no spa has this name.
    pub async fn spa_by_name(&self, name: &str) -> Result<Spa<T>, Error> {
        let device = self.device_by_name(name).await?;
        Ok(self.spa(device))
    }

    /// Returns a handle for a listed spa.
    #[must_use]
    pub fn spa(&self, device: DeviceInfo) -> Spa<T> {
        Spa::new(device, self.dispatcher.clone())
    }
}
