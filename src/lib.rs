// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `intex_spa` - A Rust library to control Intex PureSpa devices.
//!
//! The spas are reachable only through the Intex cloud. This library logs in
//! to the cloud API, lists the registered spas, decodes their binary status
//! record and executes commands, waiting until the cloud confirms them.
//!
//! # Supported Features
//!
//! - **Status**: water and target temperature, running and online state of
//!   filter, heater, jets, bubbles and sanitizer, error codes
//! - **Toggles**: power, jets, bubbles, heater, filter, sanitizer
//! - **Target temperature**: 10-40 °C
//!
//! # Quick Start
//!
//! ```no_run
//! use intex_spa::IntexCloud;
//! use intex_spa::protocol::CloudConfig;
//!
//! #[tokio::main]
//! async fn main() -> intex_spa::Result<()> {
//!     let cloud = IntexCloud::http(CloudConfig::new("jane@example.com", "secret"))?;
//!
//!     for device in cloud.devices().await? {
//!         let spa = cloud.spa(device);
//!         let status = spa.refresh_status().await?;
//!         match status.record().error() {
//!             Some(error) => println!("{}: {error}", spa.id()),
//!             None => println!(
//!                 "{}: {:?}, heater running: {:?}",
//!                 spa.id(),
//!                 status.record().current_temperature(),
//!                 status.record().is_heat_running()
//!             ),
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Decoding a Status Payload
//!
//! ```
//! use intex_spa::status::{decode, ErrorCode};
//!
//! // Water temperature reported in Fahrenheit (0x5A = 90 °F).
//! let record = decode("FFFF110F0106005A0000000080800026").unwrap();
//! assert_eq!(record.error(), None);
//! assert_eq!(record.current_temperature().unwrap().value(), 32);
//!
//! // 0xBE = 190 is error E90.
//! let record = decode("FFFF110F010600BE0000000080800026").unwrap();
//! assert_eq!(record.error(), Some(ErrorCode::Coded(90)));
//! assert_eq!(record.current_temperature(), None);
//! ```

pub mod command;
mod device;
pub mod dispatch;
pub mod error;
mod hex;
pub mod protocol;
pub mod response;
pub mod status;
pub mod types;

pub use command::{Command, CommandName, Feature};
pub use device::{IntexCloud, Spa};
pub use dispatch::{CommandDispatcher, RetryPolicy};
pub use error::{CommandError, Error, ParseError, PayloadDefect, ProtocolError, Result, ValueError};
#[cfg(feature = "http")]
pub use protocol::{CloudConfig, HttpTransport};
pub use protocol::DeviceTransport;
pub use status::{DeviceStatus, ErrorCode, StatusRecord, decode};
pub use types::{Celsius, TargetTemperature};
