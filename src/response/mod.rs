// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire types of the Intex cloud API.
//!
//! This module provides the structures exchanged with the cloud: account
//! and device listings, the per-device command catalog, command submission
//! and the feedback envelope carrying the hex status payload.

mod account;
mod catalog;
mod command_status;
mod feedback;

pub use account::{DeviceInfo, User};
pub use catalog::CommandDefinition;
pub use command_status::{CommandStatus, CommandSubmission};
pub use feedback::Feedback;
