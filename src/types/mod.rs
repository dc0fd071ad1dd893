// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for spa control.
//!
//! - [`Celsius`] - A decoded whole-degree temperature reading
//! - [`TargetTemperature`] - Validated target for the `TempSet` command (10-40 °C)

mod temperature;

pub use temperature::{Celsius, TargetTemperature};
