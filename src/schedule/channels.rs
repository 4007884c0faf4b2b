// Copyright 2026 Daytona Controls Contributors
// SPDX-License-Identifier: Apache-2.0

//! Canonical channel names emitted by the sequence builders.
//!
//! Every name here must have a row in the instrument's canonical name
//! table (`config/canonical_names.csv` by default).

/// Path A dynamic guard setpoint.
pub const PATH_A_GUARD: &str = "Path A Dynamic Guard.setpoint";
/// Path B dynamic guard setpoint.
pub const PATH_B_GUARD: &str = "Path B Dynamic Guard.setpoint";
/// Path C (exit) dynamic guard setpoint.
pub const PATH_C_GUARD: &str = "Path C Dynamic Guard.setpoint";

/// Path A gate control (long path gate mux).
pub const PATH_A_GATE: &str = "Path A Gate.control";
/// Path B gate control.
pub const PATH_B_GATE: &str = "Path B Gate.control";
/// Fill gate control (short path gate mux).
pub const FILL_GATE: &str = "Fill Gate.control";

/// Waste travelling wave direction (forward fills, reverse ejects).
pub const WASTE_TW_DIRECTION: &str = "Waste Traveling Wave.direction";

/// On-board accumulation travelling wave amplitude.
pub const OBA_TW_AMPLITUDE: &str = "OBA Traveling Wave.amplitude";
/// On-board accumulation travelling wave frequency.
pub const OBA_TW_FREQUENCY: &str = "OBA Traveling Wave.frequency";
/// On-board accumulation travelling wave direction.
pub const OBA_TW_DIRECTION: &str = "OBA Traveling Wave.direction";

/// Path A separation travelling wave amplitude.
pub const PATH_A_SEPARATION_AMPLITUDE: &str = "Path A Separation Traveling Wave.amplitude";
/// Path B separation travelling wave amplitude.
pub const PATH_B_SEPARATION_AMPLITUDE: &str = "Path B Separation Traveling Wave.amplitude";

/// Digitizer gate digital IO on the control board.
pub const DIGITIZER_GATE: &str = "Digitizer Gate.DIO";
