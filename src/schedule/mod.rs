// Copyright 2026 Daytona Controls Contributors
// SPDX-License-Identifier: Apache-2.0

//! Sequence building and timeline assembly.
//!
//! This module turns an intent into per-module instruction sequences:
//!
//! - [`step`] — the instruction vocabulary ([`Step`], [`Module`],
//!   [`Opcode`])
//! - [`channels`] — canonical channel names the builders emit
//! - [`deadtime`] — accumulation/separation dead-time balancing
//! - [`dual_path`] and [`single_path`] — topology-specific builders
//! - [`assemble`] — ordering, address resolution and tick quantization

pub mod assemble;
pub mod channels;
pub mod deadtime;
pub mod dual_path;
pub mod single_path;
pub mod step;

pub use assemble::{assemble, CompileOptions, Instruction, TICKS_PER_MS};
pub use deadtime::{DeadTime, FLUSH_TIME_MS};
pub use step::{Module, ModuleId, ModuleSet, Opcode, Step};
