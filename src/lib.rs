// Copyright 2026 Daytona Controls Contributors
// SPDX-License-Identifier: Apache-2.0

//! Daytona timing-table compiler
//!
//! This crate compiles a declarative experiment intent for an
//! ion-mobility separation instrument into per-module, time-ordered
//! FPGA instruction sequences.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            Intent (JSON)                │
//! ├─────────────────────────────────────────┤
//! │   Sequence builders (schedule)          │
//! │   dual-path ─ single-path ─ dead time   │
//! ├─────────────────────────────────────────┤
//! │   Timeline assembly                     │
//! │   sort ─ resolve (registry) ─ quantize  │
//! ├────────────────────┬────────────────────┤
//! │  Instruction CSVs  │  Ramp words (ramp) │
//! │  (export)          │                    │
//! └────────────────────┴────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`intent`]: Experiment intent model and validation
//! - [`schedule`]: Sequence builders and timeline assembly
//! - [`registry`]: Canonical name and register address resolution
//! - [`ramp`]: Travelling-wave ramp encoding
//! - [`compiler`]: Top-level compilation entry point
//! - [`export`]: CSV rendering of compiled tables
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod compiler;
pub mod config;
pub mod error;
pub mod export;
pub mod intent;
pub mod ramp;
pub mod registry;
pub mod schedule;

pub use compiler::{compile, CompiledTimingTable};
pub use config::Config;
pub use error::{Error, Result};
pub use intent::Intent;
pub use registry::AddressRegistry;
pub use schedule::CompileOptions;

#[cfg(test)]
pub mod test_utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
