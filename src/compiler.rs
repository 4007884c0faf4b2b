// Copyright 2026 Daytona Controls Contributors
// SPDX-License-Identifier: Apache-2.0

//! Top-level compilation entry point.
//!
//! Compilation is a pure, synchronous computation: intent in, compiled
//! table out. Each call owns its modules exclusively, so the compiler
//! is safe to call from multiple threads as long as the shared
//! [`AddressRegistry`] is treated as read-only (it is).

use std::collections::BTreeMap;

use tracing::info;

use crate::error::Result;
use crate::intent::{HdcPath, Intent};
use crate::ramp::{self, RampWord};
use crate::registry::AddressRegistry;
use crate::schedule::{assemble, dual_path, single_path, CompileOptions, Instruction};

/// The compiled artifact: per-module instruction sequences, optionally
/// paired with encoded ramp words.
#[derive(Debug, Clone)]
pub struct CompiledTimingTable {
    /// Time-ordered instructions keyed by module name
    /// (`"0"`, `"4"`, `"5"`, `"6"`).
    pub modules: BTreeMap<&'static str, Vec<Instruction>>,
    /// Encoded ramp words for the selected path's profile.
    ///
    /// `None` only for the dual-path topology, whose profiles are not
    /// yet encoded; a single-path profile that fails to encode aborts
    /// the compilation instead.
    pub ramp_words: Option<Vec<RampWord>>,
}

/// Compile an intent into per-module timing tables.
///
/// # Errors
///
/// - [`Error::Config`](crate::Error::Config) for an invalid intent;
///   no partial table is produced.
/// - [`Error::Resolution`](crate::Error::Resolution) under
///   `strict_resolution` when a canonical name cannot be resolved.
/// - [`Error::Encoding`](crate::Error::Encoding) when the selected
///   single-path ramp profile is empty or non-monotonic.
pub fn compile(
    intent: &Intent,
    registry: &AddressRegistry,
    options: &CompileOptions,
) -> Result<CompiledTimingTable> {
    intent.validate()?;

    let module_set = match intent.hdc_path {
        HdcPath::Both => dual_path::build(intent),
        HdcPath::PathA | HdcPath::PathB => single_path::build(intent)?,
    };

    let modules = assemble(module_set, registry, options)?;

    let ramp_words = match intent.selected_profile() {
        None => None,
        Some(profile) => Some(ramp::encode_profile(profile)?),
    };

    info!(
        topology = %intent.hdc_path,
        instructions = modules.values().map(Vec::len).sum::<usize>(),
        ramp_segments = ramp_words.as_ref().map_or(0, Vec::len),
        "timing table compiled"
    );

    Ok(CompiledTimingTable {
        modules,
        ramp_words,
    })
}
