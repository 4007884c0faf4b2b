// Copyright 2026 Daytona Controls Contributors
// SPDX-License-Identifier: Apache-2.0

//! Timeline assembly: ordering, address resolution and tick
//! quantization.
//!
//! Each module's steps are stably sorted by `(abs_time_ms, priority)` —
//! steps sharing both keys keep their builder emission order, which is
//! a behavioral contract, not an accident. Absolute times then become
//! inter-step tick deltas at 10 ticks per millisecond: each
//! instruction's delay field is the rounded delta from its predecessor,
//! with the first step's predecessor implicitly at t = 0.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use tracing::warn;

use super::step::{ModuleSet, Opcode, Step};
use crate::error::Result;
use crate::registry::AddressRegistry;

/// Hardware clock resolution: ticks per millisecond.
pub const TICKS_PER_MS: f64 = 10.0;

/// Compilation policy options.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    /// Abort compilation when a canonical name fails resolution.
    ///
    /// When false (the default), an unresolved channel is logged and
    /// its instruction emitted with no address, leaving the policy
    /// decision to the hardware owner.
    pub strict_resolution: bool,
}

/// One compiled hardware instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instruction {
    /// Instruction opcode (serialized as its hex wire code).
    #[serde(serialize_with = "serialize_opcode")]
    pub opcode: Opcode,
    /// Delay before execution, in clock ticks since the previous
    /// instruction.
    pub ticks: u32,
    /// Resolved register offset (4-digit uppercase hex), or `None`
    /// when resolution failed under the non-strict policy.
    pub address: Option<String>,
    /// Setpoint value.
    pub setpoint: f64,
}

fn serialize_opcode<S: Serializer>(opcode: &Opcode, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&opcode.code_hex())
}

/// Assemble a built module set into per-module instruction sequences.
///
/// # Errors
///
/// Under `strict_resolution`, the first unresolved canonical name
/// aborts the whole compilation.
pub fn assemble(
    set: ModuleSet,
    registry: &AddressRegistry,
    options: &CompileOptions,
) -> Result<BTreeMap<&'static str, Vec<Instruction>>> {
    let mut tables = BTreeMap::new();
    for mut module in set.into_modules() {
        sort_steps(&mut module.steps);

        let mut instructions = Vec::with_capacity(module.steps.len());
        let mut last_time_ms = 0.0;
        for step in &module.steps {
            let address = match registry.resolve_name(&step.canonical_name) {
                Ok(channel) => Some(channel.address_hex()),
                Err(e) => {
                    if options.strict_resolution {
                        return Err(e.into());
                    }
                    warn!(
                        module = %module.id,
                        channel = %step.canonical_name,
                        error = %e,
                        "leaving instruction address unresolved"
                    );
                    None
                }
            };
            instructions.push(Instruction {
                opcode: step.opcode,
                ticks: quantize_delta(last_time_ms, step.abs_time_ms),
                address,
                setpoint: step.setpoint,
            });
            last_time_ms = step.abs_time_ms;
        }
        tables.insert(module.id.name(), instructions);
    }
    Ok(tables)
}

/// Stable sort by `(abs_time_ms, priority)` ascending.
fn sort_steps(steps: &mut [Step]) {
    steps.sort_by(|a, b| {
        a.abs_time_ms
            .total_cmp(&b.abs_time_ms)
            .then(a.priority.cmp(&b.priority))
    });
}

/// Inter-step delay in clock ticks, rounded to the nearest tick.
///
/// Negative or sub-tick deltas quantize to 0: an immediate-execute
/// instruction.
fn quantize_delta(prev_ms: f64, time_ms: f64) -> u32 {
    let ticks = ((time_ms - prev_ms) * TICKS_PER_MS).round();
    if ticks <= 0.0 {
        0
    } else {
        ticks as u32
    }
}
