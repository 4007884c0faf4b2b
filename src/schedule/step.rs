// Copyright 2026 Daytona Controls Contributors
// SPDX-License-Identifier: Apache-2.0

//! Instruction model: [`Opcode`], [`Step`], [`Module`] and [`ModuleSet`].
//!
//! A [`Step`] is one hardware action scheduled at an absolute offset
//! from cycle start. Each of the four execution units owns a [`Module`]
//! that collects its steps; steps are appended during building and only
//! ordered by the timeline assembler.

use std::fmt;

/// Timing-table instruction opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// Wait, then execute a write of the value to the address.
    Write,
    /// Wait for READY (control board) / SYNC (travelling-wave boards).
    Wait,
    /// Wait, then loop to line# (address) N times (value).
    Loop,
    /// End of experiment; clear the start bit.
    End,
}

impl Opcode {
    /// Fixed wire code.
    pub fn code(&self) -> u16 {
        match self {
            Opcode::Write => 0x0000,
            Opcode::Wait => 0x00A0,
            Opcode::Loop => 0x00C0,
            Opcode::End => 0x00FF,
        }
    }

    /// Wire code rendered as uppercase hex, no `0x` prefix.
    pub fn code_hex(&self) -> String {
        format!("{:X}", self.code())
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opcode::Write => write!(f, "WRITE"),
            Opcode::Wait => write!(f, "WAIT"),
            Opcode::Loop => write!(f, "LOOP"),
            Opcode::End => write!(f, "END"),
        }
    }
}

/// One hardware action at an absolute time offset from cycle start.
///
/// `priority` is a pure tie-breaker for steps sharing a timestamp, not
/// a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Canonical channel name, resolved to a register address at
    /// assembly time.
    pub canonical_name: String,
    /// Value written by WRITE steps; loop count for LOOP steps.
    pub setpoint: f64,
    /// Instruction opcode.
    pub opcode: Opcode,
    /// Absolute time from cycle start, milliseconds.
    pub abs_time_ms: f64,
    /// Tie-breaker at identical timestamps (lower runs first).
    pub priority: i32,
}

/// Hardware execution unit identifier.
///
/// The set is closed: one control board and three travelling-wave
/// boards. Keeping this an enum makes topology wiring exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModuleId {
    /// Control board.
    Control,
    /// Path A travelling-wave board.
    PathA,
    /// Path B travelling-wave board.
    PathB,
    /// Path C (on-board accumulation / exit) travelling-wave board.
    PathC,
}

impl ModuleId {
    /// All modules in canonical order.
    pub const ALL: [ModuleId; 4] = [
        ModuleId::Control,
        ModuleId::PathA,
        ModuleId::PathB,
        ModuleId::PathC,
    ];

    /// Module name as used in the compiled table mapping.
    pub fn name(&self) -> &'static str {
        match self {
            ModuleId::Control => "0",
            ModuleId::PathA => "4",
            ModuleId::PathB => "5",
            ModuleId::PathC => "6",
        }
    }

    /// Hardware board identifier.
    pub fn board_id(&self) -> u8 {
        match self {
            ModuleId::Control => 0,
            ModuleId::PathA => 4,
            ModuleId::PathB => 5,
            ModuleId::PathC => 6,
        }
    }

    /// The board's NO_OPERATION channel, used by WAIT/LOOP/END steps.
    pub fn noop_channel(&self) -> &'static str {
        match self {
            ModuleId::Control => "CB_NO_OP",
            ModuleId::PathA => "TW1_NO_OP",
            ModuleId::PathB => "TW2_NO_OP",
            ModuleId::PathC => "TW3_NO_OP",
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One execution unit's collected steps.
///
/// Steps are appended during building, never mutated or removed; the
/// timeline assembler consumes the module and orders them.
#[derive(Debug, Clone)]
pub struct Module {
    /// Which execution unit this is.
    pub id: ModuleId,
    /// Appended steps, unsorted.
    pub steps: Vec<Step>,
}

impl Module {
    /// Create an empty module.
    pub fn new(id: ModuleId) -> Self {
        Self {
            id,
            steps: Vec::new(),
        }
    }

    /// Append a step with default priority 0.
    pub fn add_step(&mut self, canonical_name: &str, setpoint: f64, opcode: Opcode, abs_time_ms: f64) {
        self.add_step_with_priority(canonical_name, setpoint, opcode, abs_time_ms, 0);
    }

    /// Append a step with an explicit priority.
    pub fn add_step_with_priority(
        &mut self,
        canonical_name: &str,
        setpoint: f64,
        opcode: Opcode,
        abs_time_ms: f64,
        priority: i32,
    ) {
        self.steps.push(Step {
            canonical_name: canonical_name.to_string(),
            setpoint,
            opcode,
            abs_time_ms,
            priority,
        });
    }
}

/// The four modules of one compilation.
///
/// Owned exclusively by that compilation; never reused.
#[derive(Debug, Clone)]
pub struct ModuleSet {
    /// Control board module ("0").
    pub control: Module,
    /// Path A travelling-wave module ("4").
    pub path_a: Module,
    /// Path B travelling-wave module ("5").
    pub path_b: Module,
    /// Path C travelling-wave module ("6").
    pub path_c: Module,
}

impl ModuleSet {
    /// Create a fresh set of empty modules.
    pub fn new() -> Self {
        Self {
            control: Module::new(ModuleId::Control),
            path_a: Module::new(ModuleId::PathA),
            path_b: Module::new(ModuleId::PathB),
            path_c: Module::new(ModuleId::PathC),
        }
    }

    /// Mutable access to a module by identifier.
    pub fn module_mut(&mut self, id: ModuleId) -> &mut Module {
        match id {
            ModuleId::Control => &mut self.control,
            ModuleId::PathA => &mut self.path_a,
            ModuleId::PathB => &mut self.path_b,
            ModuleId::PathC => &mut self.path_c,
        }
    }

    /// Consume the set into modules in canonical order.
    pub fn into_modules(self) -> [Module; 4] {
        [self.control, self.path_a, self.path_b, self.path_c]
    }
}

impl Default for ModuleSet {
    fn default() -> Self {
        Self::new()
    }
}
