// Copyright 2026 Daytona Controls Contributors
// SPDX-License-Identifier: Apache-2.0

//! Dual-path ("Both") sequence builder.
//!
//! Drives Path A and Path B as a phase-alternating pair sharing the
//! on-board accumulation/exit path (Path C). Each physical phase
//! schedules an ordered set of register writes at a phase-defined
//! absolute time, then duplicates them offset by one full separation
//! period so Path B runs the mirrored, time-shifted twin of Path A's
//! cycle.
//!
//! The cycle begins on a release: t = 0 is the first release, so the
//! fill phase lands at t = release, trap at t = release + fill, and so
//! on. The table is not self-looping; WAIT steps near each cycle
//! boundary block for the READY/SYNC handshake so the table only
//! advances once external hardware confirms readiness.

use tracing::debug;

use super::channels::*;
use super::deadtime::FLUSH_TIME_MS;
use super::step::{ModuleSet, Opcode};
use crate::intent::Intent;

/// Build the dual-path module set for an intent.
pub fn build(intent: &Intent) -> ModuleSet {
    let mut builder = DualPathBuilder {
        intent,
        modules: ModuleSet::new(),
    };
    builder.init_steps(0.0);
    builder.fill(intent.release);
    builder.trap(intent.release + intent.fill);
    builder.release(0.0);
    builder.stall(intent.sip_period - intent.stall_duration);
    builder.flush(intent.sip_period);
    builder.wait(intent.sip_period);
    debug!(
        sip_period_ms = intent.sip_period,
        "dual-path sequence built"
    );
    builder.modules
}

struct DualPathBuilder<'a> {
    intent: &'a Intent,
    modules: ModuleSet,
}

impl DualPathBuilder<'_> {
    /// Steps taken once before the timing-table cycle begins: arm the
    /// guards at the flush magnitude, close the path gates, and park
    /// each module on a WAIT placeholder. Priority -1 ensures these
    /// sort ahead of everything else at t = 0.
    fn init_steps(&mut self, t: f64) {
        let guard = self.intent.flush_voltage.abs();

        self.modules
            .path_a
            .add_step_with_priority(PATH_A_GUARD, guard, Opcode::Write, t, -1);
        self.modules
            .path_a
            .add_step_with_priority(PATH_A_GATE, 0.0, Opcode::Write, t, -1);
        self.modules
            .path_a
            .add_step_with_priority("TW1_NO_OP", 0.0, Opcode::Wait, t, -1);

        self.modules
            .path_b
            .add_step_with_priority(PATH_B_GUARD, guard, Opcode::Write, t, -1);

        self.modules
            .path_c
            .add_step_with_priority(PATH_C_GUARD, guard, Opcode::Write, t, -1);
        self.modules
            .path_c
            .add_step("TW3_NO_OP", 0.0, Opcode::Wait, t);

        // Digitizer gate low until the first release.
        self.modules
            .control
            .add_step_with_priority(DIGITIZER_GATE, 0.0, Opcode::Write, t, -1);
        self.modules
            .control
            .add_step("CB_NO_OP", 0.0, Opcode::Wait, t);
    }

    /// Fill phase: waste wave forward, accumulation wave at fill
    /// amplitude/frequency, fill gate open. Emitted at t = release and
    /// again offset by fill + trap + release for the second path.
    fn fill(&mut self, t: f64) {
        let second = t + self.intent.fill + self.intent.trap + self.intent.release;
        for t in [t, second] {
            self.modules
                .path_c
                .add_step(WASTE_TW_DIRECTION, 1.0, Opcode::Write, t);
            self.modules
                .path_c
                .add_step(OBA_TW_AMPLITUDE, self.intent.fill_amp, Opcode::Write, t);
            self.modules.path_c.add_step(
                OBA_TW_FREQUENCY,
                self.intent.fill_frequency,
                Opcode::Write,
                t,
            );
            self.modules.path_c.add_step(FILL_GATE, 1.0, Opcode::Write, t);
        }
    }

    /// Trap phase: fill gate closed, waste wave reversed toward the
    /// detector, accumulation wave at trap amplitude/frequency.
    fn trap(&mut self, t: f64) {
        let second = t + self.intent.release + self.intent.fill + self.intent.trap;
        for t in [t, second] {
            self.modules.path_c.add_step(FILL_GATE, 0.0, Opcode::Write, t);
            self.modules
                .path_c
                .add_step(WASTE_TW_DIRECTION, 0.0, Opcode::Write, t);
            self.modules
                .path_c
                .add_step(OBA_TW_AMPLITUDE, self.intent.trap_amp, Opcode::Write, t);
            self.modules.path_c.add_step(
                OBA_TW_FREQUENCY,
                self.intent.trap_frequency,
                Opcode::Write,
                t,
            );
        }
    }

    /// Release phase. Path A releases at t = 0 on receipt of the sync
    /// pulse; Path B's release is offset by one separation period, with
    /// the accumulation wave reversed to steer ions down Path B.
    fn release(&mut self, t: f64) {
        let guard = self.intent.flush_voltage.abs();

        // Path A release: end the flush, run the accumulation wave
        // forward, open the gate.
        self.modules
            .path_a
            .add_step(PATH_A_GUARD, guard, Opcode::Write, t);
        self.modules
            .path_c
            .add_step(OBA_TW_AMPLITUDE, self.intent.release_amp, Opcode::Write, t);
        self.modules.path_c.add_step(
            OBA_TW_FREQUENCY,
            self.intent.release_frequency,
            Opcode::Write,
            t,
        );
        self.modules
            .path_c
            .add_step(OBA_TW_DIRECTION, 1.0, Opcode::Write, t);
        self.modules
            .path_a
            .add_step(PATH_A_GATE, 1.0, Opcode::Write, t);

        // Path B release, one separation period later.
        let t = t + self.intent.sip_period;
        self.modules
            .path_b
            .add_step(PATH_B_GUARD, guard, Opcode::Write, t);
        self.modules
            .path_c
            .add_step(OBA_TW_AMPLITUDE, self.intent.release_amp, Opcode::Write, t);
        self.modules.path_c.add_step(
            OBA_TW_FREQUENCY,
            self.intent.release_frequency,
            Opcode::Write,
            t,
        );
        self.modules
            .path_c
            .add_step(OBA_TW_DIRECTION, 0.0, Opcode::Write, t);
        self.modules
            .path_b
            .add_step(PATH_B_GATE, 1.0, Opcode::Write, t);
    }

    /// Stall: zero the separation wave amplitude late in each path's
    /// separation. Path A stalls at t = sipPeriod - stallDuration;
    /// Path B's stall is offset so it lands mid-separation on the
    /// shifted cycle.
    fn stall(&mut self, t: f64) {
        let offset = self.intent.sip_period + self.intent.stall_duration;

        self.modules
            .path_a
            .add_step(PATH_A_SEPARATION_AMPLITUDE, 0.0, Opcode::Write, t);
        self.modules
            .path_b
            .add_step(PATH_B_SEPARATION_AMPLITUDE, 0.0, Opcode::Write, t + offset);
    }

    /// Flush the guards at the signed flush voltage, a fixed 5 ms
    /// before each path's end of period.
    fn flush(&mut self, sip_period: f64) {
        self.modules.path_b.add_step(
            PATH_B_GUARD,
            self.intent.flush_voltage,
            Opcode::Write,
            sip_period - FLUSH_TIME_MS,
        );
        self.modules.path_a.add_step(
            PATH_A_GUARD,
            self.intent.flush_voltage,
            Opcode::Write,
            2.0 * sip_period + self.intent.stall_duration - FLUSH_TIME_MS,
        );
    }

    /// WAIT steps near the cycle boundaries so each module blocks for
    /// its READY/SYNC handshake before the next repetition. Priority 2
    /// sorts them after any write sharing the timestamp.
    fn wait(&mut self, sip_period: f64) {
        self.modules.control.add_step_with_priority(
            "CB_NO_OP",
            0.0,
            Opcode::Wait,
            sip_period - FLUSH_TIME_MS,
            2,
        );

        self.modules.path_a.add_step_with_priority(
            "TW1_NO_OP",
            0.0,
            Opcode::Wait,
            sip_period - self.intent.stall_duration,
            2,
        );
        self.modules.path_a.add_step_with_priority(
            "TW1_NO_OP",
            0.0,
            Opcode::Wait,
            sip_period + (sip_period - FLUSH_TIME_MS),
            2,
        );

        self.modules.path_b.add_step_with_priority(
            "TW2_NO_OP",
            0.0,
            Opcode::Wait,
            sip_period - FLUSH_TIME_MS,
            2,
        );
        self.modules.path_b.add_step_with_priority(
            "TW2_NO_OP",
            0.0,
            Opcode::Wait,
            sip_period + (sip_period - self.intent.stall_duration),
            2,
        );

        let first_cycle = self.intent.release + self.intent.fill;
        self.modules
            .path_c
            .add_step_with_priority("TWC_NO_OP", 0.0, Opcode::Wait, first_cycle, 2);
        self.modules.path_c.add_step_with_priority(
            "TWC_NO_OP",
            0.0,
            Opcode::Wait,
            first_cycle + self.intent.trap + self.intent.release + self.intent.fill,
            2,
        );
    }
}
