// Copyright 2026 Daytona Controls Contributors
// SPDX-License-Identifier: Apache-2.0

//! Single-path ("Path A" / "Path B") sequence builder.
//!
//! The dual-path phase structure collapsed onto one selected path plus
//! Path C. The accumulation and separation cycles run concurrently and
//! generally differ in natural duration, so the dead-time balancer
//! shifts fill/trap timing to keep them phase-locked.
//!
//! Unlike the dual-path table, the single-path table is a self-looping
//! program: each module terminates with a LOOP back to line 0 at the
//! 24-bit counter ceiling, followed by an END.

use tracing::debug;

use super::channels::*;
use super::deadtime::{DeadTime, FLUSH_TIME_MS};
use super::step::{ModuleId, ModuleSet, Opcode};
use crate::error::{Error, Result};
use crate::intent::{HdcPath, Intent};

/// LOOP repeat count: the 24-bit hardware loop counter ceiling.
pub const LOOP_COUNT_MAX: u32 = 0xFF_FFFF;

/// Build the single-path module set for an intent.
///
/// # Errors
///
/// Returns [`Error::Config`] when the intent's topology is not a
/// single-path selection; no step is emitted in that case.
pub fn build(intent: &Intent) -> Result<ModuleSet> {
    let (path_module, gate, guard) = path_channels(intent.hdc_path)?;
    let dead_time = DeadTime::for_intent(intent);

    let mut builder = SinglePathBuilder {
        intent,
        path_module,
        gate,
        guard,
        modules: ModuleSet::new(),
    };

    let oba_dt = dead_time.accumulation_ms;
    builder.init_steps(0.0);
    builder.fill(intent.release + oba_dt);
    builder.trap(intent.release + intent.fill + oba_dt);
    builder.release(0.0);
    builder.flush(intent.sip_period + dead_time.separation_ms - FLUSH_TIME_MS);
    builder.wait(intent.release + intent.fill + oba_dt + intent.trap);
    builder.terminate(intent.sip_period + FLUSH_TIME_MS + dead_time.separation_ms);

    debug!(
        path = %intent.hdc_path,
        accumulation_dead_time_ms = dead_time.accumulation_ms,
        separation_dead_time_ms = dead_time.separation_ms,
        "single-path sequence built"
    );
    Ok(builder.modules)
}

/// Per-path wiring: which module carries the selected path and which
/// gate/guard channels it owns.
fn path_channels(path: HdcPath) -> Result<(ModuleId, &'static str, &'static str)> {
    match path {
        HdcPath::PathA => Ok((ModuleId::PathA, PATH_A_GATE, PATH_A_GUARD)),
        HdcPath::PathB => Ok((ModuleId::PathB, PATH_B_GATE, PATH_B_GUARD)),
        HdcPath::Both => Err(Error::Config(
            "single-path builder requires a Path A or Path B topology".into(),
        )),
    }
}

struct SinglePathBuilder<'a> {
    intent: &'a Intent,
    path_module: ModuleId,
    gate: &'static str,
    guard: &'static str,
    modules: ModuleSet,
}

impl SinglePathBuilder<'_> {
    /// One-time arming steps, identical to the dual-path init: guards
    /// at the flush magnitude, gates closed, WAIT placeholders armed.
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

        self.modules
            .control
            .add_step_with_priority(DIGITIZER_GATE, 0.0, Opcode::Write, t, -1);
        self.modules
            .control
            .add_step("CB_NO_OP", 0.0, Opcode::Wait, t);
    }

    /// Fill phase at t = release + accumulation dead time.
    fn fill(&mut self, t: f64) {
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

    /// Trap phase at t = release + fill + accumulation dead time.
    fn trap(&mut self, t: f64) {
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

    /// Release at t = 0, on receipt of the sync pulse. The wave runs
    /// forward for Path A, reversed for Path B.
    fn release(&mut self, t: f64) {
        let direction = if self.intent.hdc_path == HdcPath::PathA {
            1.0
        } else {
            0.0
        };
        let guard_magnitude = self.intent.flush_voltage.abs();
        let (gate, guard) = (self.gate, self.guard);

        let module = self.modules.module_mut(self.path_module);
        module.add_step(guard, guard_magnitude, Opcode::Write, t);
        module.add_step(
            OBA_TW_AMPLITUDE,
            self.intent.release_amp,
            Opcode::Write,
            t,
        );
        module.add_step(
            OBA_TW_FREQUENCY,
            self.intent.release_frequency,
            Opcode::Write,
            t,
        );
        module.add_step(OBA_TW_DIRECTION, direction, Opcode::Write, t);
        module.add_step(gate, 1.0, Opcode::Write, t);
    }

    /// Flush the selected path and the exit path at
    /// t = sipPeriod + separation dead time - flush.
    fn flush(&mut self, t: f64) {
        let voltage = self.intent.flush_voltage;
        let guard = self.guard;
        self.modules
            .module_mut(self.path_module)
            .add_step(guard, voltage, Opcode::Write, t);
        self.modules
            .path_c
            .add_step(PATH_C_GUARD, voltage, Opcode::Write, t);
    }

    /// READY handshake before the end-of-cycle release.
    fn wait(&mut self, t: f64) {
        self.modules
            .path_c
            .add_step("TW3_NO_OP", 0.0, Opcode::Wait, t);
    }

    /// Self-looping termination: every module loops back to line 0 for
    /// the full 24-bit counter, then ends. Priorities keep LOOP before
    /// END when they share the boundary timestamp.
    fn terminate(&mut self, cycle_end: f64) {
        for id in ModuleId::ALL {
            let noop = id.noop_channel();
            let module = self.modules.module_mut(id);
            module.add_step_with_priority(
                noop,
                f64::from(LOOP_COUNT_MAX),
                Opcode::Loop,
                cycle_end,
                3,
            );
            module.add_step_with_priority(noop, 0.0, Opcode::End, cycle_end, 4);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::step::Step;
    use crate::test_utils::single_path_intent;

    fn steps_at<'a>(steps: &'a [Step], name: &str) -> Vec<&'a Step> {
        steps.iter().filter(|s| s.canonical_name == name).collect()
    }

    // =========================================================================
    // Dead-time shifted phases
    // =========================================================================

    #[test]
    fn test_fill_shifted_by_accumulation_dead_time() {
        // release=2, accumulation dead time=88: fill at t = 90
        let intent = single_path_intent();
        let set = build(&intent).unwrap();
        let opens: Vec<f64> = steps_at(&set.path_c.steps, FILL_GATE)
            .iter()
            .filter(|s| s.setpoint == 1.0)
            .map(|s| s.abs_time_ms)
            .collect();
        assert_eq!(opens, vec![90.0]);
    }

    #[test]
    fn test_trap_follows_fill() {
        // release + fill + dead time = 2 + 10 + 88 = 100
        let intent = single_path_intent();
        let set = build(&intent).unwrap();
        let closes: Vec<f64> = steps_at(&set.path_c.steps, FILL_GATE)
            .iter()
            .filter(|s| s.setpoint == 0.0)
            .map(|s| s.abs_time_ms)
            .collect();
        assert_eq!(closes, vec![100.0]);
    }

    #[test]
    fn test_release_at_zero_on_selected_path() {
        let intent = single_path_intent();
        let set = build(&intent).unwrap();
        let gate_opens: Vec<&Step> = steps_at(&set.path_a.steps, PATH_A_GATE)
            .into_iter()
            .filter(|s| s.setpoint == 1.0)
            .collect();
        assert_eq!(gate_opens.len(), 1);
        assert_eq!(gate_opens[0].abs_time_ms, 0.0);
    }

    #[test]
    fn test_path_b_selection_uses_path_b_channels() {
        let mut intent = single_path_intent();
        intent.hdc_path = HdcPath::PathB;
        let set = build(&intent).unwrap();
        // Release lands on the Path B module with the reversed direction
        let gate_opens = steps_at(&set.path_b.steps, PATH_B_GATE)
            .into_iter()
            .filter(|s| s.setpoint == 1.0)
            .count();
        assert_eq!(gate_opens, 1);
        let dir = steps_at(&set.path_b.steps, OBA_TW_DIRECTION);
        assert_eq!(dir[0].setpoint, 0.0);
        // And the Path B guard, not Path A's
        assert!(steps_at(&set.path_b.steps, PATH_B_GUARD).len() >= 2);
    }

    #[test]
    fn test_flush_time() {
        // sipPeriod + sep dead time - 5 = 100 + 0 - 5 = 95
        let intent = single_path_intent();
        let set = build(&intent).unwrap();
        let flushes: Vec<f64> = steps_at(&set.path_c.steps, PATH_C_GUARD)
            .iter()
            .filter(|s| s.setpoint == intent.flush_voltage && s.abs_time_ms > 0.0)
            .map(|s| s.abs_time_ms)
            .collect();
        assert_eq!(flushes, vec![95.0]);
    }

    #[test]
    fn test_wait_before_end_of_cycle_release() {
        // release + fill + dead time + trap = 2 + 10 + 88 + 5 = 105
        let intent = single_path_intent();
        let set = build(&intent).unwrap();
        let waits: Vec<f64> = set
            .path_c
            .steps
            .iter()
            .filter(|s| s.opcode == Opcode::Wait && s.abs_time_ms > 0.0)
            .map(|s| s.abs_time_ms)
            .collect();
        assert!(waits.contains(&105.0));
    }

    // =========================================================================
    // Self-looping termination
    // =========================================================================

    #[test]
    fn test_every_module_terminates_with_loop_then_end() {
        let intent = single_path_intent();
        let set = build(&intent).unwrap();
        // Cycle end: sipPeriod + flush + sep dead time = 105
        for module in set.into_modules() {
            let loops: Vec<&Step> = module
                .steps
                .iter()
                .filter(|s| s.opcode == Opcode::Loop)
                .collect();
            let ends: Vec<&Step> = module
                .steps
                .iter()
                .filter(|s| s.opcode == Opcode::End)
                .collect();
            assert_eq!(loops.len(), 1);
            assert_eq!(ends.len(), 1);
            assert_eq!(loops[0].abs_time_ms, 105.0);
            assert_eq!(ends[0].abs_time_ms, 105.0);
            assert_eq!(loops[0].setpoint, 16_777_215.0);
            assert!(loops[0].priority < ends[0].priority);
        }
    }

    #[test]
    fn test_no_stall_in_single_path() {
        let intent = single_path_intent();
        let set = build(&intent).unwrap();
        assert!(steps_at(&set.path_a.steps, PATH_A_SEPARATION_AMPLITUDE).is_empty());
        assert!(steps_at(&set.path_b.steps, PATH_B_SEPARATION_AMPLITUDE).is_empty());
    }

    // =========================================================================
    // Topology errors
    // =========================================================================

    #[test]
    fn test_both_topology_rejected() {
        let mut intent = single_path_intent();
        intent.hdc_path = HdcPath::Both;
        let err = build(&intent).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_deterministic_build() {
        let intent = single_path_intent();
        let a = build(&intent).unwrap();
        let b = build(&intent).unwrap();
        assert_eq!(a.path_a.steps, b.path_a.steps);
        assert_eq!(a.path_c.steps, b.path_c.steps);
    }
}
