// Copyright 2026 Daytona Controls Contributors
// SPDX-License-Identifier: Apache-2.0

//! Shared test fixtures for compiler tests.

use crate::intent::{HdcPath, Intent, JhPath, RampPoint, RampProfile, WaveState};

/// Reference single-path intent.
///
/// accumDuration = 10 + 5 + 2 = 17 ms, sepDuration = 100 + 5 = 105 ms,
/// so accumDeadTime = 88 ms and sepDeadTime = 0. The Path A profile
/// carries a single ramp segment of 10 ms.
pub fn single_path_intent() -> Intent {
    Intent {
        sip_period: 100.0,
        stall_duration: 3.0,
        fill: 10.0,
        release: 2.0,
        trap: 5.0,
        flush_voltage: 50.0,
        fill_amp: 1.0,
        fill_frequency: 2.0,
        trap_amp: 3.0,
        trap_frequency: 4.0,
        release_amp: 5.0,
        release_frequency: 6.0,
        wait_for_ready: true,
        hdc_path: HdcPath::PathA,
        jh_path: JhPath::Passthrough,
        path_a_profile: RampProfile {
            initial_state: WaveState {
                frequency: 100.0,
                amplitude: 50.0,
            },
            ramps: vec![RampPoint {
                time: 10.0,
                state: WaveState {
                    frequency: 200.0,
                    amplitude: 60.0,
                },
            }],
        },
        path_b_profile: RampProfile {
            initial_state: WaveState {
                frequency: 100.0,
                amplitude: 50.0,
            },
            ramps: vec![RampPoint {
                time: 10.0,
                state: WaveState {
                    frequency: 300.0,
                    amplitude: 70.0,
                },
            }],
        },
    }
}

/// Reference dual-path intent: the single-path fixture with the
/// phase-alternating topology selected.
pub fn dual_path_intent() -> Intent {
    Intent {
        hdc_path: HdcPath::Both,
        jh_path: JhPath::Alternating,
        ..single_path_intent()
    }
}
