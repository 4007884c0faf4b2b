// Copyright 2026 Daytona Controls Contributors
// SPDX-License-Identifier: Apache-2.0

//! Static per-board FPGA register maps.
//!
//! For each board there is a table that maps a numeric parameter code to
//! the corresponding FPGA address offset. Board 0 is the control board;
//! boards 4, 5 and 6 are the three travelling-wave boards, which are
//! hardware-identical and share one table.
//!
//! Parameter codes of [`VIRTUAL_PARAMETER_BASE`] and above have no
//! mapping in external parameter space; they address fixed internal
//! registers (ramp-end frequency/amplitude) and are kept in the same
//! table so every parameter resolves the same way.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Parameter code of the NO_OPERATION register on every board.
pub const NO_OPERATION: u16 = 1000;

/// Parameter codes at or above this value are virtual: they have no
/// externally addressable register.
pub const VIRTUAL_PARAMETER_BASE: u16 = 10_000;

/// Ramp-end frequency register, common to all travelling-wave boards.
pub const TWAVE_RAMP_END_FREQUENCY: u16 = 0x0320;

/// Ramp-end amplitude register, common to all travelling-wave boards.
pub const TWAVE_RAMP_END_AMPLITUDE: u16 = 0x032C;

/// Control board (board 0) register map.
fn control_board() -> &'static HashMap<u16, u16> {
    static TABLE: OnceLock<HashMap<u16, u16>> = OnceLock::new();
    TABLE.get_or_init(|| {
        HashMap::from([
            (84, 0x0100),  // PRS_627
            (85, 0x0104),  // PRS_925
            (86, 0x0108),  // PRS_226
            (146, 0x0020), // PRS_627_LIMIT
            (147, 0x0024), // PRS_925_LIMIT
            (148, 0x0028), // PRS_226_LIMIT
            (149, 0x002C), // SMA_SW
            (150, 0x0030), // GATE
            (NO_OPERATION, 0x0000),
        ])
    })
}

/// Travelling-wave board (boards 4/5/6) register map.
fn twave_board() -> &'static HashMap<u16, u16> {
    static TABLE: OnceLock<HashMap<u16, u16>> = OnceLock::new();
    TABLE.get_or_init(|| {
        HashMap::from([
            (112, 0x0034), // DC_ADC_CHAN_SEL
            (114, 0x0054), // TWA_ADC_CHAN_SEL
            (116, 0x0074), // TWB_ADC_CHAN_SEL
            (118, 0x0094), // TWC_ADC_CHAN_SEL
            (147, 0x0030), // HV_MUX_TWA (long path gate)
            (148, 0x0048), // TWA_AMP
            (149, 0x004C), // TWA_OFFS_DWN
            (150, 0x0050), // TWA_OFFS_UP
            (151, 0x0068), // TWB_AMP
            (152, 0x006C), // TWB_OFFS_DWN
            (153, 0x0070), // TWB_OFFS_UP
            (154, 0x0088), // TWC_AMP
            (155, 0x008C), // TWC_OFFS_DWN
            (156, 0x0090), // TWC_OFFS_UP
            (181, 0x0020), // DC_DAC_0
            (182, 0x0024), // DC_DAC_1
            (183, 0x0028), // DC_DAC_2
            (184, 0x002C), // DC_DAC_3_GUARD
            (185, 0x0224), // TWA frequency
            (186, 0x0254), // TWB frequency
            (187, 0x0284), // TWC frequency
            (188, 0x0040), // HV_MUX_TWB
            (189, 0x0044), // HV_MUX_TWC (short path gate)
            (249, 0x0220), // TWA_START_PH
            (250, 0x0228), // TWA_DIR
            (251, 0x0250), // TWB_START_PH
            (252, 0x0258), // TWB_DIR
            (253, 0x0280), // TWC_START_PH
            (254, 0x0288), // TWC_DIR
            (NO_OPERATION, 0x0000),
            // Virtual parameters: fixed internal ramp registers
            (10_000, TWAVE_RAMP_END_FREQUENCY),
            (11_000, TWAVE_RAMP_END_AMPLITUDE),
        ])
    })
}

/// Look up the register offset for `(board_id, parameter)`.
///
/// Returns `None` both for unknown boards and for parameters missing
/// from a known board's table; callers distinguish the two cases via
/// [`has_board`].
pub fn lookup(board_id: u8, parameter: u16) -> Option<u16> {
    match board_id {
        0 => control_board().get(&parameter).copied(),
        4 | 5 | 6 => twave_board().get(&parameter).copied(),
        _ => None,
    }
}

/// Whether a board has an address table at all.
pub fn has_board(board_id: u8) -> bool {
    matches!(board_id, 0 | 4 | 5 | 6)
}
