// Copyright 2026 Daytona Controls Contributors
// SPDX-License-Identifier: Apache-2.0

//! CSV rendering of compiled timing tables.
//!
//! The column layout is the one the bench tooling reads back:
//! `Line,Opcode,Ticks,Address,Value`. Opcodes render as their hex wire
//! codes and unresolved addresses as an empty field.

use crate::schedule::Instruction;

const HEADER: &str = "Line,Opcode,Ticks,Address,Value";

/// Render one module's instructions as a CSV table.
pub fn render_table(instructions: &[Instruction]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for (line, instruction) in instructions.iter().enumerate() {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            line,
            instruction.opcode.code_hex(),
            instruction.ticks,
            instruction.address.as_deref().unwrap_or(""),
            instruction.setpoint,
        ));
    }
    out
}

/// Total delay budget of a table, in clock ticks.
pub fn ticks_total(instructions: &[Instruction]) -> u64 {
    instructions.iter().map(|i| u64::from(i.ticks)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Opcode;

    fn write(ticks: u32, address: Option<&str>, setpoint: f64) -> Instruction {
        Instruction {
            opcode: Opcode::Write,
            ticks,
            address: address.map(String::from),
            setpoint,
        }
    }

    #[test]
    fn test_header_only_for_empty_table() {
        assert_eq!(render_table(&[]), "Line,Opcode,Ticks,Address,Value\n");
    }

    #[test]
    fn test_rows_numbered_from_zero() {
        let csv = render_table(&[
            write(0, Some("0044"), 1.0),
            Instruction {
                opcode: Opcode::Wait,
                ticks: 900,
                address: Some("0000".into()),
                setpoint: 0.0,
            },
        ]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[1], "0,0,0,0044,1");
        assert_eq!(lines[2], "1,A0,900,0000,0");
    }

    #[test]
    fn test_unresolved_address_renders_empty() {
        let csv = render_table(&[write(10, None, -2.5)]);
        assert_eq!(csv.lines().nth(1), Some("0,0,10,,-2.5"));
    }

    #[test]
    fn test_ticks_total() {
        let table = [write(0, None, 0.0), write(900, None, 0.0), write(150, None, 0.0)];
        assert_eq!(ticks_total(&table), 1050);
    }
}
