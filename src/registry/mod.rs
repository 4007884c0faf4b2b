// Copyright 2026 Daytona Controls Contributors
// SPDX-License-Identifier: Apache-2.0

//! Address registry: canonical name and register address resolution.
//!
//! Resolution is two stage. A canonical channel name maps to a
//! `(board_id, parameter)` pair through the [`NameTable`] (an injected
//! CSV-backed dependency), and the pair maps to an FPGA register offset
//! through the static per-board tables in [`fpga_map`].
//!
//! The registry is read-only after construction and may be shared
//! freely across concurrent compilations.

pub mod fpga_map;
pub mod names;

pub use names::NameTable;

use crate::error::ResolutionError;

/// A fully resolved channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChannel {
    /// Hardware board identifier.
    pub board_id: u8,
    /// Numeric parameter code.
    pub parameter: u16,
    /// FPGA register offset.
    pub address: u16,
}

impl ResolvedChannel {
    /// Register offset rendered as 4-digit uppercase hex, no `0x` prefix.
    pub fn address_hex(&self) -> String {
        format_address(self.address)
    }
}

/// Render a register offset as 4-digit uppercase hex.
pub fn format_address(address: u16) -> String {
    format!("{:04X}", address)
}

/// Read-only registry combining the name table with the static
/// per-board register maps.
#[derive(Debug, Clone, Default)]
pub struct AddressRegistry {
    names: NameTable,
}

impl AddressRegistry {
    /// Create a registry over the given name table.
    pub fn new(names: NameTable) -> Self {
        Self { names }
    }

    /// Registry over the name table shipped with the crate.
    pub fn builtin() -> Self {
        Self::new(NameTable::builtin())
    }

    /// Resolve `(board_id, parameter)` to a register offset.
    pub fn resolve(&self, board_id: u8, parameter: u16) -> Result<u16, ResolutionError> {
        if !fpga_map::has_board(board_id) {
            return Err(ResolutionError::UnknownBoard(board_id));
        }
        fpga_map::lookup(board_id, parameter)
            .ok_or(ResolutionError::UnknownParameter { board_id, parameter })
    }

    /// Map a canonical name to its `(board_id, parameter)` pair.
    pub fn canonical_to_code(&self, name: &str) -> Result<(u8, u16), ResolutionError> {
        self.names
            .lookup(name)
            .ok_or_else(|| ResolutionError::UnknownName(name.to_string()))
    }

    /// Resolve a canonical name all the way to a register address.
    pub fn resolve_name(&self, name: &str) -> Result<ResolvedChannel, ResolutionError> {
        let (board_id, parameter) = self.canonical_to_code(name)?;
        let address = self.resolve(board_id, parameter)?;
        Ok(ResolvedChannel {
            board_id,
            parameter,
            address,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> AddressRegistry {
        AddressRegistry::builtin()
    }

    // =========================================================================
    // resolve(board, parameter)
    // =========================================================================

    #[test]
    fn test_resolve_control_board() {
        assert_eq!(registry().resolve(0, 150).unwrap(), 0x0030);
    }

    #[test]
    fn test_resolve_twave_board() {
        assert_eq!(registry().resolve(6, 254).unwrap(), 0x0288);
    }

    #[test]
    fn test_resolve_unknown_board() {
        let err = registry().resolve(2, 1000).unwrap_err();
        assert!(matches!(err, ResolutionError::UnknownBoard(2)));
    }

    #[test]
    fn test_resolve_unknown_parameter() {
        let err = registry().resolve(4, 4242).unwrap_err();
        assert!(matches!(
            err,
            ResolutionError::UnknownParameter {
                board_id: 4,
                parameter: 4242
            }
        ));
    }

    // =========================================================================
    // canonical_to_code / resolve_name
    // =========================================================================

    #[test]
    fn test_canonical_to_code() {
        assert_eq!(
            registry().canonical_to_code("Fill Gate.control").unwrap(),
            (6, 189)
        );
    }

    #[test]
    fn test_canonical_to_code_unknown() {
        let err = registry().canonical_to_code("Ghost.control").unwrap_err();
        assert!(matches!(err, ResolutionError::UnknownName(_)));
    }

    #[test]
    fn test_resolve_name_full_chain() {
        let channel = registry()
            .resolve_name("Path A Dynamic Guard.setpoint")
            .unwrap();
        assert_eq!(channel.board_id, 4);
        assert_eq!(channel.parameter, 184);
        assert_eq!(channel.address, 0x002C);
        assert_eq!(channel.address_hex(), "002C");
    }

    #[test]
    fn test_resolve_name_direct_no_operation() {
        // "@0.1000" is board 0 parameter 1000 (NO_OPERATION), address 0000
        let channel = registry().resolve_name("@0.1000").unwrap();
        assert_eq!(channel.board_id, 0);
        assert_eq!(channel.parameter, 1000);
        assert_eq!(channel.address_hex(), "0000");
    }

    // =========================================================================
    // Address formatting
    // =========================================================================

    #[test]
    fn test_format_address_zero_padded() {
        assert_eq!(format_address(0x0000), "0000");
        assert_eq!(format_address(0x002C), "002C");
        assert_eq!(format_address(0x0320), "0320");
    }
}
