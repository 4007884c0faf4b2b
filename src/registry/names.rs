// Copyright 2026 Daytona Controls Contributors
// SPDX-License-Identifier: Apache-2.0

//! Canonical channel name table.
//!
//! Maps a human-readable canonical channel name to a `(board_id,
//! parameter)` pair. The table is row-oriented CSV with columns
//! `Canonical Name, Board ID, Parameter`; lookup is exact-string,
//! first match.
//!
//! Names of the literal form `@<board>.<parameter>` (the addressing
//! syntax used for live instrument channels) bypass the table and
//! parse directly.

use std::path::Path;

use crate::error::{Error, Result};

const EXPECTED_COLUMNS: [&str; 3] = ["Canonical Name", "Board ID", "Parameter"];

/// One row of the name table.
#[derive(Debug, Clone, PartialEq, Eq)]
struct NameRow {
    canonical_name: String,
    board_id: u8,
    parameter: u16,
}

/// CSV-backed canonical name table.
///
/// This is an injected dependency of the compiler, not a hard-coded
/// map: instruments ship their own table alongside the register maps.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    rows: Vec<NameRow>,
}

impl NameTable {
    /// Load the name table from a CSV file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// The name table shipped with the crate.
    ///
    /// Covers every canonical channel the sequence builders emit.
    ///
    /// # Panics
    ///
    /// Panics if the embedded CSV does not parse. The table is compiled
    /// in and exercised by the test suite, so this only fires on a
    /// broken build of the crate itself.
    pub fn builtin() -> Self {
        Self::parse(include_str!("../../config/canonical_names.csv"))
            .expect("embedded canonical name table is valid")
    }

    /// Parse CSV content with a `Canonical Name, Board ID, Parameter`
    /// header row.
    pub fn parse(content: &str) -> Result<Self> {
        let mut lines = content.lines();
        let header = lines
            .next()
            .ok_or_else(|| Error::Config("name table is empty".into()))?;
        let columns: Vec<&str> = header.split(',').map(str::trim).collect();
        if columns.len() < EXPECTED_COLUMNS.len()
            || !EXPECTED_COLUMNS
                .iter()
                .zip(&columns)
                .all(|(expected, got)| expected == got)
        {
            return Err(Error::Config(format!(
                "name table must have columns {:?}, got {:?}",
                EXPECTED_COLUMNS, columns
            )));
        }

        let mut rows = Vec::new();
        for (line_no, line) in lines.enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() < 3 {
                return Err(Error::Config(format!(
                    "name table line {}: expected 3 fields, got {}",
                    line_no + 2,
                    fields.len()
                )));
            }
            let board_id = fields[1].parse::<u8>().map_err(|e| {
                Error::Config(format!(
                    "name table line {}: invalid board id '{}': {}",
                    line_no + 2,
                    fields[1],
                    e
                ))
            })?;
            let parameter = fields[2].parse::<u16>().map_err(|e| {
                Error::Config(format!(
                    "name table line {}: invalid parameter '{}': {}",
                    line_no + 2,
                    fields[2],
                    e
                ))
            })?;
            rows.push(NameRow {
                canonical_name: fields[0].to_string(),
                board_id,
                parameter,
            });
        }
        Ok(Self { rows })
    }

    /// Number of rows in the table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Map a canonical name to `(board_id, parameter)`.
    ///
    /// First match in the table wins; names of the form
    /// `@<board>.<parameter>` resolve without a table entry.
    pub fn lookup(&self, canonical_name: &str) -> Option<(u8, u16)> {
        self.rows
            .iter()
            .find(|row| row.canonical_name == canonical_name)
            .map(|row| (row.board_id, row.parameter))
            .or_else(|| parse_direct(canonical_name))
    }
}

/// Parse the `@<board>.<parameter>` direct addressing form.
fn parse_direct(name: &str) -> Option<(u8, u16)> {
    let rest = name.strip_prefix('@')?;
    let (board, parameter) = rest.split_once('.')?;
    Some((board.parse().ok()?, parameter.parse().ok()?))
}
