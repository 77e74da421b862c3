// record.rs - Sequence records and the protein residue alphabet

use std::fmt::{Display, Formatter};
use std::io::{self, Write};

/// Marker that opens a record header line
pub const RECORD_START: char = '>';

/// The 20 standard amino acids accepted in cleaned output (uppercase only)
pub const VALID_RESIDUES: &str = "ACDEFGHIKLMNPQRSTVWY";

/// Check whether a character belongs to the valid-residue alphabet
pub fn is_valid_residue(c: char) -> bool {
    VALID_RESIDUES.contains(c)
}

/// Strip whitespace from a sequence line and keep only valid residues
pub fn clean_residues(line: &str) -> String {
    line.chars()
        .filter(|c| !c.is_whitespace())
        .filter(|&c| is_valid_residue(c))
        .collect()
}

/// One cleaned sequence entry: header text plus a single unwrapped residue line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub header: String,
    pub residues: String,
}

impl Record {
    pub fn new(header: impl Into<String>, residues: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            residues: residues.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Write the record as two lines: `>header` and the residues
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{}{}", RECORD_START, self.header)?;
        writeln!(writer, "{}", self.residues)
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}\n{}", RECORD_START, self.header, self.residues)
    }
}
