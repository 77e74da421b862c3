// sanitizer.rs - Streaming FASTA sanitizer for protein databases

use crate::data::record::{clean_residues, Record, RECORD_START};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Yield counters for one sanitized file. `cleaned <= total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeStats {
    /// Record-start lines seen in the input
    pub total: usize,
    /// Records written to the output
    pub cleaned: usize,
}

impl SanitizeStats {
    /// Records dropped because nothing valid was left in their body
    pub fn dropped(&self) -> usize {
        self.total.saturating_sub(self.cleaned)
    }

    pub fn yield_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.cleaned as f64 * 100.0 / self.total as f64
        }
    }
}

/// Line-by-line parser state.
///
/// Each call to [`ParserState::step`] consumes the state and one input line and
/// returns the next state plus the record completed by that line, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserState {
    header: Option<String>,
    fragments: Vec<String>,
    total: usize,
}

impl ParserState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record-start lines seen so far
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn current_header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    pub fn pending_fragments(&self) -> usize {
        self.fragments.len()
    }

    pub fn step(mut self, line: &str) -> (Self, Option<Record>) {
        let line = line.trim();
        if line.is_empty() {
            return (self, None);
        }

        if let Some(header) = line.strip_prefix(RECORD_START) {
            self.total += 1;
            let flushed = self.take_record();
            // An empty header never opens a record: its body is discarded like leading junk
            self.header = (!header.is_empty()).then(|| header.to_string());
            return (self, flushed);
        }

        if self.header.is_some() {
            let residues = clean_residues(line);
            if !residues.is_empty() {
                self.fragments.push(residues);
            }
        }
        (self, None)
    }

    /// End of input: returns the final record (if it has residues) and the total count
    pub fn finish(mut self) -> (Option<Record>, usize) {
        let last = self.take_record();
        (last, self.total)
    }

    fn take_record(&mut self) -> Option<Record> {
        let fragments = std::mem::take(&mut self.fragments);
        let header = self.header.take()?;
        if fragments.is_empty() {
            return None;
        }
        Some(Record {
            header,
            residues: fragments.concat(),
        })
    }
}

/// Sanitize a FASTA stream, writing one unwrapped residue line per kept record
pub fn sanitize<R: BufRead, W: Write>(
    mut reader: R,
    writer: &mut W,
) -> Result<SanitizeStats, String> {
    let mut state = ParserState::new();
    let mut cleaned = 0;
    let mut buf = Vec::new();
    let mut line_num = 0usize;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;
        if read == 0 {
            break;
        }
        line_num += 1;

        let line = String::from_utf8_lossy(&buf);
        let (next, flushed) = state.step(&line);
        state = next;
        if let Some(record) = flushed {
            record
                .write_to(writer)
                .map_err(|e| format!("Write error: {}", e))?;
            cleaned += 1;
        }
    }

    let (last, total) = state.finish();
    if let Some(record) = last {
        record
            .write_to(writer)
            .map_err(|e| format!("Write error: {}", e))?;
        cleaned += 1;
    }

    Ok(SanitizeStats { total, cleaned })
}

/// Sanitize `input` into `output`.
///
/// The records go to a hidden sibling first; `output` is only replaced once the whole
/// input has been processed, so a failed run leaves any previous output untouched.
pub fn sanitize_file(input: &Path, output: &Path) -> Result<SanitizeStats, String> {
    let infile = File::open(input)
        .map_err(|e| format!("Failed to open input file '{}': {}", input.display(), e))?;

    let file_name = output
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let tmp_path = output.with_file_name(format!(".{}.partial", file_name));

    let result = write_cleaned(infile, input, &tmp_path).and_then(|stats| {
        fs::rename(&tmp_path, output)
            .map_err(|e| format!("Failed to replace '{}': {}", output.display(), e))?;
        Ok(stats)
    });
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn write_cleaned(infile: File, input: &Path, tmp_path: &Path) -> Result<SanitizeStats, String> {
    let outfile = File::create(tmp_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", tmp_path.display(), e))?;

    let mut writer = BufWriter::new(outfile);
    let stats = sanitize(BufReader::new(infile), &mut writer)
        .map_err(|e| format!("{}: {}", input.display(), e))?;
    writer.flush().map_err(|e| format!("Flush error: {}", e))?;

    Ok(stats)
}
