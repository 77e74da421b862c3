// annotate.rs - Column header annotation of raw aligner output

use std::fs;
use std::path::Path;

/// Tabular columns requested from the aligner, in output order
pub const RESULT_COLUMNS: [&str; 17] = [
    "qseqid", "sseqid", "pident", "length", "mismatch", "gapopen", "qstart", "qend", "sstart",
    "send", "evalue", "bitscore", "qlen", "qseq", "stitle", "slen", "sseq",
];

/// Tab-joined header line (no trailing newline)
pub fn result_header() -> String {
    RESULT_COLUMNS.join("\t")
}

/// True when the first line of `content` is exactly `header`
pub fn starts_with_header(content: &[u8], header: &str) -> bool {
    let first = match content.iter().position(|&b| b == b'\n') {
        Some(end) => &content[..end],
        None => content,
    };
    let first = first.strip_suffix(b"\r").unwrap_or(first);
    first == header.as_bytes()
}

/// Prepend `header` to the file at `path` unless it is already there.
///
/// Data rows are kept byte-for-byte. Returns `true` if the header was added.
pub fn annotate_file(path: &Path, header: &str) -> Result<bool, String> {
    let content = fs::read(path)
        .map_err(|e| format!("Failed to read result file '{}': {}", path.display(), e))?;

    if starts_with_header(&content, header) {
        return Ok(false);
    }

    let mut annotated = Vec::with_capacity(header.len() + 1 + content.len());
    annotated.extend_from_slice(header.as_bytes());
    annotated.push(b'\n');
    annotated.extend_from_slice(&content);

    // a failed write must leave the raw file intact
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let tmp_path = path.with_file_name(format!(".{}.annotating", file_name));
    fs::write(&tmp_path, &annotated)
        .map_err(|e| format!("Failed to write '{}': {}", tmp_path.display(), e))?;
    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        format!("Failed to replace '{}': {}", path.display(), e)
    })?;

    Ok(true)
}
