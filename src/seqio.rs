//! Primer list input for **FASTA / FASTQ / FASTQ.GZ / plain text**.
//!
//! ### Design
//! - **FASTA/FASTQ(.GZ)** parsed with `needletail`
//! - **Plain text** fallback: one primer per line, an optional leading name
//!   column, `#` comments and blank lines ignored
//!
//! Format is detected from the file extension: `.fa/.fasta/.fna/.fq/.fastq`
//! (optionally `.gz`) go to needletail, everything else is treated as plain
//! text.
//!
//! ### Errors
//! Parsing/IO errors are bubbled via `anyhow::Result` to the caller.
//! Sequence *content* is not validated here — the engine normalizes and
//! silently drops junk characters on its own.
//!
//! ### Example
//! ```no_run
//! let primers = primerqc::seqio::read_primers("primers.fasta").unwrap();
//! for p in &primers { println!("{}\t{}", p.name, p.seq); }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use needletail::parse_fastx_file;

/// A named primer as read from an input file.
#[derive(Clone, Debug, PartialEq)]
pub struct PrimerRecord {
    pub name: String,
    pub seq: String,
}

fn is_fastx(path: &Path) -> bool {
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let stem = name.strip_suffix(".gz").unwrap_or(&name);
    ["fa", "fasta", "fna", "fq", "fastq"]
        .iter()
        .any(|ext| stem.ends_with(&format!(".{ext}")))
}

/// Read primers from one file, FASTA/FASTQ or plain text by extension.
pub fn read_primers<P: AsRef<Path>>(path: P) -> Result<Vec<PrimerRecord>> {
    let p = path.as_ref();
    if is_fastx(p) {
        read_fastx(p)
    } else {
        let text = fs::read_to_string(p)
            .with_context(|| format!("reading primer list {}", p.display()))?;
        Ok(parse_plain(&text, p))
    }
}

fn read_fastx(p: &Path) -> Result<Vec<PrimerRecord>> {
    let mut reader = parse_fastx_file(p).with_context(|| format!("opening {}", p.display()))?;
    let mut out = Vec::new();
    while let Some(record) = reader.next() {
        let rec = record?;
        let id = String::from_utf8_lossy(rec.id()).to_string();
        let name = id
            .split_whitespace()
            .next()
            .unwrap_or("primer")
            .to_string();
        let seq = String::from_utf8_lossy(&rec.seq()).to_string();
        out.push(PrimerRecord { name, seq });
    }
    Ok(out)
}

/// Parse a plain-text primer list: `name sequence` or bare `sequence` per
/// line. Unnamed primers get `<stem>_<n>` names.
fn parse_plain(text: &str, path: &Path) -> Vec<PrimerRecord> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("primer");
    let mut out = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace();
        let first = fields.next().unwrap_or_default();
        match fields.next() {
            Some(second) => out.push(PrimerRecord {
                name: first.to_string(),
                seq: second.to_string(),
            }),
            None => out.push(PrimerRecord {
                name: format!("{}_{}", stem, out.len() + 1),
                seq: first.to_string(),
            }),
        }
    }
    out
}
