//! Self- and cross-dimer detection.
//!
//! Two primers can anneal to each other (or a primer to a second copy of
//! itself) at any relative register, so the scanner slides sequence A over
//! the reverse of sequence B through every offset, collects contiguous
//! complementary runs ("islands") at each register, and keeps the single
//! strongest run overall.
//!
//! Two islands separated by exactly one mismatched base may be bridged into
//! one run: the merged ΔG is the sum of both island ΔGs plus a fixed bubble
//! penalty, and the merge only happens when that total beats either island
//! on its own. Runs shorter than three pairs or weaker than the stability
//! floor are never reported.
//!
//! Ties between equally stable runs go to the one touching a 3' terminus:
//! a dimer clamped on a 3' end blocks polymerase extension and must not be
//! masked by an equally stable interior run.
//!
//! # Examples
//! ```
//! // A primer ending in an EcoRI half-site dimerizes with itself:
//! let m = primerqc::scan_dimer("TTGAATTCTT", "TTGAATTCTT").unwrap();
//! assert!(m.dg < -1.0);
//! assert!(m.touches_three_prime);
//! assert!(primerqc::scan_dimer("AAAAAA", "AAAAAA").is_none());
//! ```

use crate::alphabet::{is_complementary, normalize};
use crate::thermo::{duplex_dg37, NnModel};
use crate::{stronger, ScanOpts};

/// The strongest complementary run found between two sequences.
#[derive(Clone, Debug)]
pub struct DimerMatch {
    /// Relative register of A against reversed B at which the run occurs.
    pub offset: isize,
    /// Start of the run in A coordinates (0-based).
    pub start: usize,
    /// Run span in bases, bubble included when two islands were merged.
    pub len: usize,
    /// Stability of the run at 37 °C, kcal/mol.
    pub dg: f64,
    /// Whether the run reaches within 3 bases of either strand's 3' end.
    pub touches_three_prime: bool,
    /// Three-line rendering: top strand, pairing marks, bottom strand.
    pub alignment: String,
}

/// A scored run candidate at one offset, before global selection.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    offset: isize,
    start: usize,
    len: usize,
    dg: f64,
    touches_three_prime: bool,
}

/// Scan `seq_a` against `seq_b` over every relative offset and return the
/// strongest qualifying run, or `None` when nothing reaches the floor.
///
/// Both inputs are normalized first. When the two sequences are identical
/// the duplex energies carry the self-complementary symmetry correction.
pub fn scan_dimer(
    model: &NnModel,
    opts: &ScanOpts,
    seq_a: &str,
    seq_b: &str,
) -> Option<DimerMatch> {
    let a_s = normalize(seq_a);
    let b_s = normalize(seq_b);
    let a = a_s.as_bytes();
    let b = b_s.as_bytes();
    if a.is_empty() || b.is_empty() {
        return None;
    }
    let symmetric = a == b;
    let brev: Vec<u8> = b.iter().rev().copied().collect();
    let (la, lb) = (a.len(), brev.len());

    let mut best: Option<Candidate> = None;
    for offset in -(lb as isize - 1)..=(la as isize - 1) {
        for cand in candidates_at(model, opts, a, &brev, offset, symmetric) {
            if cand.len < opts.min_run || !(cand.dg < opts.dg_floor) {
                continue;
            }
            let replace = match best {
                None => true,
                Some(cur) => stronger(
                    cand.dg,
                    cand.touches_three_prime,
                    cur.dg,
                    cur.touches_three_prime,
                ),
            };
            if replace {
                best = Some(cand);
            }
        }
    }

    best.map(|c| DimerMatch {
        offset: c.offset,
        start: c.start,
        len: c.len,
        dg: c.dg,
        touches_three_prime: c.touches_three_prime,
        alignment: render_alignment(a, &brev, c.offset, c.start, c.len),
    })
}

/// Maximal complementary runs of A against reversed B at one offset,
/// returned as `(start, len)` in A coordinates.
fn islands_at(a: &[u8], brev: &[u8], offset: isize) -> Vec<(usize, usize)> {
    let lo = offset.max(0) as usize;
    let hi = (offset + brev.len() as isize - 1).min(a.len() as isize - 1);
    let mut out = Vec::new();
    if hi < lo as isize {
        return out;
    }
    let hi = hi as usize;
    let mut start: Option<usize> = None;
    for i in lo..=hi {
        let j = (i as isize - offset) as usize;
        if is_complementary(a[i], brev[j]) {
            start.get_or_insert(i);
        } else if let Some(s) = start.take() {
            out.push((s, i - s));
        }
    }
    if let Some(s) = start {
        out.push((s, hi - s + 1));
    }
    out
}

/// Turn the islands at one offset into scored candidates, bridging a
/// single-base bubble between neighbors when the merged energy wins.
fn candidates_at(
    model: &NnModel,
    opts: &ScanOpts,
    a: &[u8],
    brev: &[u8],
    offset: isize,
    symmetric: bool,
) -> Vec<Candidate> {
    let islands = islands_at(a, brev, offset);
    let scored: Vec<(usize, usize, f64)> = islands
        .iter()
        .map(|&(s, l)| (s, l, duplex_dg37(model, &a[s..s + l], symmetric)))
        .collect();

    let make = |start: usize, len: usize, dg: f64| {
        let end = start + len - 1;
        let j_start = (start as isize - offset) as usize;
        // 3' of A is its last base; 3' of B is the first base of reversed B.
        let touches = end + opts.dimer_end_window >= a.len() || j_start < opts.dimer_end_window;
        Candidate {
            offset,
            start,
            len,
            dg,
            touches_three_prime: touches,
        }
    };

    let mut out = Vec::new();
    let mut k = 0;
    while k < scored.len() {
        let (s1, l1, dg1) = scored[k];
        if k + 1 < scored.len() {
            let (s2, l2, dg2) = scored[k + 1];
            if s2 == s1 + l1 + 1 {
                let merged = dg1 + dg2 + opts.bubble_penalty;
                if merged < dg1.min(dg2) {
                    out.push(make(s1, s2 + l2 - s1, merged));
                    k += 2;
                    continue;
                }
            }
        }
        out.push(make(s1, l1, dg1));
        k += 1;
    }
    out
}

/// Render the three-line alignment for a run: A on top 5'→3', reversed B on
/// the bottom (3'→5' left to right), `|` for confirmed pairs and `.` for
/// mismatches inside the run window. Columns span the union of both
/// sequences' coordinate ranges at this offset.
fn render_alignment(a: &[u8], brev: &[u8], offset: isize, start: usize, len: usize) -> String {
    let col_lo = 0isize.min(offset);
    let col_hi = (a.len() as isize - 1).max(offset + brev.len() as isize - 1);
    let span = start as isize..start as isize + len as isize;

    let mut top = String::new();
    let mut mid = String::new();
    let mut bot = String::new();
    for c in col_lo..=col_hi {
        let top_b = (c >= 0 && c < a.len() as isize).then(|| a[c as usize]);
        let j = c - offset;
        let bot_b = (j >= 0 && j < brev.len() as isize).then(|| brev[j as usize]);

        top.push(top_b.map_or(' ', char::from));
        bot.push(bot_b.map_or(' ', char::from));
        mid.push(match (top_b, bot_b) {
            (Some(x), Some(y)) if span.contains(&c) => {
                if is_complementary(x, y) {
                    '|'
                } else {
                    '.'
                }
            }
            _ => ' ',
        });
    }
    format!("5'-{top}-3'\n   {mid}\n3'-{bot}-5'")
}

#[cfg(test)]
mod dimer_tests {
    use super::*;
    use crate::alphabet::revcomp;
    use approx::assert_relative_eq;

    fn scan(a: &str, b: &str) -> Option<DimerMatch> {
        scan_dimer(&NnModel::default(), &ScanOpts::default(), a, b)
    }

    #[test]
    fn exact_reverse_complement_spans_full_length() {
        let s = "ATGGTGAGCAAGGGCGAGGAG";
        let t = revcomp(s);
        let m = scan(s, &t).unwrap();
        assert_eq!(m.offset, 0);
        assert_eq!(m.start, 0);
        assert_eq!(m.len, s.len());
        assert!(m.touches_three_prime);
        // Full-duplex energy of the pair; no symmetry term, s != t.
        assert_relative_eq!(m.dg, -28.762, epsilon = 1e-3);
    }

    #[test]
    fn palindromic_repeat_matches_itself_end_to_end() {
        // ACGT repeats are their own reverse complement, so the self-scan
        // pairs every base and carries the symmetry correction.
        let s = "ACGTACGTACGTACGTACGT";
        assert_eq!(revcomp(s), s);
        let m = scan(s, s).unwrap();
        assert_eq!((m.offset, m.start, m.len), (0, 0, 20));
        assert!(m.touches_three_prime);
        assert_relative_eq!(m.dg, -25.319, epsilon = 1e-3);
    }

    #[test]
    fn self_dimer_finds_internal_palindrome() {
        let m = scan("TTGAATTCTT", "TTGAATTCTT").unwrap();
        assert_eq!((m.offset, m.start, m.len), (0, 2, 6));
        assert!(m.touches_three_prime);
        assert_relative_eq!(m.dg, -3.088, epsilon = 1e-3);
    }

    #[test]
    fn bubble_merges_when_the_joint_run_is_stronger() {
        // Two GC hexamer islands around one mismatch: each is about
        // -9.06 kcal/mol, so the bridged run wins even after the penalty.
        let a = "GCGCGCAGCGCGC";
        let b = "GCGCGCCGCGCGC";
        let m = scan(a, b).unwrap();
        assert_eq!((m.offset, m.start, m.len), (0, 0, 13));
        assert_relative_eq!(m.dg, -14.614, epsilon = 1e-3);
        // The bubble shows up as a dot between solid pairing bars.
        let mid = m.alignment.lines().nth(1).unwrap();
        assert_eq!(mid.trim(), "||||||.||||||");
    }

    #[test]
    fn bubble_stays_split_when_merging_would_be_weaker() {
        // Two weak TGC islands: merging costs more than it gains, so the
        // best run is a single three-base island.
        let m = scan("TGCATGC", "GCAAGCA").unwrap();
        assert_eq!(m.len, 3);
        assert_relative_eq!(m.dg, -1.724, epsilon = 1e-3);
    }

    #[test]
    fn no_match_below_the_floor() {
        assert!(scan("AAAAAAAA", "AAAAAAAA").is_none());
        assert!(scan("ACGT", "TTTT").is_none());
        assert!(scan("", "ACGT").is_none());
    }

    #[test]
    fn alignment_renders_the_winning_register() {
        let s = "ATGGTGAGCAAGGGCGAGGAG";
        let t = revcomp(s);
        let m = scan(s, &t).unwrap();
        let lines: Vec<&str> = m.alignment.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], format!("5'-{s}-3'"));
        assert_eq!(lines[1].trim(), "|".repeat(s.len()));
        // Bottom line is B reversed, i.e. the complement of the top.
        let bottom: String = t.chars().rev().collect();
        assert_eq!(lines[2], format!("3'-{bottom}-5'"));
    }

    #[test]
    fn islands_split_on_mismatch() {
        let a = b"GCGCGCAGCGCGC";
        let brev: Vec<u8> = b"GCGCGCCGCGCGC".iter().rev().copied().collect();
        assert_eq!(islands_at(a, &brev, 0), vec![(0, 6), (7, 6)]);
    }
}
