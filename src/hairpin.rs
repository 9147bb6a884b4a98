//! Intramolecular hairpin detection.
//!
//! A hairpin closes when two stretches of one primer pair with each other
//! around an unpaired loop. The scanner tries every inner stem pair
//! `(i, j)` whose loop (`j − i − 1` bases) is at least the minimum, grows
//! the stem symmetrically outward while the ends stay complementary, and
//! scores each depth as stem duplex energy plus a loop-entropy penalty.
//!
//! The loop penalty comes from the table in [`crate::data::loops`]: fixed
//! values for 3-9 unpaired bases, a linear extrapolation beyond, and no
//! value at all below 3 — a loop that tight cannot physically close, which
//! is exactly the correction that stops short self-complementary runs from
//! being reported as phantom hairpins.
//!
//! Only candidates with net negative ΔG are kept; the strongest wins, with
//! the 3'-touch tie-break shared with the dimer scanner.
//!
//! # Examples
//! ```
//! // GC arms around a six-base loop fold back on themselves:
//! let m = primerqc::scan_hairpin("GCGCAAAAAAGCGC").unwrap();
//! assert_eq!((m.stem_len, m.loop_len), (4, 6));
//! // Too short to close anything:
//! assert!(primerqc::scan_hairpin("GCGCGGCG").is_none());
//! ```

use crate::alphabet::{is_complementary, normalize};
use crate::thermo::{duplex_dg37, NnModel};
use crate::{stronger, ScanOpts};

/// The strongest stem/loop found within one sequence.
#[derive(Clone, Copy, Debug)]
pub struct HairpinMatch {
    /// Index of the outermost 5' stem base.
    pub stem_start: usize,
    /// Paired stem length in bases.
    pub stem_len: usize,
    /// Unpaired bases enclosed by the stem.
    pub loop_len: usize,
    /// Net stability (stem + loop penalty) at 37 °C, kcal/mol.
    pub dg: f64,
    /// Whether the stem's right boundary falls in the last 5 bases.
    pub touches_three_prime: bool,
}

/// Loop-closure penalty for `len` unpaired bases, `None` when a loop of
/// that size cannot close.
fn loop_penalty(opts: &ScanOpts, len: usize) -> Option<f64> {
    if let Some(p) = opts.loop_dg.iter().find(|p| p.len == len) {
        return Some(p.dg);
    }
    let max = opts.loop_dg.iter().map(|p| p.len).max()?;
    (len > max).then(|| opts.loop_base + opts.loop_slope * (len - max) as f64)
}

/// Search every stem/loop combination of `seq` and return the strongest
/// net-stable hairpin, or `None` when nothing folds.
pub fn scan_hairpin(model: &NnModel, opts: &ScanOpts, seq: &str) -> Option<HairpinMatch> {
    let s_norm = normalize(seq);
    let s = s_norm.as_bytes();
    let n = s.len();

    let mut best: Option<HairpinMatch> = None;
    for i in 0..n {
        for j in (i + opts.min_loop + 1)..n {
            let loop_len = j - i - 1;
            let mut a = i as isize;
            let mut b = j;
            while a >= 0 && b < n && is_complementary(s[a as usize], s[b]) {
                let stem_len = i - a as usize + 1;
                if stem_len >= opts.min_stem {
                    if let Some(lp) = loop_penalty(opts, loop_len) {
                        let net = duplex_dg37(model, &s[a as usize..=i], false) + lp;
                        if net < 0.0 {
                            let cand = HairpinMatch {
                                stem_start: a as usize,
                                stem_len,
                                loop_len,
                                dg: net,
                                touches_three_prime: b + opts.hairpin_end_window >= n,
                            };
                            let replace = match best {
                                None => true,
                                Some(h) => stronger(
                                    cand.dg,
                                    cand.touches_three_prime,
                                    h.dg,
                                    h.touches_three_prime,
                                ),
                            };
                            if replace {
                                best = Some(cand);
                            }
                        }
                    }
                }
                a -= 1;
                b += 1;
            }
        }
    }
    best
}

#[cfg(test)]
mod hairpin_tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scan(seq: &str) -> Option<HairpinMatch> {
        scan_hairpin(&NnModel::default(), &ScanOpts::default(), seq)
    }

    #[test]
    fn gc_arms_fold_around_a_loop() {
        let m = scan("GCGCAAAAAAGCGC").unwrap();
        assert_eq!(m.stem_start, 0);
        assert_eq!(m.stem_len, 4);
        assert_eq!(m.loop_len, 6);
        assert!(m.touches_three_prime);
        assert_relative_eq!(m.dg, -0.661, epsilon = 1e-3);
    }

    #[test]
    fn long_loops_use_the_extrapolated_penalty() {
        let seq = format!("GCGCGC{}GCGCGC", "A".repeat(12));
        let m = scan(&seq).unwrap();
        assert_eq!(m.stem_len, 6);
        assert_eq!(m.loop_len, 12);
        // Stem -9.057, loop 4.6 + 0.1 * 3.
        assert_relative_eq!(m.dg, -4.157, epsilon = 1e-3);
    }

    #[test]
    fn minimum_geometry_is_nine_bases() {
        // 2 * min stem + min loop: anything shorter cannot fold at all,
        // even when it is perfectly self-complementary.
        assert!(scan("GCCGGC").is_none());
        assert!(scan("GCGAAAGC").is_none());
        for len in 1..9 {
            let seq: String = "GCGCAAAAAAGCGC".chars().take(len).collect();
            assert!(scan(&seq).is_none(), "len {len}");
        }
    }

    #[test]
    fn no_fold_without_complementary_positions() {
        assert!(scan("AAAAAAAAAAAAAAAA").is_none());
        assert!(scan("").is_none());
    }

    #[test]
    fn weak_stems_below_water_are_dropped() {
        // AT arms around a 3-base loop: the stem energy never beats the
        // loop penalty, so nothing net-stable is reported.
        assert!(scan("ATTAAATAAT").is_none());
    }

    #[test]
    fn loop_penalty_table_and_extrapolation() {
        let opts = ScanOpts::default();
        assert_eq!(loop_penalty(&opts, 2), None);
        assert_eq!(loop_penalty(&opts, 3), Some(3.5));
        assert_eq!(loop_penalty(&opts, 9), Some(4.5));
        assert_relative_eq!(loop_penalty(&opts, 10).unwrap(), 4.7, epsilon = 1e-9);
        assert_relative_eq!(loop_penalty(&opts, 14).unwrap(), 5.1, epsilon = 1e-9);
    }
}
