//! IUPAC nucleotide alphabet, input normalization and complementarity.
//!
//! Sequences arrive as free text (pasted primers, FASTA payloads) and are
//! normalized before any thermodynamic work: upper-cased, with every
//! character outside the 15-symbol IUPAC alphabet silently dropped. The
//! silent filter is the documented contract — callers that want to inform
//! the user re-render the cleaned sequence themselves.
//!
//! Degenerate codes (R, Y, S, W, K, M, B, D, H, V, N) expand to base sets,
//! and two codes count as complementary when *any* resolution of one is the
//! Watson-Crick complement of *any* resolution of the other. That
//! existential reading is what the dimer and hairpin scanners build on.
//!
//! # Examples
//! ```
//! use primerqc::alphabet::{normalize, is_complementary};
//! assert_eq!(normalize("acg t-x5n"), "ACGTN");
//! assert!(is_complementary(b'A', b'T'));
//! assert!(is_complementary(b'N', b'G'));
//! assert!(!is_complementary(b'A', b'G'));
//! ```

/// The 15 recognized IUPAC nucleotide codes, canonical bases first.
pub const IUPAC: &[u8; 15] = b"ACGTRYSWKMBDHVN";

/// Upper-case `raw` and drop every character outside [`IUPAC`].
///
/// Never fails; junk input simply shrinks. Idempotent.
pub fn normalize(raw: &str) -> String {
    raw.bytes()
        .map(|b| b.to_ascii_uppercase())
        .filter(|b| IUPAC.contains(b))
        .map(char::from)
        .collect()
}

/// The concrete bases a single IUPAC code can represent.
///
/// Canonical bases return themselves, degenerate codes their expansion, and
/// anything unrecognized the empty set.
pub fn base_set(code: u8) -> &'static [u8] {
    match code.to_ascii_uppercase() {
        b'A' => b"A",
        b'C' => b"C",
        b'G' => b"G",
        b'T' => b"T",
        b'R' => b"AG",
        b'Y' => b"CT",
        b'S' => b"CG",
        b'W' => b"AT",
        b'K' => b"GT",
        b'M' => b"AC",
        b'B' => b"CGT",
        b'D' => b"AGT",
        b'H' => b"ACT",
        b'V' => b"ACG",
        b'N' => b"ACGT",
        _ => b"",
    }
}

/// Watson-Crick complement of a concrete base; `None` for anything else.
pub fn complement_of(base: u8) -> Option<u8> {
    match base {
        b'A' => Some(b'T'),
        b'T' => Some(b'A'),
        b'C' => Some(b'G'),
        b'G' => Some(b'C'),
        _ => None,
    }
}

/// Existential complementarity over base sets.
///
/// True iff some resolution of `x` is the Watson-Crick complement of some
/// resolution of `y`. Symmetric in its arguments.
pub fn is_complementary(x: u8, y: u8) -> bool {
    base_set(x)
        .iter()
        .any(|&cx| base_set(y).iter().any(|&cy| complement_of(cx) == Some(cy)))
}

/// GC content of a sequence as a percentage (0-100).
///
/// The input is normalized first; `S` (G or C) counts as GC, every other
/// degenerate code does not. Returns NaN for a sequence that normalizes to
/// nothing.
pub fn gc_percent(seq: &str) -> f64 {
    let seq = normalize(seq);
    if seq.is_empty() {
        return f64::NAN;
    }
    let gc = seq
        .bytes()
        .filter(|b| matches!(b, b'G' | b'C' | b'S'))
        .count();
    gc as f64 / seq.len() as f64 * 100.0
}

/// Reverse complement of a (normalized) sequence.
///
/// Degenerate codes map to their IUPAC complements (e.g. `R` ↔ `Y`).
pub fn revcomp(seq: &str) -> String {
    let seq = normalize(seq);
    String::from_utf8(bio::alphabets::dna::revcomp(seq.as_bytes())).unwrap_or_default()
}

#[cfg(test)]
mod alphabet_tests {
    use super::*;

    #[test]
    fn normalize_filters_and_uppercases() {
        assert_eq!(normalize("  atg-C\n5'gattaca3'"), "ATGCGATTACA");
        assert_eq!(normalize("rYswkmbdhvn"), "RYSWKMBDHVN");
        assert_eq!(normalize("!@#$ 1234 uUzZ"), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["acgt", "A C G T", "xxACGTNxx", "", "5'-GCGC-3'", "uracil"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "input {raw:?}");
        }
    }

    #[test]
    fn complementarity_round_trip_and_symmetry() {
        for &b in b"ACGT" {
            let c = complement_of(b).unwrap();
            assert!(is_complementary(b, c), "{} vs {}", b as char, c as char);
        }
        for &x in IUPAC.iter() {
            for &y in IUPAC.iter() {
                assert_eq!(
                    is_complementary(x, y),
                    is_complementary(y, x),
                    "{} vs {}",
                    x as char,
                    y as char
                );
            }
        }
    }

    #[test]
    fn degenerate_pairing_is_existential() {
        // N pairs with everything, R (A/G) pairs with Y (C/T) but not
        // with M (A/C)? M resolves to A or C; R's complements are T and C,
        // so R~M holds through C. A genuinely impossible pair: A vs R.
        assert!(is_complementary(b'N', b'N'));
        assert!(is_complementary(b'R', b'Y'));
        assert!(is_complementary(b'R', b'M'));
        assert!(!is_complementary(b'A', b'R'));
        assert!(!is_complementary(b'G', b'K'));
    }

    #[test]
    fn unknown_code_has_empty_set_and_never_pairs() {
        assert!(base_set(b'Z').is_empty());
        assert!(!is_complementary(b'Z', b'N'));
    }

    #[test]
    fn gc_percent_counts_strong_codes() {
        assert_eq!(gc_percent("GGCC"), 100.0);
        assert_eq!(gc_percent("ATAT"), 0.0);
        assert_eq!(gc_percent("ATGC"), 50.0);
        assert_eq!(gc_percent("SSAA"), 50.0);
        assert!(gc_percent("").is_nan());
        assert!(gc_percent("1234").is_nan());
    }

    #[test]
    fn revcomp_handles_degenerates() {
        assert_eq!(revcomp("ACGT"), "ACGT");
        assert_eq!(revcomp("AACG"), "CGTT");
        assert_eq!(revcomp("ARY"), "RYT");
    }
}
