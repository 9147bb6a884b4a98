//! Nearest-neighbor stacking parameters for **DNA duplexes**.
//!
//! Source: the unified oligonucleotide parameter set of SantaLucia & Hicks
//! (2004), *Annu Rev Biophys Biomol Struct* 33:415-440, with the mismatch
//! refinements of Allawi & SantaLucia (1997) folded into the canonical
//! sixteen Watson-Crick stacks.
//!
//! Conventions:
//! - `dh` is enthalpy in kcal/mol, `ds` is entropy in cal/(mol·K).
//! - Each entry keys the top-strand dinucleotide read 5'→3'; the table is
//!   closed under reverse complement (e.g. `AA` and `TT` carry equal values).
//! - Initiation and symmetry corrections are published alongside the stacks
//!   and exposed here as standalone constants.

use crate::thermo::NnStep;

/// Enthalpy added once per duplex at initiation, kcal/mol.
pub const INIT_DH: f64 = 0.2;

/// Entropy added once per duplex at initiation, cal/(mol·K).
pub const INIT_DS: f64 = -5.7;

/// Entropy correction for a self-complementary duplex, cal/(mol·K).
///
/// Applied on top of [`INIT_DS`] when both strands are the same molecule.
pub const SYM_DS: f64 = -1.4;

/// The sixteen canonical dinucleotide stacks.
pub const NN_STEPS: &[NnStep] = &[
    NnStep { pair: "AA", dh: -7.6, ds: -21.3 },
    NnStep { pair: "AT", dh: -7.2, ds: -20.4 },
    NnStep { pair: "AC", dh: -8.4, ds: -22.4 },
    NnStep { pair: "AG", dh: -7.8, ds: -21.0 },
    NnStep { pair: "TA", dh: -7.2, ds: -21.3 },
    NnStep { pair: "TT", dh: -7.6, ds: -21.3 },
    NnStep { pair: "TC", dh: -8.2, ds: -22.2 },
    NnStep { pair: "TG", dh: -8.5, ds: -22.7 },
    NnStep { pair: "CA", dh: -8.5, ds: -22.7 },
    NnStep { pair: "CT", dh: -7.8, ds: -21.0 },
    NnStep { pair: "CC", dh: -8.0, ds: -19.9 },
    NnStep { pair: "CG", dh: -10.6, ds: -27.2 },
    NnStep { pair: "GA", dh: -8.2, ds: -22.2 },
    NnStep { pair: "GT", dh: -8.4, ds: -22.4 },
    NnStep { pair: "GG", dh: -8.0, ds: -19.9 },
    NnStep { pair: "GC", dh: -9.8, ds: -24.4 },
];

#[cfg(test)]
mod nn_table_tests {
    use super::*;

    #[test]
    fn covers_every_canonical_dinucleotide() {
        for &x in b"ACGT" {
            for &y in b"ACGT" {
                let key = [x, y];
                assert!(
                    NN_STEPS.iter().any(|s| s.pair.as_bytes() == key),
                    "missing stack {}{}",
                    x as char,
                    y as char
                );
            }
        }
        assert_eq!(NN_STEPS.len(), 16);
    }

    #[test]
    fn closed_under_reverse_complement() {
        // AA/TT, AC/GT, AG/CT, CA/TG, GA/TC share values with their
        // reverse complements; palindromic stacks pair with themselves.
        let get = |p: &str| {
            NN_STEPS
                .iter()
                .find(|s| s.pair == p)
                .map(|s| (s.dh, s.ds))
                .unwrap()
        };
        for (a, b) in [("AA", "TT"), ("AC", "GT"), ("AG", "CT"), ("CA", "TG"), ("GA", "TC")] {
            assert_eq!(get(a), get(b), "{a} vs {b}");
        }
    }
}
