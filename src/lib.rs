#![forbid(unsafe_code)]
//! # primerqc
//!
//! Thermodynamic quality control for **PCR and cloning primers**: a
//! nearest-neighbor melting-temperature and duplex free-energy engine with
//! exhaustive **self-dimer**, **cross-dimer** and **hairpin** scanners and a
//! fixed-threshold risk classifier.
//!
//! ## Highlights
//! - ❗ **No feature flags**: all capabilities are always enabled.
//! - 🧪 **Sentinel errors**: malformed sequence input never panics — junk
//!   characters are silently dropped and unanswerable questions come back
//!   as `NaN`/`None` for callers to branch on.
//! - 🧭 **Deterministic data**: NN stacking and loop-penalty tables are
//!   embedded as `&'static` constants and injected through read-only
//!   parameter structs, so every call site shares one canonical model.
//!
//! Degenerate IUPAC codes are handled throughout, resolved pessimistically:
//! an ambiguous base is scored as whichever concrete base is worst for the
//! primer (most prone to secondary structure).
//!
//! ## Examples
//! ```rust
//! // Tm of an EGFP primer under typical conditions:
//! let tm = primerqc::melting_temperature("ATGGTGAGCAAGGGCGAGGAG", 50.0, 0.0, 500.0);
//! assert!((tm - 61.4).abs() < 0.5);
//! // Self-dimer check on a palindromic oligo:
//! let m = primerqc::scan_dimer("TTGAATTCTT", "TTGAATTCTT").unwrap();
//! assert!(m.dg < -1.0 && m.touches_three_prime);
//! // Turn a free energy into a risk call:
//! assert_eq!(primerqc::classify(m.dg, m.touches_three_prime).label, "3' Moderate");
//! ```
//!
//! ## Version
//! This build is "0.2.0".

pub mod alphabet;
pub mod classify;
pub mod dimer;
pub mod hairpin;
pub mod screen;
pub mod seqio;
pub mod thermo;
pub mod data {
    pub mod loops;
    pub mod nn;
}

pub use alphabet::{base_set, gc_percent, is_complementary, normalize, revcomp};
pub use classify::{classify, Classification, Severity};
pub use dimer::DimerMatch;
pub use hairpin::HairpinMatch;
pub use thermo::NnModel;

use data::loops::LoopPenalty;

/// Crate version string (from `CARGO_PKG_VERSION`).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tunable limits and penalties for the dimer/hairpin scanners.
///
/// The defaults are the accurate configuration: bubble tolerance on and
/// loop-entropy correction driven by the table in [`data::loops`]. The
/// bubble penalty and loop extrapolation are empirical constants carried
/// from primer-QC practice, kept configurable rather than re-derived.
#[derive(Clone, Copy, Debug)]
pub struct ScanOpts {
    /// Minimum span of a reportable dimer run, bases.
    pub min_run: usize,
    /// Runs must be more stable than this to be reported, kcal/mol.
    pub dg_floor: f64,
    /// Cost of bridging one mismatched base between two islands, kcal/mol.
    pub bubble_penalty: f64,
    /// Minimum paired stem length for a hairpin.
    pub min_stem: usize,
    /// Minimum unpaired loop length for a hairpin.
    pub min_loop: usize,
    /// A dimer run "touches 3'" within this many bases of a terminus.
    pub dimer_end_window: usize,
    /// A hairpin "touches 3'" within this many bases of the 3' end.
    pub hairpin_end_window: usize,
    /// Loop-closure penalty table (sizes 3-9 by default).
    pub loop_dg: &'static [LoopPenalty],
    /// Extrapolation intercept for loops past the table, kcal/mol.
    pub loop_base: f64,
    /// Extrapolation slope per extra unpaired base, kcal/mol.
    pub loop_slope: f64,
}

impl Default for ScanOpts {
    fn default() -> Self {
        Self {
            min_run: 3,
            dg_floor: -1.0,
            bubble_penalty: 3.5,
            min_stem: 3,
            min_loop: 3,
            dimer_end_window: 3,
            hairpin_end_window: 5,
            loop_dg: data::loops::HAIRPIN_LOOP_DG37,
            loop_base: data::loops::EXTRAPOLATION_BASE,
            loop_slope: data::loops::EXTRAPOLATION_SLOPE,
        }
    }
}

/// Candidate preference shared by the dimer and hairpin scanners.
///
/// More negative ΔG wins; at exactly equal ΔG a candidate touching a 3'
/// end beats one that does not, because 3'-proximal structure is the kind
/// that stalls extension and must not be masked by an interior run.
pub fn stronger(dg_new: f64, touches_new: bool, dg_best: f64, touches_best: bool) -> bool {
    dg_new < dg_best || (dg_new == dg_best && touches_new && !touches_best)
}

/// Melting temperature in °C for a primer under the given conditions
/// (Na+/Mg2+ in mM, primer concentration in nM); NaN when unanswerable.
pub fn melting_temperature(seq: &str, na_mm: f64, mg_mm: f64, conc_nm: f64) -> f64 {
    thermo::melting_temperature(
        &NnModel::default(),
        normalize(seq).as_bytes(),
        na_mm,
        mg_mm,
        conc_nm,
    )
}

/// Duplex free energy at 37 °C in kcal/mol; NaN when unanswerable.
///
/// Set `symmetric` when the duplex forms between two copies of the same
/// molecule (self-dimer) to apply the self-complementary entropy
/// correction.
pub fn duplex_free_energy(seq: &str, symmetric: bool) -> f64 {
    thermo::duplex_dg37(&NnModel::default(), normalize(seq).as_bytes(), symmetric)
}

/// Strongest dimer between two primers (pass the same sequence twice for a
/// self-dimer check); `None` when nothing reaches the reporting floor.
pub fn scan_dimer(seq_a: &str, seq_b: &str) -> Option<DimerMatch> {
    dimer::scan_dimer(&NnModel::default(), &ScanOpts::default(), seq_a, seq_b)
}

/// Strongest hairpin within one primer; `None` when nothing folds.
pub fn scan_hairpin(seq: &str) -> Option<HairpinMatch> {
    hairpin::scan_hairpin(&NnModel::default(), &ScanOpts::default(), seq)
}
