//! Hairpin loop-entropy penalties.
//!
//! Source: the hairpin-loop free-energy increments of SantaLucia & Hicks
//! (2004), Table 4, evaluated at 37 °C. Loops of 3-9 unpaired bases carry
//! tabulated values; longer loops are extrapolated linearly from the end of
//! the table. The extrapolation constants are empirical approximations, not
//! validated biophysical parameters, and stay configurable through
//! [`crate::ScanOpts`].
//!
//! Loops of fewer than 3 bases cannot close a hairpin; there is no penalty
//! for them because the geometry is unrepresentable.

/// Free-energy penalty for closing a hairpin loop of a given size.
#[derive(Clone, Copy, Debug)]
pub struct LoopPenalty {
    /// Number of unpaired bases in the loop.
    pub len: usize,
    /// Penalty at 37 °C, kcal/mol.
    pub dg: f64,
}

/// Tabulated penalties for loop sizes 3 through 9.
pub const HAIRPIN_LOOP_DG37: &[LoopPenalty] = &[
    LoopPenalty { len: 3, dg: 3.5 },
    LoopPenalty { len: 4, dg: 3.5 },
    LoopPenalty { len: 5, dg: 3.3 },
    LoopPenalty { len: 6, dg: 4.0 },
    LoopPenalty { len: 7, dg: 4.2 },
    LoopPenalty { len: 8, dg: 4.3 },
    LoopPenalty { len: 9, dg: 4.5 },
];

/// Extrapolation intercept for loops longer than the table, kcal/mol.
pub const EXTRAPOLATION_BASE: f64 = 4.6;

/// Extrapolation slope per extra unpaired base, kcal/mol.
pub const EXTRAPOLATION_SLOPE: f64 = 0.1;
