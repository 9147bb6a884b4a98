//! Mapping duplex free energies to discrete risk calls.
//!
//! QC consumers don't want kcal/mol, they want "is this primer fine". The
//! cut points are fixed: −7 and below is very strong, −5 strong, −3
//! moderate, anything weaker is noise. Structures that reach a 3' end get
//! a `3'` prefix on the label because they sit where the polymerase needs
//! a clean duplex, and are the cases worth fixing first.
//!
//! This is a pure, total function: any float in, a label out, no failure
//! mode. Non-finite input (the engine's NaN sentinel) means "no structure"
//! and classifies as none/ok.

use core::fmt;

/// How bad a detected structure is for the PCR.
///
/// Ordered: `Ok < Warn < Bad`, so "worst of several calls" is just `max`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Severity {
    Ok,
    Warn,
    Bad,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Ok => write!(f, "ok"),
            Severity::Warn => write!(f, "warn"),
            Severity::Bad => write!(f, "bad"),
        }
    }
}

/// A human-readable risk call derived from a ΔG value.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    /// Display label, e.g. `Strong` or `3' Moderate`.
    pub label: String,
    /// Machine-friendly severity bucket.
    pub severity: Severity,
}

/// Classify a structure's ΔG (kcal/mol) and 3'-proximity into a risk call.
///
/// # Examples
/// ```
/// use primerqc::{classify, Severity};
/// assert_eq!(classify(-8.2, false).label, "Very strong");
/// assert_eq!(classify(-8.2, true).label, "3' Very strong");
/// assert_eq!(classify(f64::NAN, true).severity, Severity::Ok);
/// ```
pub fn classify(dg: f64, touches_three_prime: bool) -> Classification {
    if !dg.is_finite() {
        return Classification {
            label: "None".to_string(),
            severity: Severity::Ok,
        };
    }
    let (base, severity) = if dg <= -7.0 {
        ("Very strong", Severity::Bad)
    } else if dg <= -5.0 {
        ("Strong", Severity::Bad)
    } else if dg <= -3.0 {
        ("Moderate", Severity::Warn)
    } else {
        ("Weak", Severity::Ok)
    };
    let label = if touches_three_prime && severity != Severity::Ok {
        format!("3' {base}")
    } else {
        base.to_string()
    };
    Classification { label, severity }
}

#[cfg(test)]
mod classify_tests {
    use super::*;

    #[test]
    fn thresholds() {
        assert_eq!(classify(-12.0, false).label, "Very strong");
        assert_eq!(classify(-7.0, false).label, "Very strong");
        assert_eq!(classify(-6.9, false).label, "Strong");
        assert_eq!(classify(-5.0, false).label, "Strong");
        assert_eq!(classify(-4.2, false).label, "Moderate");
        assert_eq!(classify(-3.0, false).label, "Moderate");
        assert_eq!(classify(-2.9, false).label, "Weak");
        assert_eq!(classify(0.5, false).label, "Weak");
        assert_eq!(classify(f64::NAN, false).label, "None");
        assert_eq!(classify(f64::INFINITY, false).label, "None");
    }

    #[test]
    fn three_prime_prefix_only_when_it_matters() {
        assert_eq!(classify(-9.0, true).label, "3' Very strong");
        assert_eq!(classify(-5.5, true).label, "3' Strong");
        assert_eq!(classify(-3.5, true).label, "3' Moderate");
        // Weak and absent structures never get the prefix.
        assert_eq!(classify(-1.0, true).label, "Weak");
        assert_eq!(classify(f64::NAN, true).label, "None");
    }

    #[test]
    fn severity_is_monotonic_in_dg() {
        let flagged = [true, false];
        let grid: Vec<f64> = (-120..=0).map(|i| i as f64 / 10.0).collect();
        for &f in &flagged {
            for w in grid.windows(2) {
                let (more_stable, less_stable) = (w[0], w[1]);
                assert!(
                    classify(more_stable, f).severity >= classify(less_stable, f).severity,
                    "{more_stable} vs {less_stable}"
                );
            }
        }
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Bad > Severity::Warn);
        assert!(Severity::Warn > Severity::Ok);
        assert_eq!(Severity::Warn.to_string(), "warn");
    }
}
