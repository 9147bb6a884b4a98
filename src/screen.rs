//! Batch QC over primer sets.
//!
//! Loads every primer from the input files, computes the per-primer panel
//! (length, GC%, Tm, hairpin, self-dimer) and optionally the pairwise
//! cross-dimer matrix, in parallel on a local Rayon pool, and renders the
//! results as a polars DataFrame (pretty table or CSV on stdout).
//!
//! Row computation is split out as pure functions ([`qc_row`],
//! [`cross_rows`]) so the scoring logic is testable without touching IO.

use std::path::PathBuf;

use anyhow::Result;
use polars::prelude::*;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::classify::{classify, Severity};
use crate::dimer::scan_dimer;
use crate::hairpin::scan_hairpin;
use crate::seqio::{read_primers, PrimerRecord};
use crate::thermo::{melting_temperature, NnModel};
use crate::{gc_percent, normalize, ScanOpts};

/// Options for a batch screen run.
#[derive(Clone, Debug)]
pub struct ScreenOpts {
    /// Input files (FASTA/FASTQ/plain text).
    pub files: Vec<PathBuf>,
    /// Monovalent cation concentration, mM.
    pub na_mm: f64,
    /// Divalent (Mg2+) concentration, mM.
    pub mg_mm: f64,
    /// Primer concentration, nM.
    pub conc_nm: f64,
    /// Threads (None = all logical cores).
    pub threads: Option<usize>,
    /// Also compute the pairwise cross-dimer matrix.
    pub cross: bool,
    /// Emit CSV to stdout instead of a pretty table.
    pub csv: bool,
}

/// One primer's QC panel.
#[derive(Clone, Debug)]
pub struct QcRow {
    pub name: String,
    pub len: usize,
    pub gc_pct: f64,
    pub tm_c: f64,
    pub hairpin_dg: f64,
    pub hairpin: String,
    pub self_dimer_dg: f64,
    pub self_dimer: String,
    pub status: Severity,
}

/// One primer pair's cross-dimer call.
#[derive(Clone, Debug)]
pub struct CrossRow {
    pub a: String,
    pub b: String,
    pub dg: f64,
    pub label: String,
    pub severity: Severity,
}

fn round2(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}

/// Compute the QC panel for a single primer.
pub fn qc_row(
    model: &NnModel,
    scan: &ScanOpts,
    primer: &PrimerRecord,
    na_mm: f64,
    mg_mm: f64,
    conc_nm: f64,
) -> QcRow {
    let seq = normalize(&primer.seq);
    let tm = melting_temperature(model, seq.as_bytes(), na_mm, mg_mm, conc_nm);

    let (hp_dg, hp_touch) = scan_hairpin(model, scan, &seq)
        .map_or((f64::NAN, false), |h| (h.dg, h.touches_three_prime));
    let hp_class = classify(hp_dg, hp_touch);

    let (sd_dg, sd_touch) = scan_dimer(model, scan, &seq, &seq)
        .map_or((f64::NAN, false), |m| (m.dg, m.touches_three_prime));
    let sd_class = classify(sd_dg, sd_touch);

    QcRow {
        name: primer.name.clone(),
        len: seq.len(),
        gc_pct: round2(gc_percent(&seq)),
        tm_c: round2(tm),
        hairpin_dg: round2(hp_dg),
        hairpin: hp_class.label,
        self_dimer_dg: round2(sd_dg),
        self_dimer: sd_class.label,
        status: hp_class.severity.max(sd_class.severity),
    }
}

/// Cross-dimer calls for every unordered primer pair.
pub fn cross_rows(model: &NnModel, scan: &ScanOpts, primers: &[PrimerRecord]) -> Vec<CrossRow> {
    let mut pairs = Vec::new();
    for i in 0..primers.len() {
        for j in i + 1..primers.len() {
            pairs.push((i, j));
        }
    }
    pairs
        .par_iter()
        .map(|&(i, j)| {
            let (dg, touch) = scan_dimer(model, scan, &primers[i].seq, &primers[j].seq)
                .map_or((f64::NAN, false), |m| (m.dg, m.touches_three_prime));
            let class = classify(dg, touch);
            CrossRow {
                a: primers[i].name.clone(),
                b: primers[j].name.clone(),
                dg: round2(dg),
                label: class.label,
                severity: class.severity,
            }
        })
        .collect()
}

fn qc_df(rows: &[QcRow]) -> PolarsResult<DataFrame> {
    df!(
        "primer"        => rows.iter().map(|r| r.name.clone()).collect::<Vec<_>>(),
        "length"        => rows.iter().map(|r| r.len as u64).collect::<Vec<_>>(),
        "gc_pct"        => rows.iter().map(|r| r.gc_pct).collect::<Vec<_>>(),
        "tm_c"          => rows.iter().map(|r| r.tm_c).collect::<Vec<_>>(),
        "hairpin_dg"    => rows.iter().map(|r| r.hairpin_dg).collect::<Vec<_>>(),
        "hairpin"       => rows.iter().map(|r| r.hairpin.clone()).collect::<Vec<_>>(),
        "self_dimer_dg" => rows.iter().map(|r| r.self_dimer_dg).collect::<Vec<_>>(),
        "self_dimer"    => rows.iter().map(|r| r.self_dimer.clone()).collect::<Vec<_>>(),
        "status"        => rows.iter().map(|r| r.status.to_string()).collect::<Vec<_>>(),
    )
}

fn cross_df(rows: &[CrossRow]) -> PolarsResult<DataFrame> {
    df!(
        "primer_a" => rows.iter().map(|r| r.a.clone()).collect::<Vec<_>>(),
        "primer_b" => rows.iter().map(|r| r.b.clone()).collect::<Vec<_>>(),
        "dimer_dg" => rows.iter().map(|r| r.dg).collect::<Vec<_>>(),
        "dimer"    => rows.iter().map(|r| r.label.clone()).collect::<Vec<_>>(),
        "status"   => rows.iter().map(|r| r.severity.to_string()).collect::<Vec<_>>(),
    )
}

fn emit(mut df: DataFrame, csv: bool) -> Result<()> {
    if csv {
        let w = CsvWriter::new(std::io::stdout());
        w.include_header(true).finish(&mut df)?;
    } else {
        // Configure Polars display to show all columns and full cell width.
        // These env vars are read by Polars' pretty-printer (fmt feature).
        std::env::set_var("POLARS_FMT_TABLE_FORMATTING", "UTF8_FULL");
        std::env::set_var("POLARS_FMT_MAX_COLS", "100000");
        std::env::set_var("POLARS_FMT_MAX_ROWS", "1000000");
        std::env::set_var("POLARS_FMT_STR_LEN", "100000");
        println!("{}", df);
    }
    Ok(())
}

/// Run a batch screen: load, score in parallel, print.
pub fn run_screen(opts: ScreenOpts) -> Result<()> {
    let mut primers: Vec<PrimerRecord> = Vec::new();
    for f in &opts.files {
        primers.extend(read_primers(f)?);
    }

    let threads = opts.threads.unwrap_or_else(num_cpus::get).max(1);
    eprintln!(
        "screen: primers={} | threads={} | Na+={}mM Mg2+={}mM conc={}nM",
        primers.len(),
        threads,
        opts.na_mm,
        opts.mg_mm,
        opts.conc_nm
    );

    let model = NnModel::default();
    let scan = ScanOpts::default();
    let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;

    let rows: Vec<QcRow> = pool.install(|| {
        primers
            .par_iter()
            .map(|p| qc_row(&model, &scan, p, opts.na_mm, opts.mg_mm, opts.conc_nm))
            .collect()
    });
    emit(qc_df(&rows)?, opts.csv)?;

    if opts.cross {
        let pairs = pool.install(|| cross_rows(&model, &scan, &primers));
        if !opts.csv {
            eprintln!("cross-dimer pairs:");
        }
        emit(cross_df(&pairs)?, opts.csv)?;
    }

    Ok(())
}
