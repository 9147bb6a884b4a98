use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Primerqc CLI
#[derive(Parser)]
#[command(name = "primerqc")]
#[command(version)]
#[command(about = "Primer thermodynamics and secondary-structure QC", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Melting temperature and GC content of a single primer
    Tm {
        /// Primer sequence (junk characters are dropped)
        seq: String,
        /// Monovalent cation concentration (mM)
        #[arg(long, default_value_t = 50.0)]
        na: f64,
        /// Mg2+ concentration (mM)
        #[arg(long, default_value_t = 0.0)]
        mg: f64,
        /// Primer concentration (nM)
        #[arg(long, default_value_t = 500.0)]
        conc: f64,
    },

    /// Self- or cross-dimer check (one sequence checks it against itself)
    Dimer {
        /// First primer
        seq_a: String,
        /// Second primer (omit for a self-dimer check)
        seq_b: Option<String>,
    },

    /// Hairpin check for a single primer
    Hairpin {
        /// Primer sequence
        seq: String,
    },

    /// Batch QC over primer files (FASTA/FASTQ/plain text)
    Screen {
        /// Input files
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Monovalent cation concentration (mM)
        #[arg(long, default_value_t = 50.0)]
        na: f64,
        /// Mg2+ concentration (mM)
        #[arg(long, default_value_t = 0.0)]
        mg: f64,
        /// Primer concentration (nM)
        #[arg(long, default_value_t = 500.0)]
        conc: f64,
        /// Threads (0/None = all)
        #[arg(long)]
        threads: Option<usize>,
        /// Also report pairwise cross-dimers
        #[arg(long)]
        cross: bool,
        /// Emit CSV to stdout
        #[arg(long)]
        csv: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Tm { seq, na, mg, conc } => cmd_tm(&seq, na, mg, conc),

        Commands::Dimer { seq_a, seq_b } => cmd_dimer(&seq_a, seq_b.as_deref()),

        Commands::Hairpin { seq } => cmd_hairpin(&seq),

        Commands::Screen {
            files,
            na,
            mg,
            conc,
            threads,
            cross,
            csv,
        } => {
            let opts = primerqc::screen::ScreenOpts {
                files,
                na_mm: na,
                mg_mm: mg,
                conc_nm: conc,
                threads: threads.filter(|&t| t > 0),
                cross,
                csv,
            };
            primerqc::screen::run_screen(opts)?;
        }
    }

    Ok(())
}

fn cmd_tm(seq: &str, na: f64, mg: f64, conc: f64) {
    let clean = primerqc::normalize(seq);
    let tm = primerqc::melting_temperature(&clean, na, mg, conc);
    let gc = primerqc::gc_percent(&clean);
    let dg = primerqc::duplex_free_energy(&clean, false);

    println!("sequence: {} ({} nt)", clean, clean.len());
    if tm.is_nan() {
        println!("tm: N/A");
    } else {
        println!("tm: {:.1} C (Na+ {} mM, Mg2+ {} mM, {} nM primer)", tm, na, mg, conc);
    }
    if gc.is_nan() {
        println!("gc: N/A");
    } else {
        println!("gc: {:.1}%", gc);
    }
    if dg.is_nan() {
        println!("duplex dG(37): N/A");
    } else {
        println!("duplex dG(37): {:.2} kcal/mol", dg);
    }
}

fn cmd_dimer(seq_a: &str, seq_b: Option<&str>) {
    let b = seq_b.unwrap_or(seq_a);
    match primerqc::scan_dimer(seq_a, b) {
        Some(m) => {
            let class = primerqc::classify(m.dg, m.touches_three_prime);
            println!(
                "dimer: {} ({}) dG={:.2} kcal/mol, {} bp at offset {}",
                class.label, class.severity, m.dg, m.len, m.offset
            );
            println!("{}", m.alignment);
        }
        None => println!("dimer: None (ok)"),
    }
}

fn cmd_hairpin(seq: &str) {
    match primerqc::scan_hairpin(seq) {
        Some(h) => {
            let class = primerqc::classify(h.dg, h.touches_three_prime);
            println!(
                "hairpin: {} ({}) dG={:.2} kcal/mol, {} bp stem / {} nt loop",
                class.label, class.severity, h.dg, h.stem_len, h.loop_len
            );
        }
        None => println!("hairpin: None (ok)"),
    }
}
