//! The `gradepoint` command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{ArgGroup, Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;

#[derive(Parser)]
#[command(name = "gradepoint", version, about = "Term and cumulative GPA calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate term and cumulative GPA from a term sheet
    Calc {
        /// Path to a .toml term sheet
        #[arg(long)]
        term: PathBuf,

        /// Previous cumulative GPA (overrides the sheet's [prior] section)
        #[arg(long)]
        prev_gpa: Option<Decimal>,

        /// Previous credits earned
        #[arg(long)]
        prev_credits: Option<Decimal>,

        /// Previous quality points; used instead of GPA × credits when given
        #[arg(long)]
        prev_qp: Option<Decimal>,

        /// Output format: table, json, csv, html, markdown, all
        #[arg(long, default_value = "table")]
        format: String,

        /// Write report files instead of printing; defaults to the configured output_dir
        #[arg(long, value_name = "DIR")]
        output: Option<Option<PathBuf>>,

        /// Decimal places for displayed figures
        #[arg(long)]
        precision: Option<u32>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Convert a single score, letter or grade point
    #[command(group(
        ArgGroup::new("value")
            .required(true)
            .args(["score", "letter", "point"])
    ))]
    Grade {
        /// Numeric score (0-100)
        #[arg(long, allow_hyphen_values = true)]
        score: Option<String>,

        /// Letter grade (A, A-, B+, B, B-, C+, C, C-, F)
        #[arg(long)]
        letter: Option<String>,

        /// Raw grade point to show as a letter
        #[arg(long, allow_hyphen_values = true)]
        point: Option<Decimal>,
    },

    /// Show the grading scale
    Scale,

    /// Validate term sheet TOML files
    Validate {
        /// Path to a term sheet file or directory
        #[arg(long)]
        term: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example term sheet
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradepoint_core=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Calc {
            term,
            prev_gpa,
            prev_credits,
            prev_qp,
            format,
            output,
            precision,
            config,
        } => commands::calc::execute(commands::calc::CalcArgs {
            term,
            prev_gpa,
            prev_credits,
            prev_qp,
            format,
            output,
            precision,
            config,
        }),
        Commands::Grade {
            score,
            letter,
            point,
        } => commands::grade::execute(score, letter, point),
        Commands::Scale => commands::scale::execute(),
        Commands::Validate { term, config } => commands::validate::execute(term, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
