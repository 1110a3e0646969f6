//! TwinStudio CLI - Command-line interface for deterministic twin synthesis
//!
//! This binary provides commands for synthesizing runs, sweeps and scenario
//! comparisons from request files, and for inspecting request canonicalization.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use twinstudio_spec::RunKind;

use twinstudio_cli::commands;
use twinstudio_cli::commands::template::TemplateOptions;
use twinstudio_cli::logging::init_logging;

/// TwinStudio - Deterministic Digital Twin Synthesis
#[derive(Parser)]
#[command(name = "twinstudio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable info-level logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize a run from a request file
    Run {
        /// Path to the request JSON (`-` for stdin)
        #[arg(short, long)]
        request: String,

        /// Output the full result as JSON
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Compute the parameter sweep grid for a request
    Sweep {
        /// Path to the request JSON (`-` for stdin)
        #[arg(short, long)]
        request: String,

        /// Output the grid as JSON
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Run every variant of a scenario set
    Compare {
        /// Path to the scenario JSON (`-` for stdin)
        #[arg(short, long)]
        scenario: String,

        /// Output the results as JSON
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print the canonical form, derived seeds and digest of a request
    Hash {
        /// Path to the request JSON (`-` for stdin)
        #[arg(short, long)]
        request: String,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a request file without synthesizing
    Validate {
        /// Path to the request JSON (`-` for stdin)
        #[arg(short, long)]
        request: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print a request JSON built from a preset
    Template {
        /// Recipe preset (default, low_noise, high_noise)
        #[arg(long, default_value = "default")]
        preset: String,

        /// Macro to apply after the preset (repeatable)
        #[arg(long = "macro")]
        macros: Vec<String>,

        /// Trial id
        #[arg(long, default_value = "trial_001")]
        trial: String,

        /// Caller seed
        #[arg(long, default_value_t = 0)]
        seed: u32,

        /// Run kind (preview, bake, rollout, sweep)
        #[arg(long, default_value = "preview")]
        run_kind: RunKind,

        /// Calibration tag
        #[arg(long)]
        calibration: Option<String>,

        /// Window start in milliseconds
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        t0: f64,

        /// Window end in milliseconds
        #[arg(long, default_value_t = 1200.0, allow_hyphen_values = true)]
        t1: f64,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// List built-in presets and macros
    Presets {
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            request,
            json,
            pretty,
        } => commands::run::run(&request, json, pretty),
        Commands::Sweep {
            request,
            json,
            pretty,
        } => commands::sweep::run(&request, json, pretty),
        Commands::Compare {
            scenario,
            json,
            pretty,
        } => commands::compare::run(&scenario, json, pretty),
        Commands::Hash { request, json } => commands::hash::run(&request, json),
        Commands::Validate { request, json } => commands::validate::run(&request, json),
        Commands::Template {
            preset,
            macros,
            trial,
            seed,
            run_kind,
            calibration,
            t0,
            t1,
            pretty,
        } => {
            let options = TemplateOptions {
                preset,
                macros,
                trial_id: trial,
                seed,
                run_kind,
                calibration_tag: calibration,
                window: (t0, t1),
            };
            commands::template::run(&options, pretty)
        }
        Commands::Presets { json } => commands::presets::run(json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
