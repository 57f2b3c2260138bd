//! RISC-V microarchitecture profile CLI.
//!
//! This binary is the entry point around the catalog. It performs:
//! 1. **Listing:** Print the names of every available profile.
//! 2. **Dry run:** Validate a profile, apply it to the recording engine, print the plan,
//!    and run it through the engine's connectivity check.
//! 3. **User input:** Extra profiles and the system configuration are read from JSON files.
//!
//! Errors are printed to stderr and the process exits with status 1.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uarch_catalog::engine::Engine;
use uarch_catalog::profile::load_profiles;
use uarch_catalog::{ProfileCatalog, ProfileError, RecordingEngine, SystemConfig};

#[derive(Parser, Debug)]
#[command(
    name = "uarch",
    author,
    version,
    about = "Validate and apply RISC-V microarchitecture profiles",
    long_about = "Look up a named CPU profile, validate it, and apply it to the recording engine.\n\nThe built-in profiles are Ariane, BOOM, BlackParrot, Rocket, Shakti-C, and XiangShan.\n\nExamples:\n  uarch --list\n  uarch BOOM\n  uarch Rocket --config system.json --json\n  uarch MyCore --profiles my_cores.json"
)]
struct Cli {
    /// Profile to apply (case-sensitive).
    #[arg(required_unless_present = "list")]
    profile: Option<String>,

    /// List available profiles and exit.
    #[arg(long)]
    list: bool,

    /// JSON file with extra profiles (one object or an array).
    #[arg(long, value_name = "FILE")]
    profiles: Option<PathBuf>,

    /// JSON file with the system configuration.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the plan as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Builds the catalog from the command line and performs the requested action.
fn run(cli: &Cli) -> Result<(), ProfileError> {
    let mut catalog = ProfileCatalog::with_builtins();
    if let Some(path) = &cli.config {
        catalog = catalog.with_config(SystemConfig::load(path)?);
    }
    if let Some(path) = &cli.profiles {
        for profile in load_profiles(path)? {
            catalog.register(profile)?;
        }
    }

    if cli.list {
        for name in catalog.list_profiles() {
            println!("{name}");
        }
        return Ok(());
    }

    let Some(name) = cli.profile.as_deref() else {
        return Ok(());
    };
    let profile = catalog.get_profile(name)?;
    info!(profile = name, "applying profile");

    let mut engine = RecordingEngine::new();
    let applied = catalog.apply(profile, &mut engine)?;
    if cli.json {
        let doc = serde_json::json!({
            "profile": profile,
            "system": applied,
            "plan": engine.ops(),
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!(
            "{}: {} @ {}, {} operations",
            profile.name,
            profile.pipeline_kind,
            profile.clock,
            engine.ops().len()
        );
        print!("{}", engine.plan());
    }

    let outcome = engine.run()?;
    println!(
        "Exiting @ tick {} because {}",
        outcome.final_tick, outcome.cause
    );
    Ok(())
}
