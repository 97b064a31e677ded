//! Print the path of the host-specific binary inside an artifact bundle.
//!
//! Usage:
//!   artifact-path lefthook
//!   artifact-path lefthook --repository MyPackage --json
//!
//! The repository name defaults to the last component of the current
//! directory, matching how launchers invoke the resolver from a package
//! checkout. Set ARTIFACT_LOG (e.g. `debug`) to trace the search.

use anyhow::{Context, Result, anyhow};
use artifact_resolver::config::{ENV_LOG, env_non_empty};
use artifact_resolver::{Resolver, ResolverConfig, SearchContext};
use clap::Parser;
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "artifact-path")]
#[command(about = "Resolve the executable for this host inside an artifact bundle")]
struct Cli {
    /// Artifact (and bundle directory) name, e.g. `lefthook`.
    bundle: String,
    /// Repository name used under `.build/artifacts/`; defaults to the current directory name.
    #[arg(long)]
    repository: Option<String>,
    /// Toolchain queried with `-print-target-info` (overrides ARTIFACT_TOOLCHAIN).
    #[arg(long)]
    toolchain: Option<OsString>,
    /// Fail when the selected binary is missing on disk.
    #[arg(long)]
    verify: bool,
    /// Emit a JSON object instead of a bare path.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Resolution<'a> {
    bundle: &'a str,
    repository: &'a str,
    path: PathBuf,
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = env_non_empty(ENV_LOG).unwrap_or_else(|| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ResolverConfig::from_env();
    if let Some(toolchain) = cli.toolchain {
        config.toolchain = toolchain;
    }
    config.verify_exists |= cli.verify;

    let context = SearchContext::from_process().context("inspecting process directories")?;
    let repository = match cli.repository {
        Some(name) => name,
        None => directory_name(&context.working_dir)?,
    };

    let path = Resolver::for_host(&config, context)
        .resolve(&cli.bundle, &repository)
        .with_context(|| format!("unable to resolve the '{}' binary", cli.bundle))?;

    if cli.json {
        let resolution = Resolution {
            bundle: &cli.bundle,
            repository: &repository,
            path,
        };
        println!("{}", serde_json::to_string(&resolution)?);
    } else {
        println!("{}", path.display());
    }
    Ok(())
}

fn directory_name(dir: &Path) -> Result<String> {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("cannot derive a repository name from {}", dir.display()))
}
