use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use deporder::export::{self, CycleInfo, ExportFormat, OrderReport};
use deporder::graph::Orderer;
use deporder::parser::{self, Manifest};

#[derive(Parser)]
#[command(name = "deporder")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version = "0.1.0")]
#[command(about = "Deterministic dependency ordering with cycle detection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the units of a manifest in dependency order
    Order {
        /// Path to the manifest file
        manifest: PathBuf,

        /// Unit to start from (overrides the manifest's anchor)
        #[arg(short, long)]
        anchor: Option<String>,

        /// Output format: text, json, csv or markdown
        #[arg(short, long, default_value = "text")]
        format: ExportFormat,

        /// Fail if the dependencies contain a cycle
        #[arg(long)]
        strict: bool,
    },
    /// Check a manifest for circular dependencies
    Check {
        /// Path to the manifest file
        manifest: PathBuf,
    },
    /// Show version information
    Version,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Order {
            manifest,
            anchor,
            format,
            strict,
        }) => {
            let manifest = load_manifest(&manifest)?;
            let orderer = build_orderer(&manifest, anchor.or_else(|| manifest.anchor.clone()))?;
            if strict {
                ensure_acyclic(&orderer)?;
            }
            ensure_anchor_reach(&orderer, strict)?;
            let report = OrderReport::new(manifest.display_name(), &orderer);
            export::export(format, &report, &mut io::stdout().lock())
                .context("failed to write report")?;
        }
        Some(Commands::Check { manifest }) => {
            let manifest = load_manifest(&manifest)?;
            let orderer = build_orderer(&manifest, manifest.anchor.clone())?;
            ensure_acyclic(&orderer)?;
            println!(
                "{}: {} units, no circular dependencies",
                manifest.display_name(),
                manifest.node_count()
            );
        }
        Some(Commands::Version) => {
            println!("deporder v{}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            println!("deporder - Deterministic dependency ordering");
            println!("Run 'deporder order <manifest>' to print a processing order");
            println!("Run 'deporder --help' for more information");
        }
    }

    Ok(())
}

fn load_manifest(path: &Path) -> Result<Manifest> {
    parser::load(path).with_context(|| format!("failed to load manifest {}", path.display()))
}

fn build_orderer(manifest: &Manifest, anchor: Option<String>) -> Result<Orderer<String>> {
    let graph = manifest
        .to_graph()
        .context("manifest does not describe a valid dependency graph")?;

    match anchor {
        Some(anchor) => Orderer::with_anchor(graph, &anchor)
            .with_context(|| format!("cannot anchor the order at '{}'", anchor)),
        None => Ok(Orderer::new(graph)),
    }
}

/// An anchor that misses part of the graph leaves the rest of the order
/// tied to manifest order. Strict mode rejects that; otherwise it is logged.
fn ensure_anchor_reach(orderer: &Orderer<String>, strict: bool) -> Result<()> {
    let Some(anchor) = orderer.anchor() else {
        return Ok(());
    };
    if strict {
        orderer
            .anchored_comparator()
            .with_context(|| format!("order is not fully anchored at '{}'", anchor))?;
    } else if !orderer.explored_from_anchor() {
        tracing::warn!(
            anchor = %anchor,
            "anchor does not reach every unit; the remaining units follow manifest order"
        );
    }
    Ok(())
}

fn ensure_acyclic(orderer: &Orderer<String>) -> Result<()> {
    if let Some(nodes) = orderer.cycle_witness() {
        bail!("circular dependency: {}", CycleInfo { nodes }.cycle_path());
    }
    Ok(())
}
