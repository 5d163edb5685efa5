//! `hashring` — inspect and route through a consistent hashing ring.
//!
//! # Usage
//!
//! ```text
//! hashring -c ring.toml route user:1 user:2     # owner of each value
//! hashring --node a --node b=40 replicas key -n 2
//! hashring -c ring.toml balance -n 10000        # spread of random keys
//! hashring -c ring.toml describe                # nodes and ring size
//! ```

mod config;
mod telemetry;

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hashring_core::Ring;
use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use config::{CliConfig, parse_node_arg};

/// Length of the random keys generated by `balance`.
const RANDOM_KEY_LEN: usize = 10;

#[derive(Parser)]
#[command(
    name = "hashring",
    version,
    about = "Consistent hashing ring inspector"
)]
struct Cli {
    /// Path to TOML config file.
    #[arg(short, long, global = true, env = "HASHRING_CONFIG")]
    config: Option<PathBuf>,

    /// Extra node(s) to register after the config file's nodes.
    ///
    /// Format: `<key>` or `<key>=<virtual_nodes>`. Can be repeated.
    #[arg(long, global = true)]
    node: Vec<String>,

    /// Override the default virtual-node count.
    #[arg(long, global = true)]
    vnodes: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the owning node of each value.
    Route {
        /// Values to route.
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Print the first N distinct nodes clockwise from a value.
    Replicas {
        /// Value to route.
        value: String,

        /// Number of distinct nodes to collect.
        #[arg(short = 'n', long, default_value = "3")]
        count: usize,
    },

    /// Route random keys and report how evenly they spread.
    Balance {
        /// Number of random keys.
        #[arg(short = 'n', long, default_value = "1000")]
        count: usize,

        /// RNG seed, for reproducible runs.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List registered nodes and ring size.
    Describe,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = CliConfig::load(cli.config.as_deref())?;
    telemetry::init(&config.log.level);

    if let Some(vnodes) = cli.vnodes {
        config.ring.default_virtual_nodes = vnodes;
    }
    for arg in &cli.node {
        config.nodes.push(parse_node_arg(arg)?);
    }

    let ring = Ring::with_nodes(config.nodes, config.ring).context("building ring")?;
    info!(
        nodes = ring.node_count(),
        vnodes = ring.vnode_count(),
        "ring ready"
    );

    match cli.command {
        Commands::Route { values } => {
            for value in &values {
                let owner = ring
                    .lookup(value)
                    .with_context(|| format!("routing {value:?}"))?;
                println!("{value} -> {owner}");
            }
        }
        Commands::Replicas { value, count } => {
            let owners = ring
                .lookup_n(&value, count)
                .with_context(|| format!("routing {value:?}"))?;
            for (rank, owner) in owners.iter().enumerate() {
                println!("{rank}: {owner}");
            }
        }
        Commands::Balance { count, seed } => balance(&ring, count, seed)?,
        Commands::Describe => describe(&ring)?,
    }

    Ok(())
}

/// Route `count` random alphanumeric keys and print per-node totals.
fn balance(ring: &Ring, count: usize, seed: Option<u64>) -> Result<()> {
    let seed = seed.unwrap_or_else(rand::random);
    debug!(seed, count, "generating random keys");
    let mut rng = StdRng::seed_from_u64(seed);

    // Every registered node starts at zero so idle nodes show up.
    let mut distribution: BTreeMap<&str, usize> =
        ring.nodes().keys().map(|k| (k.as_str(), 0)).collect();
    for _ in 0..count {
        let key: String = (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(RANDOM_KEY_LEN)
            .map(char::from)
            .collect();
        let owner = ring.lookup(&key).context("routing random key")?;
        *distribution.entry(owner).or_default() += 1;
    }

    for (node, hits) in &distribution {
        println!("{node}\t{hits}");
    }

    let total: usize = distribution.values().sum();
    let max = distribution.values().copied().max().unwrap_or(0);
    let min = distribution.values().copied().min().unwrap_or(0);
    let mean = total as f64 / distribution.len().max(1) as f64;
    println!("total={total} min={min} max={max} mean={mean:.2} seed={seed}");
    Ok(())
}

/// Print every node with its virtual-node count and metadata.
fn describe(ring: &Ring) -> Result<()> {
    for node in ring.nodes().values() {
        let metadata =
            serde_json::to_string(&node.metadata).context("serializing node metadata")?;
        println!("{}\tvnodes={}\t{metadata}", node.key, node.virtual_nodes);
    }
    println!(
        "nodes={} vnodes={} default_vnodes={}",
        ring.node_count(),
        ring.vnode_count(),
        ring.default_virtual_nodes()
    );
    Ok(())
}
