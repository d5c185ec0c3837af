// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! RAI CLI Tool
//!
//! Command-line interface for inspecting saved error analysis state.

mod config;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use config::RaiCliConfig;
use rai_core::ReportSchema;
use rai_core::error_analysis::store;
use rai_core::fs::DirectoryManager;
use std::path::PathBuf;
use std::process;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "rai")]
#[command(about = "RAI - Error analysis state inspector")]
#[command(version = "0.1.0")]
struct Cli {
    /// TOML configuration file (falls back to RAI_CONFIG)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Saved error analysis directory (falls back to RAI_STATE_DIR)
    #[arg(long, short = 's', global = true)]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List persisted error analysis configs
    List,
    /// Validate every persisted report against the report schema
    Validate,
    /// Print one persisted report
    Show {
        /// Entry position as printed by `list`
        index: usize,
    },
    /// Inspect the CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration
    Show,
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = match RaiCliConfig::resolve_config(cli.config, cli.state_dir) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to resolve configuration: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::List => handle_list(&config),
        Commands::Validate => handle_validate(&config),
        Commands::Show { index } => handle_show(&config, index),
        Commands::Config { command: ConfigCommands::Show } => handle_config_show(&config),
    };

    if let Err(e) = result {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn entries(config: &RaiCliConfig) -> anyhow::Result<Vec<DirectoryManager>> {
    let layout = config.settings().layout;
    let names = DirectoryManager::list_sub_directories(&config.state_dir).with_context(|| format!("reading {}", config.state_dir.display()))?;
    Ok(names
        .into_iter()
        .map(|name| DirectoryManager::with_sub_directory(&config.state_dir, name, layout.clone()))
        .collect())
}

fn handle_list(config: &RaiCliConfig) -> anyhow::Result<()> {
    let entries = entries(config)?;

    if entries.is_empty() {
        println!("No error analysis entries found in '{}'", config.state_dir.display());
    } else {
        println!("Error analysis entries in '{}':", config.state_dir.display());
        for (index, entry) in entries.iter().enumerate() {
            let saved = store::read_config(entry)?;
            let filter_features = saved.filter_features.as_ref().map_or_else(|| "-".to_string(), |features| features.join(","));
            println!(
                "  [{index}] {} computed={} max_depth={} num_leaves={} min_child_samples={} filter_features={}",
                entry.sub_directory_name(),
                saved.is_computed,
                saved.max_depth,
                saved.num_leaves,
                saved.min_child_samples,
                filter_features
            );
        }
    }

    info!("Listed {} error analysis entries", entries.len());
    Ok(())
}

fn handle_validate(config: &RaiCliConfig) -> anyhow::Result<()> {
    let settings = config.settings();
    let schema = ReportSchema::resolve(settings.schema_path.as_deref())?;
    let entries = entries(config)?;
    let mut failures = 0;

    for entry in &entries {
        let outcome = store::read_config(entry).and_then(|_| store::read_report_value(entry)).and_then(|report| schema.validate(&report));
        match outcome {
            Ok(()) => println!("  {} ok", entry.sub_directory_name()),
            Err(e) => {
                failures += 1;
                println!("  {} invalid: {}", entry.sub_directory_name(), e);
                warn!("Entry {} failed validation: {}", entry.sub_directory_name(), e);
            }
        }
    }

    info!("Validated {} error analysis entries, {} failed", entries.len(), failures);
    if failures > 0 {
        bail!("{failures} of {} entries failed validation", entries.len());
    }
    println!("All {} entries valid", entries.len());
    Ok(())
}

fn handle_show(config: &RaiCliConfig, index: usize) -> anyhow::Result<()> {
    let entries = entries(config)?;
    let Some(entry) = entries.get(index) else {
        bail!("No entry at index {index}, found {} entries", entries.len());
    };

    let report = store::read_report_value(entry)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    info!("Showed error analysis entry {}", entry.sub_directory_name());
    Ok(())
}

fn handle_config_show(config: &RaiCliConfig) -> anyhow::Result<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
