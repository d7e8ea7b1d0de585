//! CLI for the navicon favicon tools.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use navicon_core::config;
use navicon_core::store::Store;
use std::path::PathBuf;

use commands::{
    run_add, run_export_icon, run_list, run_remove, run_resolve, run_serve, run_update,
};

/// Top-level CLI for navicon.
#[derive(Debug, Parser)]
#[command(name = "navicon")]
#[command(about = "navicon: fetch, store and serve site icons for a bookmark catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Add a site to the catalog.
    Add {
        /// Display title.
        title: String,
        /// Site URL.
        url: String,
    },

    /// List catalog entries.
    List,

    /// Remove a catalog entry by ID (its stored icon is kept).
    Remove {
        /// Entry identifier.
        id: i64,
    },

    /// Resolve and store the icon for a single page URL.
    Resolve {
        /// Page URL.
        url: String,
        /// Attach the resolved icon to this catalog entry.
        #[arg(long, value_name = "ID")]
        entry: Option<i64>,
    },

    /// Resolve icons for catalog entries that have none.
    Update {
        /// Maximum number of entries to process (defaults to `batch_limit` from config).
        #[arg(long, value_name = "N")]
        limit: Option<u32>,
        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Write a stored icon blob to a file.
    ExportIcon {
        /// Icon identifier.
        id: i64,
        /// Destination file.
        path: PathBuf,
    },

    /// Serve stored icons and the update trigger over HTTP.
    Serve {
        /// Address to bind (defaults to `listen_addr` from config).
        #[arg(long, value_name = "ADDR")]
        listen: Option<String>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let store = Store::open(&cfg).await?;

        match cli.command {
            CliCommand::Add { title, url } => run_add(&store, &title, &url).await?,
            CliCommand::List => run_list(&store).await?,
            CliCommand::Remove { id } => run_remove(&store, id).await?,
            CliCommand::Resolve { url, entry } => run_resolve(&store, &cfg, &url, entry).await?,
            CliCommand::Update { limit, json } => run_update(&store, &cfg, limit, json).await?,
            CliCommand::ExportIcon { id, path } => run_export_icon(&store, id, &path).await?,
            CliCommand::Serve { listen } => {
                let addr = listen.unwrap_or_else(|| cfg.listen_addr.clone());
                run_serve(store, &cfg, &addr).await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
