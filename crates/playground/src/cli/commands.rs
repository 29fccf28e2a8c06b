//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Browse and edit records of a connected business system.
#[derive(Parser, Debug)]
#[command(name = "playground")]
#[command(about = "Connector playground - browse, pin and edit connector records")]
#[command(version)]
pub struct Cli {
    /// TOML configuration file (defaults to PLAYGROUND_* environment variables)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which connection to open.
#[derive(Args, Debug, Clone)]
pub struct Target {
    /// Tenant identity owning the connection
    #[arg(long, env = "PLAYGROUND_OWNER_ID")]
    pub owner: String,

    /// Connector identifier (e.g. hubspot, salesforce)
    #[arg(long, env = "PLAYGROUND_CONNECTOR")]
    pub connector: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the models that support record listing
    Models {
        #[command(flatten)]
        target: Target,
    },

    /// Show field metadata for a model
    Fields {
        #[command(flatten)]
        target: Target,

        /// Model to describe (defaults to the first listable model)
        #[arg(short, long)]
        model: Option<String>,

        /// Bypass the field metadata cache
        #[arg(long)]
        refresh: bool,
    },

    /// List records as a table
    List {
        #[command(flatten)]
        target: Target,

        /// Model to list (defaults to the first listable model)
        #[arg(short, long)]
        model: Option<String>,

        /// Number of records to fetch
        #[arg(short, long)]
        limit: Option<u32>,

        /// Field to always show as a column (repeatable)
        #[arg(long = "pin", value_name = "FIELD")]
        pins: Vec<String>,
    },

    /// Update one field of one record
    Edit {
        #[command(flatten)]
        target: Target,

        /// Model the record belongs to (defaults to the first listable model)
        #[arg(short, long)]
        model: Option<String>,

        /// Number of records to load when looking up the record
        #[arg(short, long)]
        limit: Option<u32>,

        /// Record identifier
        #[arg(long)]
        record: String,

        /// Field identifier
        #[arg(long)]
        field: String,

        /// New value, as typed into the cell
        #[arg(long)]
        value: String,
    },
}
