//! CLI module - Command-line interface for Placeshare
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Placeshare - shared places with text search and autocomplete
#[derive(Parser)]
#[command(name = "placeshare")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    #[command(alias = "web", alias = "daemon")]
    Serve,

    /// Search places by name, city, description or address
    #[command(alias = "s")]
    Search {
        /// Search text
        #[arg(required = true)]
        query: Vec<String>,
        /// Maximum number of results
        #[arg(long, short)]
        limit: Option<u64>,
        /// Include soft-deleted places
        #[arg(long)]
        deleted: bool,
    },

    /// Show autocomplete suggestions for partial text
    Suggest {
        /// Partial text
        #[arg(required = true)]
        query: Vec<String>,
        /// Number of suggestions (1-20)
        #[arg(long, short)]
        limit: Option<u64>,
    },

    /// Add a place
    #[command(alias = "a")]
    Add {
        /// Place name
        #[arg(required = true)]
        name: Vec<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        postal_code: Option<String>,
        #[arg(long)]
        country: Option<String>,
        /// Author user ID
        #[arg(long, default_value = "1")]
        user: i32,
    },

    /// Soft-delete a place
    #[command(alias = "rm", alias = "r")]
    Remove {
        /// Place ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Restore a soft-deleted place
    Restore {
        /// Place ID
        id: String,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
