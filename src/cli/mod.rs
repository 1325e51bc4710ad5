//! CLI module for the Mos Eisley Cantina API
//!
//! Provides subcommands:
//! - `serve`: run the HTTP API (default)
//! - `token`: mint a bearer token for local development

pub mod serve;
pub mod token;

use clap::{Parser, Subcommand};

/// Mos Eisley Cantina API - dishes and drinks behind a cached service layer
#[derive(Parser)]
#[command(name = "mos-eisley-cantina")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server (default)
    Serve,

    /// Print a bearer token signed with the configured secret
    Token(token::TokenArgs),
}
