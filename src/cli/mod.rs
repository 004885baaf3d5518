// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the candela command-line interface.
//!
//! Four subcommands: `build` turns a JSON record dump into the XML index the
//! browser widget fetches, `inspect` summarizes an existing index file,
//! `search` runs a query against one from the terminal, and `fingerprint`
//! computes the client token for a hand-described browser profile. The
//! search command mirrors the widget exactly: same parser, same filter,
//! same ordering, so a result seen here is the result the page will show.

pub mod display;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "candela",
    about = "Index builder and query tool for the candela site search widget",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build an XML search index from a JSON array of records
    Build {
        /// Input JSON file: [{"title": ..., "content": ..., "url": ...}, ...]
        #[arg(short, long)]
        input: String,

        /// Output path for the XML index
        #[arg(short, long)]
        output: String,
    },

    /// Inspect an XML index file
    Inspect {
        /// Path to the index file
        file: String,
    },

    /// Search an XML index file and display results
    Search {
        /// Path to the index file
        file: String,

        /// Search query
        query: String,

        /// Maximum number of results to display
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Emit matching records as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Compute the fingerprint for a browser profile
    Fingerprint {
        /// User agent string
        #[arg(long)]
        user_agent: String,

        /// BCP 47 language tag
        #[arg(long, default_value = "en-US")]
        language: String,

        /// Screen size as WIDTHxHEIGHT
        #[arg(long, default_value = "1920x1080")]
        screen: String,

        /// Timezone offset in minutes, as Date.getTimezoneOffset() reports it
        /// (UTC minus local, so UTC+1 is -60)
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        timezone_offset: i32,
    },
}
