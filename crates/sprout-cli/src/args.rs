//! Command-line argument definitions for the Sprout CLI.
//!
//! [`Args`] holds the global options and one [`Command`] per workflow:
//! rendering design exports, registering a component by hand, and scanning
//! a source tree for components.

use clap::{Parser, Subcommand};

/// Command-line arguments for the Sprout compiler
#[derive(Parser, Debug)]
#[command(name = "sprout", author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate or update one component per top-level frame
    Render {
        /// Design JSON (node, file response or nodes response)
        input: String,

        /// Directory receiving `<Name>.jsx` and `<Name>.assets.json`
        #[arg(short, long, default_value = ".")]
        out_dir: String,
    },

    /// Map a design layer name to an existing component
    Register {
        /// Layer name to match, case-insensitively, inside node names
        figma_name: String,

        /// Component identifier
        component: String,

        /// Import path of the component
        path: String,

        /// Extra prop rendered on every use, as `name=value`
        #[arg(long = "prop", value_parser = parse_prop)]
        props: Vec<(String, String)>,
    },

    /// Register every exported component found under a directory
    Scan {
        /// Source root; import paths are relative to it
        dir: String,
    },
}

fn parse_prop(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected `name=value`, got `{raw}`")),
    }
}
