//! CLI argument definitions for pointmap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use pointmap_model::ClassName;

#[derive(Parser)]
#[command(
    name = "pointmap",
    version,
    about = "Resolve and run object-to-object property maps",
    long_about = "Resolve and run object-to-object property maps.\n\n\
                  Classes are described in a JSON schema; routes come from an optional\n\
                  JSON map configuration plus the configured path-finders."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -vvv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the routes resolved between two classes.
    Routes(RoutesArgs),

    /// Map a JSON record onto a new instance of a target class.
    Map(MapArgs),
}

/// Inputs shared by every subcommand.
#[derive(Args)]
pub struct MapSource {
    /// JSON array of class descriptors.
    #[arg(long = "schema", value_name = "FILE")]
    pub schema: PathBuf,

    /// JSON map configuration (default: target-driven guessing only).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct RoutesArgs {
    #[command(flatten)]
    pub map: MapSource,

    /// Source class, e.g. `crm::Contact`.
    #[arg(long = "source", value_name = "CLASS")]
    pub source: ClassName,

    /// Target class.
    #[arg(long = "target", value_name = "CLASS")]
    pub target: ClassName,

    /// Print the routes as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct MapArgs {
    #[command(flatten)]
    pub map: MapSource,

    /// JSON document `{ "class": ..., "properties": { ... } }`.
    #[arg(long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Target class.
    #[arg(long = "target", value_name = "CLASS")]
    pub target: ClassName,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
