use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command line interface for FinGallery.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "fingallery",
    author,
    version,
    about = "Finance dashboard gallery with swappable visual styles"
)]
pub struct Cli {
    /// Optional path to a configuration file (TOML, YAML, JSON).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Named profile to load (e.g. demo, presentation).
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Open the dashboard for this style slug instead of the gallery.
    #[arg(short, long)]
    pub style: Option<String>,

    /// Print the selected page as text instead of opening a window.
    #[arg(long)]
    pub headless: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the registered dashboard styles.
    Styles,
    /// Show or change the persisted light/dark preference.
    Theme {
        #[arg(value_enum, default_value = "show")]
        action: ThemeAction,
    },
    /// Print the mock dashboard snapshot as JSON.
    Snapshot {
        /// Pretty-print the JSON output.
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeAction {
    Show,
    Light,
    Dark,
    Toggle,
}
