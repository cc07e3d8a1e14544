//! CLI command definitions

use clap::Args;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Serve the web page
#[derive(Debug, Args, Clone)]
pub struct ServeCommand {
    /// Address to listen on
    #[arg(long, env = "ARTICLE_CREW_BIND", default_value = "127.0.0.1:8501")]
    pub bind: SocketAddr,
}

/// Generate one article
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Topic of the article
    #[arg(short, long)]
    pub topic: String,

    /// Model to use (defaults to the first listed model)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Write the markdown to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// List the selectable models
#[derive(Debug, Args, Clone)]
pub struct ModelsCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Validate a crew definition
#[derive(Debug, Args, Clone)]
pub struct ValidateCrewCommand {
    /// Path to crew YAML file
    #[arg(short, long)]
    pub file: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
