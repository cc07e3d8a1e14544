//! Command-line interface

pub mod commands;
pub mod output;

use crate::agent::client::{
    DEFAULT_BASE_URL, DEFAULT_REFERER, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS, DEFAULT_TITLE,
};
use crate::settings::Settings;
use clap::{Args, Parser, Subcommand};
use commands::{GenerateCommand, ModelsCommand, ServeCommand, ValidateCrewCommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// Research, write and edit an article on any topic with a crew of AI agents
#[derive(Debug, Parser, Clone)]
#[command(name = "article-crew")]
#[command(version)]
#[command(
    about = "A research/write/edit agent crew that turns a topic into a markdown article",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Crew definition file (defaults to the built-in article crew)
    #[arg(long, global = true, env = "ARTICLE_CREW_FILE")]
    pub crew: Option<PathBuf>,

    #[command(flatten)]
    pub provider: ProviderArgs,
}

/// Model provider settings
#[derive(Debug, Args, Clone)]
pub struct ProviderArgs {
    /// OpenRouter API key
    #[arg(long, global = true, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the chat-completion API
    #[arg(long, global = true, env = "OPENROUTER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Sampling temperature for every stage
    #[arg(
        long,
        global = true,
        env = "ARTICLE_CREW_TEMPERATURE",
        default_value_t = DEFAULT_TEMPERATURE
    )]
    pub temperature: f32,

    /// Timeout for a single model call, in seconds
    #[arg(
        long,
        global = true,
        env = "ARTICLE_CREW_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub timeout_secs: u64,

    /// Sent to the provider as HTTP-Referer
    #[arg(long, global = true, env = "ARTICLE_CREW_REFERER", default_value = DEFAULT_REFERER)]
    pub referer: String,

    /// Sent to the provider as X-Title, also the page title
    #[arg(long, global = true, env = "ARTICLE_CREW_TITLE", default_value = DEFAULT_TITLE)]
    pub title: String,
}

impl ProviderArgs {
    /// Resolve into the settings shared by every run
    pub fn to_settings(&self) -> Settings {
        Settings {
            api_key: self.api_key.clone().filter(|k| !k.trim().is_empty()),
            base_url: self.base_url.clone(),
            temperature: self.temperature,
            timeout_secs: self.timeout_secs,
            referer: self.referer.clone(),
            title: self.title.clone(),
            ..Settings::default()
        }
    }
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Serve the web page
    Serve(ServeCommand),

    /// Generate one article in the terminal
    Generate(GenerateCommand),

    /// List the selectable models
    Models(ModelsCommand),

    /// Validate a crew definition file
    ValidateCrew(ValidateCrewCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
