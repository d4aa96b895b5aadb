//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::Parser;
use scotus_ai::anthropic::{DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use thiserror::Error;

pub const DEFAULT_CASES_PATH: &str = "agents/scotus-tracker/cases.json";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ANTHROPIC_API_KEY not set")]
    MissingCredential,
}

/// Research current SCOTUS case statuses and update the tracker dataset.
#[derive(Debug, Parser)]
#[command(name = "scotus-tracker", version)]
pub struct Args {
    /// Path to the tracker's cases.json.
    #[arg(long, env = "SCOTUS_CASES_PATH", default_value = DEFAULT_CASES_PATH)]
    pub cases: PathBuf,

    /// Model used for research.
    #[arg(long, env = "SCOTUS_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Upper bound on response tokens.
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    /// Messages API base URL.
    #[arg(long, env = "ANTHROPIC_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub api_base: String,

    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Run the full update but do not write cases.json.
    #[arg(long)]
    pub dry_run: bool,
}

/// Validated settings for one run.
#[derive(Debug)]
pub struct Config {
    pub cases_path: PathBuf,
    pub model: String,
    pub max_tokens: u32,
    pub api_base: String,
    pub api_key: String,
    pub dry_run: bool,
}

impl Config {
    /// Resolve arguments into a run configuration. Performs no I/O.
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let api_key = args
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingCredential)?;
        Ok(Self {
            cases_path: args.cases,
            model: args.model,
            max_tokens: args.max_tokens,
            api_base: args.api_base,
            api_key,
            dry_run: args.dry_run,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("scotus-tracker").chain(argv.iter().copied()))
            .unwrap()
    }

    #[test]
    fn explicit_flags_are_used() {
        let args = parse(&[
            "--cases",
            "data/cases.json",
            "--model",
            "claude-test",
            "--max-tokens",
            "2048",
            "--api-base",
            "http://localhost:9000",
            "--api-key",
            "sk-test",
            "--dry-run",
        ]);
        let config = Config::from_args(args).unwrap();
        assert_eq!(config.cases_path, PathBuf::from("data/cases.json"));
        assert_eq!(config.model, "claude-test");
        assert_eq!(config.max_tokens, 2048);
        assert_eq!(config.api_base, "http://localhost:9000");
        assert_eq!(config.api_key, "sk-test");
        assert!(config.dry_run);
    }

    #[test]
    fn missing_key_is_config_error() {
        let mut args = parse(&["--cases", "/nonexistent/cases.json"]);
        args.api_key = None;
        assert_eq!(
            Config::from_args(args).unwrap_err(),
            ConfigError::MissingCredential
        );
    }

    #[test]
    fn blank_key_is_config_error() {
        let mut args = parse(&[]);
        args.api_key = Some("  ".into());
        assert_eq!(
            Config::from_args(args).unwrap_err(),
            ConfigError::MissingCredential
        );
    }

    #[test]
    fn args_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
