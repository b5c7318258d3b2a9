//! Flags shared across commands and their merge with a config file

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Args;

use crate::{board::Player, config::GameConfig};

/// Search and config-file flags accepted by every command
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// JSON game configuration; flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Random seed for square priorities and the final tie-break
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable alpha-beta pruning
    #[arg(long)]
    pub no_alpha_beta: bool,

    /// Disable symmetry pruning
    #[arg(long)]
    pub no_symmetry: bool,

    /// Milliseconds of search between progress updates
    #[arg(long)]
    pub slice_ms: Option<u64>,
}

impl CommonArgs {
    /// The config file (or defaults) with flag overrides applied
    pub fn resolve(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => GameConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.search.seed = Some(seed);
        }
        if self.no_alpha_beta {
            config.search.alpha_beta_pruning = false;
        }
        if self.no_symmetry {
            config.search.symmetry_pruning = false;
        }
        if let Some(millis) = self.slice_ms {
            config.search.yield_slice_millis = millis;
        }
        Ok(config)
    }
}

pub(crate) fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" | "first" | "p1" => Ok(Player::X),
        "o" | "second" | "p2" => Ok(Player::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}

/// Parse a seating token: `x`, `o`, `both` or `none`
pub(crate) fn parse_computer_seats(value: &str) -> Result<Vec<Player>> {
    match value.trim().to_ascii_lowercase().as_str() {
        "both" => Ok(vec![Player::X, Player::O]),
        "none" => Ok(Vec::new()),
        other => Ok(vec![parse_player_token(other, "--computer")?]),
    }
}
