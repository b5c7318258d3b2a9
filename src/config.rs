//! Game configuration

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, board::Player, search::SearchConfig};

/// Board geometry, seating and search settings for one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub side: usize,
    pub win_length: usize,
    /// Who moves first
    pub first_player: Player,
    /// Seats played by the computer; the rest are human
    pub computer: Vec<Player>,
    pub search: SearchConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            side: 3,
            win_length: 3,
            first_player: Player::X,
            computer: vec![Player::O],
            search: SearchConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn with_geometry(mut self, side: usize, win_length: usize) -> Self {
        self.side = side;
        self.win_length = win_length;
        self
    }

    pub fn with_first_player(mut self, player: Player) -> Self {
        self.first_player = player;
        self
    }

    pub fn with_computer(mut self, seats: impl IntoIterator<Item = Player>) -> Self {
        self.computer = seats.into_iter().collect();
        self
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn is_computer(&self, player: Player) -> bool {
        self.computer.contains(&player)
    }

    /// Load from a JSON file; missing keys take their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config {}", path.display()),
            source,
        })?;
        let config: GameConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create config {}", path.display()),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Reject seatings that cannot describe a game
    pub fn validate(&self) -> Result<()> {
        if self.computer.len() > 2
            || (self.computer.len() == 2 && self.computer[0] == self.computer[1])
        {
            return Err(Error::InvalidConfiguration {
                message: format!("computer seats {:?} list a player twice", self.computer),
            });
        }
        Ok(())
    }
}
