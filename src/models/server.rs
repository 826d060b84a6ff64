// src/models/server.rs
use serde::{ Deserialize, Serialize };
use std::fmt;
use std::str::FromStr;
use crate::error::StatusError;

/// The games a status can be queried for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Game {
    Minecraft,
    FiveM,
    CsGo,
    Rust,
}

impl Game {
    pub const ALL: [Game; 4] = [Game::Minecraft, Game::FiveM, Game::CsGo, Game::Rust];

    /// Identifier used in requests and cache keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Game::Minecraft => "minecraft",
            Game::FiveM => "fivem",
            Game::CsGo => "csgo",
            Game::Rust => "rust",
        }
    }

    /// Name reported in the `game` field of a status record.
    pub fn display_name(self) -> &'static str {
        match self {
            Game::Minecraft => "Minecraft Java",
            Game::FiveM => "FiveM",
            Game::CsGo => "CS:GO",
            Game::Rust => "Rust",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            Game::Minecraft => 25565,
            Game::FiveM => 30120,
            Game::CsGo => 27015,
            Game::Rust => 28015,
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Game {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Game::ALL.into_iter()
            .find(|game| game.as_str() == s)
            .ok_or_else(|| StatusError::UnsupportedGame(s.to_string()))
    }
}

/// A server to query, as supplied by a caller.
///
/// `game` stays a raw string so that unknown games are reported by the
/// dispatcher rather than rejected while decoding a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDescriptor {
    #[serde(default)]
    pub game: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub port: Option<u16>,
}

impl ServerDescriptor {
    pub fn new(game: impl Into<String>, ip: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            game: game.into(),
            ip: ip.into(),
            port,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_identifiers() {
        for game in Game::ALL {
            assert_eq!(game.as_str().parse::<Game>(), Ok(game));
        }
    }

    #[test]
    fn rejects_unknown_and_mixed_case_names() {
        assert_eq!(
            "unknowngame".parse::<Game>(),
            Err(StatusError::UnsupportedGame("unknowngame".to_string()))
        );
        assert!("Minecraft".parse::<Game>().is_err());
    }

    #[test]
    fn default_ports() {
        assert_eq!(Game::Minecraft.default_port(), 25565);
        assert_eq!(Game::FiveM.default_port(), 30120);
        assert_eq!(Game::CsGo.default_port(), 27015);
        assert_eq!(Game::Rust.default_port(), 28015);
    }

    #[test]
    fn descriptor_fields_default_when_missing() {
        let descriptor: ServerDescriptor = serde_json::from_str(r#"{"game":"rust"}"#).unwrap();
        assert_eq!(descriptor, ServerDescriptor::new("rust", "", None));
    }
}
