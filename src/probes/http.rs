// src/probes/http.rs
use log::debug;
use reqwest::StatusCode;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use crate::models::server::Game;
use crate::models::status::StatusRecord;
use super::url_host;

/// Where a game publishes its status over HTTP and how the body maps onto a record.
#[derive(Debug, Clone, Copy)]
pub struct HttpProfile {
    pub path: &'static str,
    /// `None` when the body lacks something the mapping depends on.
    pub map: fn(Game, Value) -> Option<StatusRecord>,
}

pub const FIVEM: HttpProfile = HttpProfile { path: "/info.json", map: map_fivem };
pub const CSGO: HttpProfile = HttpProfile { path: "/status", map: map_csgo };
pub const RUST: HttpProfile = HttpProfile { path: "/status", map: map_rust };

const CSGO_MAX_PLAYERS: u32 = 64;
const RUST_MAX_PLAYERS: u32 = 100;

fn field(body: &Value, name: &str) -> Option<Value> {
    body.get(name).cloned()
}

fn map_fivem(game: Game, body: Value) -> Option<StatusRecord> {
    // Player count is nested; without the object there is nothing to report.
    let players = body.get("players").filter(|players| !players.is_null())?.get("online").cloned();
    Some(StatusRecord {
        players,
        max_players: field(&body, "sv_maxclients"),
        version: field(&body, "version"),
        server_name: field(&body, "hostname"),
        ping: field(&body, "ping"),
        data: Some(body),
        ..StatusRecord::online(game)
    })
}

fn map_csgo(game: Game, body: Value) -> Option<StatusRecord> {
    Some(StatusRecord {
        players: field(&body, "players"),
        max_players: Some(CSGO_MAX_PLAYERS.into()),
        ping: field(&body, "ping"),
        server_name: field(&body, "serverName"),
        version: field(&body, "version"),
        data: Some(body),
        ..StatusRecord::online(game)
    })
}

fn map_rust(game: Game, body: Value) -> Option<StatusRecord> {
    Some(StatusRecord {
        players: field(&body, "players"),
        max_players: Some(RUST_MAX_PLAYERS.into()),
        ping: field(&body, "ping"),
        server_name: field(&body, "hostname"),
        version: field(&body, "version"),
        data: Some(body),
        ..StatusRecord::online(game)
    })
}

#[derive(Debug)]
enum FetchError {
    Status(StatusCode),
    Request(reqwest::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(status) => write!(f, "Unexpected status {}", status),
            Self::Request(e) => write!(f, "{}", e),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        Self::Request(e)
    }
}

pub struct HttpProbe {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub async fn probe(&self, game: Game, profile: &HttpProfile, ip: &str, port: u16) -> StatusRecord {
        debug!("Checking {} server at {}:{}", game.display_name(), ip, port);
        let url = format!("http://{}:{}{}", url_host(ip), port, profile.path);

        match self.fetch(&url).await {
            Ok(body) => match (profile.map)(game, body) {
                Some(record) => record,
                None => {
                    debug!("Unexpected {} status body from {}", game.display_name(), url);
                    StatusRecord::offline(game)
                }
            },
            Err(e) => {
                debug!("Error checking {} server: {}", game.display_name(), e);
                StatusRecord::offline(game)
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<Value, FetchError> {
        let response = self.client.get(url).timeout(self.timeout).send().await?;
        if response.status() != StatusCode::OK {
            return Err(FetchError::Status(response.status()));
        }
        // Bodies that are not JSON are passed through as text.
        let text = response.text().await?;
        Ok(serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text)))
    }
}
