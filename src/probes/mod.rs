// src/probes/mod.rs
pub mod http;
pub mod minecraft;

use std::future::Future;
use std::time::Duration;
use crate::config::Config;
use crate::models::server::Game;
use crate::models::status::StatusRecord;
use self::http::{ HttpProbe, HttpProfile };
use self::minecraft::MinecraftProbe;

/// Produces a fresh status record for one server.
///
/// Implementations never fail: an unreachable server is an offline record.
pub trait Prober: Send + Sync + 'static {
    fn probe(&self, game: Game, ip: &str, port: u16) -> impl Future<Output = StatusRecord> + Send;
}

/// How a game is queried on the wire.
#[derive(Debug, Clone, Copy)]
pub enum Protocol {
    /// Legacy `0xFE 0x01` datagram; any reply counts as online.
    LegacyPing,
    Http(HttpProfile),
}

pub fn protocol(game: Game) -> Protocol {
    match game {
        Game::Minecraft => Protocol::LegacyPing,
        Game::FiveM => Protocol::Http(http::FIVEM),
        Game::CsGo => Protocol::Http(http::CSGO),
        Game::Rust => Protocol::Http(http::RUST),
    }
}

/// The real prober: UDP for Minecraft, HTTP for everything else.
pub struct NetworkProber {
    minecraft: MinecraftProbe,
    http: HttpProbe,
}

impl NetworkProber {
    pub fn new(minecraft_timeout: Duration, http_timeout: Duration) -> Self {
        Self {
            minecraft: MinecraftProbe::new(minecraft_timeout),
            http: HttpProbe::new(reqwest::Client::new(), http_timeout),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.minecraft_timeout(), config.http_timeout())
    }
}

impl Prober for NetworkProber {
    async fn probe(&self, game: Game, ip: &str, port: u16) -> StatusRecord {
        match protocol(game) {
            Protocol::LegacyPing => self.minecraft.probe(ip, port).await,
            Protocol::Http(profile) => self.http.probe(game, &profile, ip, port).await,
        }
    }
}

/// Formats `ip` for use in a URL authority, bracketing IPv6 literals.
pub(crate) fn url_host(ip: &str) -> String {
    if ip.parse::<std::net::Ipv6Addr>().is_ok() {
        format!("[{}]", ip)
    } else {
        ip.to_string()
    }
}
