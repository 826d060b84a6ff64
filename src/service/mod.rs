// src/service/mod.rs
mod batch;
mod poller;
#[cfg(test)]
pub(crate) mod stub;

pub use poller::PollHandle;

use log::debug;
use std::sync::Arc;
use crate::error::StatusError;
use crate::models::server::Game;
use crate::models::status::{ QueryOptions, StatusOutput, StatusRecord };
use crate::probes::{ NetworkProber, Prober };
use crate::storage::memory::StatusCache;

/// Resolves server status through the cache, probing on a miss.
pub struct StatusService<P = NetworkProber> {
    cache: Arc<StatusCache>,
    prober: P,
}

/// Rejects missing parameters, then parses the game identifier.
fn validate(game: &str, ip: &str) -> Result<Game, StatusError> {
    if game.is_empty() {
        return Err(StatusError::InvalidArgument("game"));
    }
    if ip.is_empty() {
        return Err(StatusError::InvalidArgument("ip"));
    }
    game.parse()
}

impl<P: Prober> StatusService<P> {
    pub fn new(cache: Arc<StatusCache>, prober: P) -> Self {
        Self { cache, prober }
    }

    pub fn cache(&self) -> &Arc<StatusCache> {
        &self.cache
    }

    pub fn prober(&self) -> &P {
        &self.prober
    }

    /// Status of one server, shaped by `options`.
    ///
    /// `game` is one of `minecraft`, `fivem`, `csgo` or `rust`. When `port` is
    /// `None` the game's default port is probed.
    pub async fn get_server_status(
        &self,
        game: &str,
        ip: &str,
        port: Option<u16>,
        options: &QueryOptions
    ) -> Result<StatusOutput, StatusError> {
        let game = validate(game, ip)?;
        self.status_of(game, ip, port, options).await
    }

    /// Typed variant of [`get_server_status`](Self::get_server_status).
    pub async fn status_of(
        &self,
        game: Game,
        ip: &str,
        port: Option<u16>,
        options: &QueryOptions
    ) -> Result<StatusOutput, StatusError> {
        if ip.is_empty() {
            return Err(StatusError::InvalidArgument("ip"));
        }
        let record = self.resolve(game, ip, port, options.force).await;
        options.shape(record)
    }

    async fn resolve(&self, game: Game, ip: &str, port: Option<u16>, force: bool) -> StatusRecord {
        // Port 0 is never a real target; treat it like an omitted port.
        let port = port.filter(|port| *port != 0);
        let key = StatusCache::key(game, ip, port);

        if !force {
            if let Some(record) = self.cache.get(&key) {
                debug!("Returning cached status for {}", key);
                return record;
            }
        }

        let record = self.prober.probe(game, ip, port.unwrap_or(game.default_port())).await;
        self.cache.set(key, record.clone());
        record
    }
}
