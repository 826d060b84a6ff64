// src/storage/memory.rs
use dashmap::DashMap;
use log::debug;
use std::sync::{ Arc, Weak };
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{ self, Instant, MissedTickBehavior };
use crate::models::server::Game;
use crate::models::status::StatusRecord;

struct CacheEntry {
    value: StatusRecord,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Last known status per `(game, ip, port)`, expiring a fixed TTL after insertion.
pub struct StatusCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl StatusCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// `game|ip|port`, with an empty port segment when none was given.
    pub fn key(game: Game, ip: &str, port: Option<u16>) -> String {
        match port {
            Some(port) => format!("{}|{}|{}", game.as_str(), ip, port),
            None => format!("{}|{}|", game.as_str(), ip),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, key: &str) -> Option<StatusRecord> {
        let now = Instant::now();
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };

        if expired {
            // The read guard is gone; re-check so a concurrent fresh `set` survives.
            self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        }
        None
    }

    /// Stores `value`, replacing any previous record for `key` wholesale.
    pub fn set(&self, key: String, value: StatusRecord) {
        let expires_at = Instant::now() + self.ttl;
        self.entries.insert(key, CacheEntry { value, expires_at });
    }

    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before.saturating_sub(self.entries.len())
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Purges expired entries every `period` until the cache is dropped.
    pub fn spawn_sweeper(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let cache: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let Some(cache) = cache.upgrade() else {
                    break;
                };
                let purged = cache.purge_expired();
                if purged > 0 {
                    debug!("Purged {} expired status entries", purged);
                }
            }
        })
    }
}
