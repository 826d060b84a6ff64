// src/service/stub.rs
use parking_lot::Mutex;
use serde_json::json;
use std::collections::{ HashMap, HashSet };
use std::time::Duration;
use crate::models::server::Game;
use crate::models::status::StatusRecord;
use crate::probes::Prober;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeCall {
    pub game: Game,
    pub ip: String,
    pub port: u16,
}

/// Records every probe and answers with a fixed online record unless told otherwise.
#[derive(Default)]
pub struct StubProber {
    calls: Mutex<Vec<ProbeCall>>,
    offline: Mutex<HashSet<String>>,
    delays: Mutex<HashMap<String, Duration>>,
}

impl StubProber {
    pub fn set_offline(&self, ip: &str) {
        self.offline.lock().insert(ip.to_string());
    }

    pub fn set_delay(&self, ip: &str, delay: Duration) {
        self.delays.lock().insert(ip.to_string(), delay);
    }

    pub fn calls(&self) -> Vec<ProbeCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl Prober for StubProber {
    async fn probe(&self, game: Game, ip: &str, port: u16) -> StatusRecord {
        self.calls.lock().push(ProbeCall { game, ip: ip.to_string(), port });

        let delay = self.delays.lock().get(ip).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.offline.lock().contains(ip) {
            return StatusRecord::offline(game);
        }
        StatusRecord {
            players: Some(json!(5)),
            version: Some(json!("1.0")),
            ..StatusRecord::online(game)
        }
    }
}
