// src/probes/minecraft.rs
use log::debug;
use serde_json::Value;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{ lookup_host, UdpSocket };
use crate::models::server::Game;
use crate::models::status::{ StatusRecord, ONLINE_MESSAGE };

/// Legacy server-list-ping request.
pub const LEGACY_PING: [u8; 2] = [0xFE, 0x01];

// The reply payload is not parsed, so these are reported as-is.
const PLACEHOLDER_PING: u64 = 50;
const PLACEHOLDER_SERVER_NAME: &str = "Minecraft Server";
const PLACEHOLDER_VERSION: &str = "1.16.4";

pub struct MinecraftProbe {
    timeout: Duration,
}

impl MinecraftProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Any reply within the timeout is online. The timeout covers name
    /// resolution as well as the reply wait.
    pub async fn probe(&self, ip: &str, port: u16) -> StatusRecord {
        debug!("Checking Minecraft server at {}:{}", ip, port);

        match tokio::time::timeout(self.timeout, exchange(ip, port)).await {
            Ok(Ok(payload)) => {
                debug!("Received {} bytes from {}:{}", payload.len(), ip, port);
                StatusRecord {
                    message: Some(ONLINE_MESSAGE.to_string()),
                    players: Some(Value::String(String::from_utf8_lossy(&payload).into_owned())),
                    ping: Some(PLACEHOLDER_PING.into()),
                    server_name: Some(PLACEHOLDER_SERVER_NAME.into()),
                    version: Some(PLACEHOLDER_VERSION.into()),
                    ..StatusRecord::online(Game::Minecraft)
                }
            }
            Ok(Err(e)) => {
                debug!("Ping to {}:{} failed: {}", ip, port, e);
                StatusRecord::offline(Game::Minecraft)
            }
            Err(_) => {
                debug!("Timed out pinging {}:{}", ip, port);
                StatusRecord::offline(Game::Minecraft)
            }
        }
    }
}

/// Resolves the target, sends the legacy ping and waits for the first datagram.
async fn exchange(ip: &str, port: u16) -> io::Result<Vec<u8>> {
    let target = lookup_host((ip, port))
        .await?
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no address found"))?;

    let bind_addr: SocketAddr = if target.is_ipv4() {
        ([0u8; 4], 0).into()
    } else {
        ([0u16; 8], 0).into()
    };
    let socket = UdpSocket::bind(bind_addr).await?;
    socket.send_to(&LEGACY_PING, target).await?;

    let mut buffer = [0u8; 2048];
    let (len, _addr) = socket.recv_from(&mut buffer).await?;
    Ok(buffer[..len].to_vec())
}
