// src/utils.rs
use actix_web::{ HttpRequest, HttpResponse, ResponseError };
use governor::{ RateLimiter, clock::DefaultClock };
use governor::state::keyed::DefaultKeyedStateStore;
use std::fmt;
use std::net::IpAddr;
use crate::error::StatusError;
use crate::models::server::ServerDescriptor;

pub type KeyedLimiter = RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>;

/// Rate limiter for single status queries.
pub struct StatusLimiter(pub KeyedLimiter);

/// Rate limiter for batch queries.
pub struct BatchLimiter(pub KeyedLimiter);

#[derive(Debug)]
pub enum RequestError {
    MissingPeerIP,
    RateLimitExceeded,
    Status(StatusError),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPeerIP => write!(f, "Failed to extract client IP"),
            Self::RateLimitExceeded => write!(f, "Rate limit exceeded"),
            Self::Status(e) => write!(f, "{}", e),
        }
    }
}

impl From<StatusError> for RequestError {
    fn from(e: StatusError) -> Self {
        Self::Status(e)
    }
}

impl ResponseError for RequestError {
    fn error_response(&self) -> HttpResponse {
        match self {
            Self::RateLimitExceeded => HttpResponse::TooManyRequests().body(self.to_string()),
            Self::Status(StatusError::FieldUnavailable(_)) => {
                HttpResponse::NotFound().body(self.to_string())
            }
            _ => HttpResponse::BadRequest().body(self.to_string()),
        }
    }
}

pub fn peer_ip(req: &HttpRequest) -> Result<IpAddr, RequestError> {
    req.peer_addr()
        .map(|addr| addr.ip())
        .ok_or(RequestError::MissingPeerIP)
}

/// Charges one request to `ip`.
pub fn check_rate(limiter: &KeyedLimiter, ip: IpAddr) -> Result<(), RequestError> {
    limiter.check_key(&ip).map_err(|_| RequestError::RateLimitExceeded)
}

/// Parses a watch entry of the form `game@host[:port]`; IPv6 hosts go in brackets.
pub fn parse_watch_entry(entry: &str) -> Result<ServerDescriptor, String> {
    let (game, target) = entry
        .split_once('@')
        .ok_or_else(|| format!("Missing '@' in watch entry: {}", entry))?;

    let (host, port) = if let Some(rest) = target.strip_prefix('[') {
        let (host, tail) = rest
            .split_once(']')
            .ok_or_else(|| format!("Unclosed '[' in watch entry: {}", entry))?;
        match tail.strip_prefix(':') {
            Some(port) => (host, Some(port)),
            None if tail.is_empty() => (host, None),
            None => return Err(format!("Unexpected text after host in watch entry: {}", entry)),
        }
    } else {
        match target.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (target, None),
        }
    };

    let port = match port {
        Some(port) => Some(
            port.parse::<u16>().map_err(|e| format!("Invalid port in watch entry {}: {}", entry, e))?
        ),
        None => None,
    };

    Ok(ServerDescriptor::new(game.trim(), host.trim(), port))
}
