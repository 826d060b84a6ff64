// src/lib.rs
//! Live status queries for Minecraft Java, FiveM, CS:GO and Rust servers.
//!
//! [`StatusService`] is the entry point: it answers single, batch and periodic
//! queries from a shared [`StatusCache`], running a probe on a miss.
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod probes;
pub mod service;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use error::StatusError;
pub use models::server::{ Game, ServerDescriptor };
pub use models::status::{ BatchEntry, QueryOptions, StatusOutput, StatusRecord };
pub use probes::{ NetworkProber, Prober };
pub use service::{ PollHandle, StatusService };
pub use storage::memory::StatusCache;
