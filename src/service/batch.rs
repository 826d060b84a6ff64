// src/service/batch.rs
use log::debug;
use crate::error::StatusError;
use crate::models::server::ServerDescriptor;
use crate::models::status::{ BatchEntry, QueryOptions };
use crate::probes::Prober;
use super::StatusService;

impl<P: Prober> StatusService<P> {
    /// Queries `servers` one after another, in order.
    ///
    /// The first failing descriptor aborts the batch and its error is returned;
    /// results gathered so far are dropped.
    pub async fn check_multiple_servers(
        &self,
        servers: &[ServerDescriptor],
        options: &QueryOptions
    ) -> Result<Vec<BatchEntry>, StatusError> {
        debug!("Checking {} servers", servers.len());

        let mut results = Vec::with_capacity(servers.len());
        for server in servers {
            let status = self.get_server_status(&server.game, &server.ip, server.port, options).await?;
            results.push(BatchEntry {
                ip: server.ip.clone(),
                status,
            });
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use serde_json::json;
    use crate::error::StatusError;
    use crate::models::server::{ Game, ServerDescriptor };
    use crate::models::status::{ QueryOptions, StatusOutput };
    use crate::service::stub::StubProber;
    use crate::service::StatusService;
    use crate::storage::memory::StatusCache;

    fn service() -> StatusService<StubProber> {
        StatusService::new(Arc::new(StatusCache::new(Duration::from_secs(300))), StubProber::default())
    }

    #[tokio::test(start_paused = true)]
    async fn keeps_input_order_and_runs_sequentially() {
        let service = service();
        // The first server answers slowest.
        service.prober().set_delay("a", Duration::from_millis(500));
        let servers = vec![ServerDescriptor::new("rust", "a", None), ServerDescriptor::new("csgo", "b", None)];

        let results = service.check_multiple_servers(&servers, &QueryOptions::default()).await.unwrap();

        let ips: Vec<&str> = results.iter().map(|entry| entry.ip.as_str()).collect();
        assert_eq!(ips, vec!["a", "b"]);
        let games: Vec<String> = results
            .iter()
            .filter_map(|entry| entry.status.as_record().map(|record| record.game.clone()))
            .collect();
        assert_eq!(games, vec!["Rust", "CS:GO"]);

        let probed: Vec<Game> = service.prober().calls().into_iter().map(|call| call.game).collect();
        assert_eq!(probed, vec![Game::Rust, Game::CsGo]);
    }

    #[tokio::test]
    async fn options_apply_to_every_entry() {
        let service = service();
        let servers = vec![ServerDescriptor::new("rust", "a", None), ServerDescriptor::new("fivem", "b", Some(30121))];
        let options = QueryOptions::default().with_return_type("players");

        let results = service.check_multiple_servers(&servers, &options).await.unwrap();

        assert!(results.iter().all(|entry| entry.status == StatusOutput::Field(json!(5))));
    }

    #[tokio::test]
    async fn one_bad_descriptor_aborts_the_batch() {
        let service = service();
        let servers = vec![
            ServerDescriptor::new("rust", "a", None),
            ServerDescriptor::new("quake", "b", None),
            ServerDescriptor::new("csgo", "c", None)
        ];

        let result = service.check_multiple_servers(&servers, &QueryOptions::default()).await;

        assert_eq!(result, Err(StatusError::UnsupportedGame("quake".to_string())));
        // Nothing after the failing descriptor is probed.
        assert_eq!(service.prober().call_count(), 1);
    }

    #[tokio::test]
    async fn empty_batch_is_empty() {
        let results = service().check_multiple_servers(&[], &QueryOptions::default()).await.unwrap();
        assert!(results.is_empty());
    }
}
