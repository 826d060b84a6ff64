// src/main.rs
use actix_web::{ web, App, HttpServer };
use env_logger::Env;
use game_status::config::Config;
use game_status::handlers;
use game_status::utils::{ parse_watch_entry, BatchLimiter, StatusLimiter };
use game_status::{ NetworkProber, PollHandle, StatusCache, StatusService };
use governor::RateLimiter;
use log::{ error, info };
use std::sync::Arc;

/// Starts one poller per configured watch entry, logging every result.
fn start_watchers(service: &Arc<StatusService>, config: &Config) -> Vec<PollHandle> {
    let mut handles = Vec::new();
    for entry in &config.watch_servers {
        let server = match parse_watch_entry(entry) {
            Ok(server) => server,
            Err(e) => {
                error!("Skipping watch entry: {}", e);
                continue;
            }
        };

        let label = entry.clone();
        let started = service.ping_server_cyclically(
            &server.game,
            &server.ip,
            server.port,
            config.watch_interval(),
            move |status| {
                match serde_json::to_string(&status) {
                    Ok(json) => info!("{}: {}", label, json),
                    Err(e) => error!("{}: could not encode status: {}", label, e),
                }
            }
        );

        match started {
            Ok(handle) => {
                info!("Watching {} every {:?}", entry, config.watch_interval());
                handles.push(handle);
            }
            Err(e) => error!("Cannot watch {}: {}", entry, e),
        }
    }
    handles
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    let config = Config::from_env();

    env_logger::init_from_env(Env::default().default_filter_or(config.log_filter()));

    let cache = Arc::new(StatusCache::new(config.cache_ttl()));
    let sweeper = cache.spawn_sweeper(config.cache_check_period());
    let service = Arc::new(StatusService::new(Arc::clone(&cache), NetworkProber::from_config(&config)));

    let watchers = start_watchers(&service, &config);

    let service_data = web::Data::from(Arc::clone(&service));
    let status_limiter = web::Data::new(StatusLimiter(RateLimiter::keyed(config.status_quota())));
    let batch_limiter = web::Data::new(BatchLimiter(RateLimiter::keyed(config.batch_quota())));

    let bind = config.bind();
    info!("Starting server on {}", bind);
    let result = HttpServer::new(move || {
        App::new()
            .app_data(service_data.clone())
            .app_data(status_limiter.clone())
            .app_data(batch_limiter.clone())
            .configure(handlers::routes::<NetworkProber>)
    })
        .bind(&bind)?
        .run().await;

    for watcher in &watchers {
        watcher.cancel();
    }
    sweeper.abort();
    info!("Server stopped");
    result
}
