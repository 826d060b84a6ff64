// src/handlers/status.rs
use actix_web::{ web, HttpResponse, HttpRequest };
use log::{ debug, error };
use serde::Deserialize;
use crate::models::server::ServerDescriptor;
use crate::models::status::QueryOptions;
use crate::probes::Prober;
use crate::service::StatusService;
use crate::utils::{ check_rate, peer_ip, BatchLimiter, RequestError, StatusLimiter };

/// Query string of `GET /status/{game}/{ip}`; `select` is comma separated.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusQuery {
    port: Option<u16>,
    #[serde(default)]
    force: bool,
    select: Option<String>,
    return_type: Option<String>,
}

impl StatusQuery {
    fn options(&self) -> QueryOptions {
        QueryOptions {
            force: self.force,
            select: self.select.as_ref().map(|select| {
                select
                    .split(',')
                    .map(str::trim)
                    .filter(|field| !field.is_empty())
                    .map(String::from)
                    .collect()
            }),
            return_type: self.return_type.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    servers: Vec<ServerDescriptor>,
    #[serde(default)]
    options: QueryOptions,
}

pub async fn get_status<P: Prober>(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    query: web::Query<StatusQuery>,
    service: web::Data<StatusService<P>>,
    rate_limiter: web::Data<StatusLimiter>
) -> Result<HttpResponse, RequestError> {
    let peer = peer_ip(&req)?;
    if let Err(e) = check_rate(&rate_limiter.0, peer) {
        error!("Rate limit exceeded for status query for ip: {}", peer);
        return Err(e);
    }

    let (game, ip) = path.into_inner();
    debug!("Status query for {} server at {} from {}", game, ip, peer);

    match service.get_server_status(&game, &ip, query.port, &query.options()).await {
        Ok(status) => Ok(HttpResponse::Ok().json(status)),
        Err(e) => {
            error!("Status query for {} at {} failed: {}", game, ip, e);
            Err(e.into())
        }
    }
}

pub async fn check_batch<P: Prober>(
    req: HttpRequest,
    body: web::Json<BatchRequest>,
    service: web::Data<StatusService<P>>,
    rate_limiter: web::Data<BatchLimiter>
) -> Result<HttpResponse, RequestError> {
    let peer = peer_ip(&req)?;
    if let Err(e) = check_rate(&rate_limiter.0, peer) {
        error!("Rate limit exceeded for batch query for ip: {}", peer);
        return Err(e);
    }

    let BatchRequest { servers, options } = body.into_inner();
    debug!("Batch query for {} servers from {}", servers.len(), peer);

    match service.check_multiple_servers(&servers, &options).await {
        Ok(results) => Ok(HttpResponse::Ok().json(results)),
        Err(e) => {
            error!("Batch query failed: {}", e);
            Err(e.into())
        }
    }
}
