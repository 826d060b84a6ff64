// src/handlers/mod.rs
pub mod index;
pub mod status;

use actix_web::web;
use crate::probes::Prober;

pub fn routes<P: Prober>(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index::index))
        .route("/status/batch", web::post().to(status::check_batch::<P>))
        .route("/status/{game}/{ip}", web::get().to(status::get_status::<P>));
}
