//! Read access to the sync log.
//!
//! `GET /api/sync/log?limit=N` returns the newest `N` recorded sync attempts
//! (default 50, capped at 200) as a JSON array of `SyncLogEntry`.

use crate::audit::{SyncLog, DEFAULT_LIMIT};
use actix_web::web::{get, scope};
use actix_web::{web, HttpResponse, Responder, Scope};
use common::requests::SyncLogQuery;

const API_PATH: &str = "/api/sync";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/log", get().to(process))
}

pub(crate) async fn process(
    log: web::Data<SyncLog>,
    query: web::Query<SyncLogQuery>,
) -> impl Responder {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let log = log.get_ref().clone();
    match web::block(move || log.recent(limit)).await {
        Ok(Ok(entries)) => HttpResponse::Ok().json(entries),
        Ok(Err(e)) => HttpResponse::ServiceUnavailable().body(e.to_string()),
        Err(e) => HttpResponse::InternalServerError().body(format!("Blocking error: {}", e)),
    }
}
