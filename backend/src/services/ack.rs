//! Passive acknowledgment for callers that post to the service root.
//!
//! Answers every `GET /` and `POST /` with a plain-text `OK`. It reads nothing
//! and changes nothing; in particular it never triggers a sync.

use actix_web::web::{get, post, resource};
use actix_web::{HttpResponse, Resource, Responder};

pub const ACK_BODY: &str = "OK";

pub fn configure_routes() -> Resource {
    resource("/")
        .route(post().to(process))
        .route(get().to(process))
}

pub async fn process() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(ACK_BODY)
}
