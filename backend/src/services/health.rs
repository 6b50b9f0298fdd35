use actix_web::web::{get, resource};
use actix_web::{HttpResponse, Resource, Responder};

pub fn configure_routes() -> Resource {
    resource("/health").route(get().to(process))
}

pub async fn process() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "ok": true, "service": "sheet-sync" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn health_reports_ok() {
        let app = test::init_service(App::new().service(configure_routes())).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["service"], "sheet-sync");
    }
}
