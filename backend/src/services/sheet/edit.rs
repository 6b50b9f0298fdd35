use crate::job_controller::state::JobsState;
use crate::sheet::MAX_ROWS;
use actix_web::{web, HttpResponse, Responder};
use common::requests::SheetEditRequest;

/// Queues an edit for the sync worker and returns its job id.
///
/// - `200 OK` with `{"job_id": ...}` once the edit is queued.
/// - `400 Bad Request` for row 0 or a row past `MAX_ROWS`.
/// - `503 Service Unavailable` when the sync worker is not running.
pub(crate) async fn process(
    state: web::Data<JobsState>,
    payload: web::Json<SheetEditRequest>,
) -> impl Responder {
    let request = payload.into_inner();
    if request.row == 0 {
        return HttpResponse::BadRequest().body("Rows are numbered from 1");
    }
    if request.row > MAX_ROWS {
        return HttpResponse::BadRequest()
            .body(format!("Row {} is past the last row ({})", request.row, MAX_ROWS));
    }
    match state.enqueue(request).await {
        Ok(job_id) => HttpResponse::Ok().json(serde_json::json!({ "job_id": job_id })),
        Err(err) => HttpResponse::ServiceUnavailable().body(err),
    }
}
