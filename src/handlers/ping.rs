use axum::Json;

use crate::models::GenericResponse;

/// Ping endpoint
///
/// Health check, answers without touching the store
#[utoipa::path(
    get,
    path = "/api/v1/ping",
    responses(
        (status = 200, description = "Server is up", body = GenericResponse)
    ),
    tag = "Health API"
)]
pub async fn ping_handler() -> Json<GenericResponse> {
    let res = GenericResponse {
        success: true,
        message: "Storefront auth server is running".to_owned(),
    };
    Json(res)
}
