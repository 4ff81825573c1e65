use axum::{
    error_handling::HandleErrorLayer,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    BoxError, Json, Router,
};
use mockall_double::double;
use std::{sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{constants::*, handlers::*, models::GenericResponse, swagger::ApiDoc};

#[double]
use crate::database::AppDatabase;

/// Builds the router with every route, the swagger ui and the common middleware
pub fn build_app(db_client: Arc<AppDatabase>) -> Router {
    tracing::debug!("Initializing the app");
    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/v1", api_routes())
        .fallback(global_404_handler);
    with_middleware(router).with_state(db_client)
}

/// Request tracing plus a request timeout answered with 408
fn with_middleware<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(HandleErrorLayer::new(handle_middleware_error))
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS));
    router.layer(middleware)
}

fn api_routes() -> Router<Arc<AppDatabase>> {
    Router::new()
        .route("/ping", get(ping_handler))
        .route("/otp", delete(cleanup_otp_handler))
        .route("/otp/send", post(send_otp_handler))
        .route("/otp/verify", post(verify_otp_handler))
        .route("/otp/status", get(otp_status_handler))
}

async fn handle_middleware_error(err: BoxError) -> impl IntoResponse {
    let (status, message) = if err.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_owned())
    } else {
        let msg = format!("Unhandled internal error: {err}");
        (StatusCode::INTERNAL_SERVER_ERROR, msg)
    };
    tracing::debug!("{message}");
    let res = GenericResponse {
        success: false,
        message,
    };
    (status, Json(res))
}
