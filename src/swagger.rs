use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::ping::ping_handler,
        crate::handlers::otp::send::send_otp_handler,
        crate::handlers::otp::verify::verify_otp_handler,
        crate::handlers::otp::status::otp_status_handler,
        crate::handlers::otp::cleanup::cleanup_otp_handler,
    ),
    components(
        schemas(
            crate::models::SendOtpReq,
            crate::models::VerifyOtpReq,

            crate::models::GenericResponse,
            crate::models::OtpStatusResponse,
            crate::models::CleanupResponse,

            crate::models::OtpPurpose,
            crate::models::OtpState,
        )
    ),
    tags(
        (name = "Health API", description = "API for health checks"),
        (name = "OTP API", description = "API for issuing and verifying one-time passwords")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_otp_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/api/v1/ping",
            "/api/v1/otp",
            "/api/v1/otp/send",
            "/api/v1/otp/verify",
            "/api/v1/otp/status",
        ] {
            assert!(paths.contains_key(path), "missing path {path}");
        }
    }
}
