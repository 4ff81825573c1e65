use std::{net::SocketAddr, sync::Arc};

use dotenvy::dotenv;
use handlers::otp::helper::ensure_otp_indexes;
use mockall_double::double;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[double]
use crate::database::AppDatabase;

pub mod app;
pub mod constants;
pub mod database;
pub mod handlers;
pub mod models;
pub mod swagger;
pub mod utils;

pub async fn start_web_server() -> anyhow::Result<()> {
    // import .env file
    dotenv().ok();
    initialize_logging();
    // create database client
    let db_client = AppDatabase::new().await?;
    let db_client = Arc::new(db_client);
    // expired records are removed by the TTL index, not by the app
    ensure_otp_indexes(&db_client).await?;
    start_server(db_client).await
}

fn initialize_logging() {
    // create default env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or("skincare_storefront_backend=debug,tower_http=debug".into());

    // initialize tracing subscriber for logging
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

async fn start_server(db_client: Arc<AppDatabase>) -> anyhow::Result<()> {
    // read the port number from env variable
    let port = std::env::var("PORT").unwrap_or_default();
    let port = port.parse::<u16>().unwrap_or(constants::DEFAULT_PORT);
    // build the socket address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    // create the app instance
    let app = app::build_app(db_client);
    tracing::debug!("Starting the app in: {addr}");
    // start serving the app in the socket address
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
