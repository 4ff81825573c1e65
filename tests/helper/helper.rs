use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use dotenvy::dotenv;
use rand::Rng;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use skincare_storefront_backend::{app::build_app, database::AppDatabase};

#[derive(Debug, Serialize, Deserialize)]
pub struct GenericResponse {
    pub success: bool,
    pub message: String,
}

pub async fn get_database() -> AppDatabase {
    // import .env file
    dotenv().ok();
    // the client connects lazily, so routes which never touch the store work offline
    let uri = std::env::var("MONGODB_URI").unwrap_or("mongodb://localhost:27017".to_owned());
    AppDatabase::with_uri(&uri)
        .await
        .expect("Unable to accquire database client")
}

pub async fn get_app() -> Router {
    let db_client = get_database().await;
    build_app(Arc::new(db_client))
}

pub fn unique_email() -> String {
    let suffix: u64 = rand::thread_rng().gen();
    format!("shopper.{suffix}@example.com")
}

pub fn build_post_request(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

pub fn build_get_request(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

pub fn build_delete_request(path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .method("DELETE")
        .body(Body::empty())
        .unwrap()
}

pub async fn read_body<T: DeserializeOwned>(res: Response) -> T {
    let body = hyper::body::to_bytes(res.into_body()).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}
