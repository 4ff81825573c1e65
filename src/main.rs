#[tokio::main]
async fn main() -> anyhow::Result<()> {
    skincare_storefront_backend::start_web_server().await
}
