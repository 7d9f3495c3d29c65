#[tokio::main]
async fn main() -> std::io::Result<()> {
    api_server::run_with_config().await
}
