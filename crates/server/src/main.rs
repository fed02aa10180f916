#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tubemeta_server::start().await
}
