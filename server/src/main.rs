#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shadowcheck_server::run().await
}
