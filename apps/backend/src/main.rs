#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vocab_match_backend::run().await
}
