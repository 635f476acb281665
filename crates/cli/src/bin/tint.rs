use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    tint_cli::main_entry().await
}
