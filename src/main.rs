use anyhow::{Context, Result};
use s3_connection::{ConnectionInfo, StorageClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载 .env 文件
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let info = ConnectionInfo::from_env().context("failed to load s3 connection info")?;
    info.validate()?;

    let client = StorageClient::new(&info, None)?;
    client
        .ping_bucket()
        .await
        .with_context(|| format!("s3 bucket {} is not reachable", client.bucket()))?;

    info!(
        endpoint = %info.endpoint,
        bucket = client.bucket(),
        "s3 bucket is reachable"
    );

    Ok(())
}
