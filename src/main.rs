use tutorial_site::config::{init_logging, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let config = AppConfig::from_env()?;
    tutorial_site::run(config).await
}
