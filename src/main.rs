use slash_intake::{config::Config, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = Config::from_env()?;
    tracing::info!(listen_addr = %cfg.listen_addr, table = %cfg.table_name, "starting");

    server::run(cfg).await
}
