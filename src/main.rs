use anyhow::Result;
use medquest_admin::utils::logging;
use medquest_admin::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = Config::from_env();

    App::initialize(config).await?.run().await?;

    Ok(())
}
