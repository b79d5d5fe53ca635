use std::time::Duration;

use challenge_bot::{Config, Dispatcher, Store, TelegramApi, bot, health};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

/// Pause between the two replies of the logging flow.
const REPLY_PAUSE: Duration = Duration::from_millis(1500);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    let store = Store::connect(&config.db_path).await?;
    let api = TelegramApi::new(&config.bot_token, &config.api_base)?;
    let dispatcher = Dispatcher::new(store, REPLY_PAUSE);

    let health_port = config.health_port;
    tokio::spawn(async move {
        if let Err(err) = health::serve(health_port).await {
            error!("health endpoint failed: {err}");
        }
    });

    info!("bot started");
    tokio::select! {
        result = bot::run(&api, &dispatcher) => result?,
        _ = tokio::signal::ctrl_c() => info!("shutting down"),
    }

    Ok(())
}
