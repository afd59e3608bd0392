use homework_status_bot::{poller, Config};
use tracing::error;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("homework_status_bot=debug,info")
        .init();

    let config = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = poller::run(&config).await {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}
