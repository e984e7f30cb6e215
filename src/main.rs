#[tokio::main]
async fn main() -> slackgpt::error::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("slackgpt=info"))
        .init();
    log::info!("Starting slackgpt Slack relay");

    match slackgpt::bot::run().await {
        Ok(()) => {
            log::info!("Relay shut down successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Relay encountered an error: {e}");
            Err(e)
        }
    }
}
