use pos_server::{Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. dotenv, config, logging
    let config = setup_environment()?;

    tracing::info!("POS server starting...");

    // 2. Open database and wire services
    let state = ServerState::initialize(config).await?;

    // 3. Serve until Ctrl-C
    if let Err(e) = Server::new(state).run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
