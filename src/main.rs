use std::sync::Arc;
use tokio::net::TcpListener;
use seo_content_generator::{
    config::Config,
    api::routes::create_router,
    llm::GroqClient,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::load()?;
    let server_addr = config.server_addr;
    log::info!("Using LLM provider at {}", config.groq_base_url);

    let app_state = AppState {
        client: Arc::new(GroqClient::from_config(&config)),
    };

    let app = create_router(app_state);

    let listener = TcpListener::bind(server_addr).await?;

    log::info!("Listening on {}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
