use notes_backend::{app, config::ServerConfig, db};
use notes_backend::db::NoteStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = ServerConfig::from_env();
    config.log_configuration();

    let pool = db::connect(&config.database_url, config.max_connections).await?;
    let store = NoteStore::new(pool, config.text_rules.clone());

    let addr = config.bind_addr();
    log::info!("Notes server starting on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(store)).await?;

    Ok(())
}
