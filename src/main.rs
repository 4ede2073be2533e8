use techhive_api::config;
use techhive_api::database::manager::StoreManager;
use techhive_api::routes;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up MONGODB_URI, ACCESS_TOKEN_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting TechHive API against database '{}'", config.database.db_name);

    // The store connection is lazy; a failed ping here is logged and the
    // server boots anyway, answering 500s until the store comes back.
    if let Err(e) = StoreManager::bootstrap().await {
        tracing::warn!("store bootstrap failed, continuing without it: {}", e);
    }

    let app = routes::app();

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 TechHive API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
