pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::http::{header, Method};
    use axum::middleware;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::services::ServeDir;

    system::tracing::initialize()?;

    let config = shared::config::load_config()?;
    let db_path = shared::config::get_database_path(&config)?;

    shared::data::migration_runner::run_migrations(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("migrations failed: {e}"))?;
    shared::data::db::initialize_database(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    system::initialization::ensure_admin_user_exists(&config.admin).await?;
    system::initialization::seed_reference_data().await?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let app = routes::configure_routes()
        .fallback_service(ServeDir::new("dist"))
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors);

    let addr = config.server.bind_address();
    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!("Port in {} is already in use", addr);
            } else {
                tracing::error!("Failed to bind to {}: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
