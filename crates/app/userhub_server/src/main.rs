//! Userhub API server binary.

use std::sync::Arc;

use clap::Parser;
use tracing::info;
use userhub_api::config::ApiConfig;
use userhub_core::auth::service::AuthService;
use userhub_core::repo::postgres::{PgRefreshTokenRepository, PgUserRepository};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "userhub_server", about = "Userhub API server")]
struct Args {
    /// Port to listen on (overrides BIND_ADDR's port when set).
    #[arg(long)]
    port: Option<u16>,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/userhub"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,userhub_api=debug,userhub_core=debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    // Fails fast on a missing/short signing secret outside development.
    let mut config = ApiConfig::from_env()?;
    if let Some(port) = args.port {
        config.bind_addr = with_port(&config.bind_addr, port);
    }

    info!(
        version = userhub_core::version(),
        database_url = %args.database_url,
        bind_addr = %config.bind_addr,
        "starting userhub_server"
    );

    let pool = userhub_core::db::connect(&args.database_url, args.max_connections).await?;

    info!("running database migrations");
    userhub_api::migrate(&pool).await?;

    let auth = AuthService::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgRefreshTokenRepository::new(pool)),
        config.jwt_secret.clone(),
        config.access_token_ttl_secs,
    );

    let state = userhub_api::AppState {
        auth,
        config: config.clone(),
    };

    let app = userhub_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Replace only the port of a `host:port` bind address.
fn with_port(bind_addr: &str, port: u16) -> String {
    let host = bind_addr
        .rsplit_once(':')
        .map(|(host, _)| host)
        .unwrap_or(bind_addr);
    format!("{host}:{port}")
}
