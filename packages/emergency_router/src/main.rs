use axum::serve;
use clap::Parser;
use emergency_router::common::config::Settings;
use emergency_router::loading::postgres::PgGraphProvider;
use emergency_router::server::{AppState, create_router};
use sqlx::postgres::PgPoolOptions;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Serve emergency vehicle routes over HTTP
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Path to a TOML config file. Defaults are used for anything not set
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, overrides the config file
    #[arg(long)]
    bind: Option<String>,

    /// PostgreSQL connection string, overrides the config file
    #[arg(long)]
    database_url: Option<String>,
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Unable to listen for shutdown signal: {err}");
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                "emergency_router=info"
                    .parse()
                    .expect("Invalid default log directive!"),
            ),
        )
        .init();

    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())
        .expect("Error loading settings!");
    if let Some(bind) = args.bind {
        settings.server.bind = bind;
    }
    if let Some(database_url) = args.database_url {
        settings.server.database_url = database_url;
    }

    let pool = PgPoolOptions::new()
        .max_connections(settings.server.max_connections)
        .connect(&settings.server.database_url)
        .await
        .expect("Error connecting to postgres!");

    let state = AppState::new(PgGraphProvider::new(pool), settings.routing);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&settings.server.bind)
        .await
        .expect("Error binding to address!");
    info!("Listening on {}", settings.server.bind);

    serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Error serving API!");
}
