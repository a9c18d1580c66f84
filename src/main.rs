use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod engine;
mod error;
mod models;
mod security;
mod state;

use config::{Config, LogFormat};
use state::AppState;

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .init(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first so the log format can come from it
    let config = Config::from_env().map_err(anyhow::Error::msg)?;

    init_logging(config.log_format);

    info!("Starting Calculator Service");
    info!(
        "Multiply permission policy: {:?}",
        config.multiply_permission
    );

    let bind_addr = config.bind_addr();
    let workers = config.workers;
    let cors_max_age = config.cors_max_age;

    let app_state = web::Data::new(AppState::from_config(&config));

    info!("Starting HTTP server on {}", bind_addr);

    let mut server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET"])
            .allow_any_header()
            .max_age(cors_max_age);

        App::new()
            .app_data(app_state.clone())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(api::configure_routes)
    });

    if let Some(workers) = workers {
        server = server.workers(workers);
    }

    server.bind(&bind_addr)?.run().await?;

    Ok(())
}
