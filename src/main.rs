use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use candidate_matcher::config::Settings;
use candidate_matcher::core::Matcher;
use candidate_matcher::error::handle_json_payload_error;
use candidate_matcher::routes::{self, matches::AppState};
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match settings.logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.json().init(),
    }

    info!("Starting candidate matching service...");

    let defaults = settings.matching.options();
    if !defaults.fuzzy_date_matching {
        info!("fuzzy_date_matching is disabled; date comparison is exact either way");
    }

    let matcher = Matcher::new(defaults);

    info!(
        "Matcher initialized: threshold={}, name_weight={}, date_weight={}, max_candidates={}",
        defaults.threshold,
        defaults.name_weight,
        defaults.date_weight,
        settings.matching.max_candidates
    );

    // Build application state
    let app_state = AppState {
        matcher,
        max_candidates: settings.matching.max_candidates,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);
    let max_body_bytes = settings.server.max_body_bytes;

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(
                web::JsonConfig::default()
                    .limit(max_body_bytes)
                    .error_handler(handle_json_payload_error),
            )
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))
    .map_err(|e| {
        error!("Failed to bind HTTP server: {}", e);
        e
    })?
    .run()
    .await
}
