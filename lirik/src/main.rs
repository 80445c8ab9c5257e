use actix_web::{web, HttpServer};
use clap::Parser;
use lirik::api::{api_router, configure_pages};
use lirik::cli::CLIArgs;
use lirik::connect_and_set_up_database;
use lirik::logging::initialize_tracing;
use lirik::state::ApplicationStateInner;
use lirik_configuration::{load_environment_file, Configuration};
use miette::{Context, IntoDiagnostic, Result};
use tracing::info;



#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments.
    let arguments = CLIArgs::parse();

    load_environment_file()
        .into_diagnostic()
        .wrap_err("Failed to load .env file.")?;

    // Load configuration.
    let configuration = match arguments.configuration_file_path.as_ref() {
        Some(path) => {
            println!("Loading configuration: {}", path.display());
            Configuration::load_from_path(path)
        }
        None => {
            println!("Loading configuration at default path.");
            Configuration::load_from_default_path()
        }
    }
    .into_diagnostic()
    .wrap_err("Failed to load configuration file.")?;


    configuration
        .logging
        .create_log_file_output_directory_if_missing()
        .into_diagnostic()
        .wrap_err("Failed to create log file output directory.")?;

    let guard = initialize_tracing(
        configuration.logging.console_output_level_filter(),
        configuration.logging.log_file_output_level_filter(),
        &configuration.logging.log_file_output_directory,
        "lirik.log",
    )
    .wrap_err("Failed to initialize tracing.")?;

    info!(
        file_path = configuration.configuration_file_path.to_string_lossy().as_ref(),
        "Configuration loaded."
    );

    if configuration.admin.token.is_none() {
        info!("No admin token configured, admin endpoints will reject every request.");
    }


    // Initialize database connection and other shared state.
    let database_pool =
        connect_and_set_up_database(&configuration, arguments.apply_pending_migrations).await?;

    let state = web::Data::new(ApplicationStateInner::new(
        configuration.clone(),
        database_pool,
    ));


    // Initialize and start the actix HTTP server.
    #[rustfmt::skip]
    let server = HttpServer::new(move || {
        let cors = actix_cors::Cors::permissive().expose_headers(vec![
            "Date",
            "Content-Type",
            "Content-Length",
            "Cache-Control",
            "ETag",
        ]);

        actix_web::App::new()
            .wrap(actix_web::middleware::NormalizePath::trim())
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .app_data(state.clone())
            .service(api_router())
            .configure(configure_pages)
    })
        .bind((
            configuration.http.host.as_str(),
            configuration.http.port,
        ))
        .into_diagnostic()
        .wrap_err("Failed to set up actix HTTP server.")?;

    info!(
        host = configuration.http.host.as_str(),
        port = configuration.http.port,
        "HTTP server initialized and running."
    );

    // Run HTTP server until stopped.
    server
        .run()
        .await
        .into_diagnostic()
        .wrap_err("Errored while running actix HTTP server.")?;


    drop(guard);

    Ok(())
}
