use clap::Parser;
use cli::Args;
use std::process::ExitCode;

mod app_context;
mod auth;
mod challenges;
mod cli;
mod games;
mod health;
mod http;
mod logging;
mod map;
mod scores;
mod storage;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(&args);
    auth::init(&args);
    let app_context = match app_context::init(&args).await {
        Ok(app_context) => app_context,
        Err(err) => {
            tracing::error!("Failed to start the server: {err}");
            return ExitCode::FAILURE;
        }
    };
    let router = http::router::new(&args, app_context);
    let listener = match tokio::net::TcpListener::bind(args.listen_address).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("Failed to bind to {}: {err}", args.listen_address);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Listening on {}.", args.listen_address);
    if let Err(err) = axum::serve(listener, router).await {
        tracing::error!("Server stopped: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
