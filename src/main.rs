use sky_admin_backend_rs::{
    app::App,
    types::{Config, ToContext},
};
use std::process::ExitCode;
use tracing_subscriber::prelude::*;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let ctx = match config.to_context().await {
        Ok(ctx) => ctx,
        Err(err) => {
            tracing::error!("Failed to start: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = App::new(ctx).serve().await {
        tracing::error!("Server stopped: {}", err);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
