mod config;
mod handler;
mod state;
mod storage;

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{config::Config, state::AppState};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing subscriber. The Lambda log sink timestamps lines.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "comentario=info,comentario_core=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .without_time(),
        )
        .init();

    let config = Config::from_env()?;
    let state = AppState::from_config(&config).await?;

    let state = &state;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handler::function_handler(state, event).await
    }))
    .await
}
