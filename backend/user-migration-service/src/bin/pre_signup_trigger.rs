use anyhow::{anyhow, Result};
use lambda_runtime::{run, service_fn, LambdaEvent};
use std::sync::Arc;
use tracing::info;

use user_migration_service::logging::{self, LogFormat};
use user_migration_service::models::PreSignUpEvent;
use user_migration_service::PreSignUpHandler;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init(LogFormat::from_env());

    info!("Starting pre-signup-trigger");

    let handler = Arc::new(PreSignUpHandler::new());

    run(service_fn(move |event: LambdaEvent<PreSignUpEvent>| {
        let handler = Arc::clone(&handler);
        async move { Ok::<_, lambda_runtime::Error>(handler.handle(event.payload)) }
    }))
    .await
    .map_err(|e| anyhow!("Lambda runtime failed: {}", e))
}
