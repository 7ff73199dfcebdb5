use anyhow::{anyhow, Context, Result};
use aws_secrets::SecretManager;
use lambda_runtime::{run, service_fn, LambdaEvent};
use std::sync::Arc;
use tracing::info;

use user_migration_service::logging::{self, LogFormat};
use user_migration_service::models::MigrationEvent;
use user_migration_service::{Config, MigrationHandler};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init(LogFormat::from_env());

    info!("Starting user-migration-trigger");

    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;
    info!("Configuration loaded and validated");

    let secrets = SecretManager::new().await;
    let handler = Arc::new(MigrationHandler::new(secrets, config));

    run(service_fn(move |event: LambdaEvent<MigrationEvent>| {
        let handler = Arc::clone(&handler);
        async move {
            handler
                .handle(event.payload)
                .await
                .map_err(lambda_runtime::Error::from)
        }
    }))
    .await
    .map_err(|e| anyhow!("Lambda runtime failed: {}", e))
}
