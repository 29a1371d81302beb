use anyhow::Context;

use crate::config::AppConfig;
use crate::database::DatabaseManager;

pub async fn handle(config: AppConfig) -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    let result = DatabaseManager::health_check(&pool).await;
    DatabaseManager::close(pool).await;
    result.context("database ping failed")?;

    println!("database ok");
    Ok(())
}
