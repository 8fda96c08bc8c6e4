use std::sync::Arc;

use anyhow::Context;

use crate::auth::{hash_password, AuthService, PgCredentialStore, TokenCodec};
use crate::config::AppConfig;
use crate::database;

pub async fn handle_create(username: String, password: String) -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let pool = database::connect(&config.database)
        .await
        .context("database connection failed")?;
    database::migrate(&pool).await.context("migrations failed")?;

    let codec = TokenCodec::new(
        &config.security.jwt_secret,
        config.security.token_ttl_secs,
    );
    let auth = AuthService::new(Arc::new(PgCredentialStore::new(pool)), codec)
        .with_cost(config.security.bcrypt_cost);

    let user = auth.register(&username, &password, true).await?;
    println!("created administrator {} (id {})", user.username, user.id);
    Ok(())
}

pub fn handle_hash(password: String) -> anyhow::Result<()> {
    let hash = hash_password(&password, crate::auth::DEFAULT_BCRYPT_COST)?;
    println!("{hash}");
    Ok(())
}
