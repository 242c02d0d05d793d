use axum::extract::FromRef;

use club_config::{DatabaseConfig, JwtConfig};
use club_db::{Databases, run_migrations};

/// State a downstream club app hands to its router. Extractors in this crate
/// only need the parts they pull out through [`FromRef`].
#[derive(Clone, Debug)]
pub struct ClubState {
    pub databases: Databases,
    pub jwt_config: JwtConfig,
}

impl FromRef<ClubState> for JwtConfig {
    fn from_ref(state: &ClubState) -> Self {
        state.jwt_config.clone()
    }
}

impl FromRef<ClubState> for Databases {
    fn from_ref(state: &ClubState) -> Self {
        state.databases.clone()
    }
}

/// Loads configuration from the environment (and `.env`), opens the database
/// pools and brings the shared schema up to date.
pub async fn init_club_state() -> anyhow::Result<ClubState> {
    dotenvy::dotenv().ok();

    let jwt_config = JwtConfig::from_env()?;
    let databases = Databases::connect(&DatabaseConfig::from_env()?).await?;
    run_migrations(&databases.common).await?;

    Ok(ClubState {
        databases,
        jwt_config,
    })
}
