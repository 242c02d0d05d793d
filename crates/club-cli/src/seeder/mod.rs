//! Database bootstrap: schema creation and predefined data.

pub mod categories;
pub mod models;

use club_db::{DbError, connect, run_migrations};

pub use categories::{
    PREDEFINED_CATEGORIES, count_predefined, list_predefined, seed_predefined_categories,
};
pub use models::{CategorySeed, SeedReport};

/// Creates the shared schema in the database at `db_path` and, when `seed` is
/// set, fills in any missing predefined categories. Safe to run repeatedly.
pub async fn initialize_database(db_path: &str, seed: bool) -> Result<SeedReport, DbError> {
    let pool = connect(db_path, 1).await?;
    run_migrations(&pool).await?;

    let report = if seed {
        let mut tx = pool.begin().await?;
        let report = seed_predefined_categories(&mut tx).await?;
        tx.commit().await?;
        report
    } else {
        SeedReport::default()
    };

    pool.close().await;
    tracing::info!(path = db_path, "database initialization complete");
    Ok(report)
}
