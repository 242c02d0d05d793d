//! Predefined category catalog and its seeding.

use std::time::Instant;

use chrono::Utc;
use club_models::AppScope::{All, Campfire, Care, Career, Coin};
use club_models::CategoryKind::{Expense, General, Income};
use club_models::SharedCategory;
use sqlx::SqliteConnection;

use super::models::{CategorySeed, SeedReport};

/// Categories every user sees, keyed by `(name, app_scope)`.
pub const PREDEFINED_CATEGORIES: &[CategorySeed] = &[
    // Income
    CategorySeed::new("Salary", Income, "mdi-cash", All),
    CategorySeed::new("Bonus", Income, "mdi-gift", All),
    CategorySeed::new("Freelance", Income, "mdi-briefcase", All),
    CategorySeed::new("Investment Income", Income, "mdi-trending-up", Coin),
    CategorySeed::new("Other Income", Income, "mdi-cash-plus", All),
    // Utilities
    CategorySeed::new("Utilities", Expense, "mdi-lightbulb", Coin),
    CategorySeed::new("Electricity", Expense, "mdi-flash", Coin),
    CategorySeed::new("Water", Expense, "mdi-water", Coin),
    CategorySeed::new("Gas", Expense, "mdi-fire", Coin),
    CategorySeed::new("Internet", Expense, "mdi-wifi", Coin),
    CategorySeed::new("Phone", Expense, "mdi-phone", Coin),
    // Housing
    CategorySeed::new("Housing", Expense, "mdi-home", Coin),
    CategorySeed::new("Rent", Expense, "mdi-home-account", Coin),
    CategorySeed::new("Mortgage", Expense, "mdi-home-city", Coin),
    CategorySeed::new("Home Insurance", Expense, "mdi-shield-home", Coin),
    CategorySeed::new("Property Tax", Expense, "mdi-home-currency-usd", Coin),
    CategorySeed::new("Maintenance", Expense, "mdi-tools", Coin),
    // Transportation
    CategorySeed::new("Transportation", Expense, "mdi-car", Coin),
    CategorySeed::new("Fuel", Expense, "mdi-gas-station", Coin),
    CategorySeed::new("Public Transit", Expense, "mdi-bus", Coin),
    CategorySeed::new("Car Insurance", Expense, "mdi-shield-car", Coin),
    CategorySeed::new("Car Maintenance", Expense, "mdi-car-wrench", Coin),
    CategorySeed::new("Parking", Expense, "mdi-parking", Coin),
    CategorySeed::new("Travel", Expense, "mdi-airplane", Coin),
    // Food
    CategorySeed::new("Food & Dining", Expense, "mdi-food", Coin),
    CategorySeed::new("Groceries", Expense, "mdi-cart", Coin),
    CategorySeed::new("Restaurants", Expense, "mdi-silverware-fork-knife", Coin),
    CategorySeed::new("Takeout", Expense, "mdi-food-takeout-box", Coin),
    CategorySeed::new("Coffee", Expense, "mdi-coffee", Coin),
    // Healthcare
    CategorySeed::new("Healthcare", Expense, "mdi-hospital", All),
    CategorySeed::new("Medical Bills", Expense, "mdi-medical-bag", All),
    CategorySeed::new("Dental", Expense, "mdi-tooth", All),
    CategorySeed::new("Vision", Expense, "mdi-glasses", All),
    CategorySeed::new("Pharmacy", Expense, "mdi-pill", All),
    CategorySeed::new("Insurance", Expense, "mdi-shield", All),
    CategorySeed::new("Childcare", Expense, "mdi-baby-carriage", Care),
    // Entertainment
    CategorySeed::new("Entertainment", Expense, "mdi-gamepad-variant", Coin),
    CategorySeed::new("Movies", Expense, "mdi-movie", Coin),
    CategorySeed::new("Streaming Services", Expense, "mdi-play-network", Coin),
    CategorySeed::new("Gaming", Expense, "mdi-controller", Coin),
    CategorySeed::new("Books", Expense, "mdi-book", Coin),
    CategorySeed::new("Hobbies", Expense, "mdi-palette", Coin),
    CategorySeed::new("Camping Gear", Expense, "mdi-tent", Campfire),
    // Shopping
    CategorySeed::new("Shopping", Expense, "mdi-shopping", Coin),
    CategorySeed::new("Clothing", Expense, "mdi-tshirt-crew", Coin),
    CategorySeed::new("Electronics", Expense, "mdi-devices", Coin),
    CategorySeed::new("Home & Garden", Expense, "mdi-home-variant", Coin),
    CategorySeed::new("Personal Care", Expense, "mdi-face-woman", Coin),
    // Education
    CategorySeed::new("Education", Expense, "mdi-school", All),
    CategorySeed::new("Tuition", Expense, "mdi-school", All),
    CategorySeed::new("Books & Supplies", Expense, "mdi-book-open", All),
    CategorySeed::new("Courses", Expense, "mdi-certificate", All),
    CategorySeed::new("Certifications", Expense, "mdi-certificate-outline", Career),
    // Other
    CategorySeed::new("Taxes", Expense, "mdi-bank", Coin),
    CategorySeed::new("Gifts", Expense, "mdi-gift", Coin),
    CategorySeed::new("Donations", Expense, "mdi-hand-heart", Coin),
    CategorySeed::new("Other", Expense, "mdi-dots-horizontal", All),
    CategorySeed::new("Uncategorized", General, "mdi-help-circle", All),
];

/// Inserts every catalog row that is not already present.
///
/// Rows are matched on `(name, app_scope)` among predefined categories, so a
/// partially seeded or partially deleted catalog is completed on the next run
/// and a complete one is left untouched.
pub async fn seed_predefined_categories(
    conn: &mut SqliteConnection,
) -> Result<SeedReport, sqlx::Error> {
    let start_time = Instant::now();
    tracing::info!(catalog = PREDEFINED_CATEGORIES.len(), "seeding predefined categories");

    let now = Utc::now();
    let mut report = SeedReport::default();

    for seed in PREDEFINED_CATEGORIES {
        let result = sqlx::query(
            r#"
            INSERT INTO shared_categories (name, type, icon, app_scope, is_predefined, created_at)
            VALUES (?, ?, ?, ?, 1, ?)
            ON CONFLICT (name, app_scope) WHERE is_predefined = 1 DO NOTHING
            "#,
        )
        .bind(seed.name)
        .bind(seed.kind)
        .bind(seed.icon)
        .bind(seed.app_scope)
        .bind(now)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            report.existing += 1;
        } else {
            report.inserted += 1;
        }
    }

    tracing::info!(
        inserted = report.inserted,
        existing = report.existing,
        elapsed = ?start_time.elapsed(),
        "predefined categories seeded"
    );

    Ok(report)
}

/// Number of predefined rows currently stored.
pub async fn count_predefined(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM shared_categories WHERE is_predefined = 1")
        .fetch_one(conn)
        .await
}

/// Every stored predefined row, whatever its app scope.
pub async fn list_predefined(
    conn: &mut SqliteConnection,
) -> Result<Vec<SharedCategory>, sqlx::Error> {
    sqlx::query_as::<_, SharedCategory>(
        "SELECT id, name, type, icon, app_scope, is_predefined, user_id, parent_id, created_at \
         FROM shared_categories WHERE is_predefined = 1 ORDER BY app_scope, name",
    )
    .fetch_all(conn)
    .await
}
