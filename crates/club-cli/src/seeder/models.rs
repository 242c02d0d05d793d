//! Seed records and seeding results.

use club_models::{AppScope, CategoryKind};

/// One predefined category in the seed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySeed {
    pub name: &'static str,
    pub kind: CategoryKind,
    pub icon: &'static str,
    pub app_scope: AppScope,
}

impl CategorySeed {
    pub const fn new(
        name: &'static str,
        kind: CategoryKind,
        icon: &'static str,
        app_scope: AppScope,
    ) -> Self {
        Self {
            name,
            kind,
            icon,
            app_scope,
        }
    }
}

/// Outcome of a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Catalog rows written by this run.
    pub inserted: usize,
    /// Catalog rows that were already present.
    pub existing: usize,
}

impl SeedReport {
    pub fn total(&self) -> usize {
        self.inserted + self.existing
    }
}
