//! # Club CLI
//!
//! Bootstrap utilities for the shared club database.
//!
//! This library crate provides the seeding used by the `club-cli` binary, so
//! downstream apps can also initialize a database from their own startup code.
//!
//! ## Usage
//!
//! ```ignore
//! use club_cli::seeder::initialize_database;
//!
//! let report = initialize_database("./common-club.db", true).await?;
//! println!("{} categories inserted", report.inserted);
//! ```

pub mod seeder;
