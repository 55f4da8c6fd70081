//! MongoDB storage driver for database fixture loaders.
//!
//! Fixture loaders seed integration-test databases through a small,
//! engine-agnostic capability: clear a set of collections, bulk-insert the
//! documents for one collection, and close. This crate defines that
//! capability as [`StorageDriver`] and implements it for MongoDB with
//! [`MongoFixtureDriver`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use dbfixtures_mongodb::prelude::*;
//! use bson::doc;
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let driver = MongoFixtureDriver::builder(&client)
//!     .database("app_test")
//!     .build();
//!
//! driver.truncate(&["users".to_string(), "orders".to_string()]).await?;
//! driver
//!     .insert_fixtures("users", vec![
//!         doc! { "name": "Alice", "age": 30 },
//!         doc! { "name": "Bob", "age": 25 },
//!     ])
//!     .await?;
//! driver.close().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior
//!
//! - `truncate` drops each collection in order and stops at the first
//!   failure. Collections that do not exist are skipped silently.
//! - `insert_fixtures` issues one ordered `insertMany`. An empty fixture set
//!   succeeds without contacting the server.
//! - `close` never fails and never disconnects the client, which stays
//!   owned by the caller.
//!
//! # Logging
//!
//! The crate emits `tracing` events at `debug` level only: one per dropped
//! collection, one per inserted batch, and one per skipped empty batch.
//! Failures are returned to the caller, never logged. No subscriber is
//! installed.
//!
//! # Features
//!
//! - `integration-tests` - Run the container-backed test suite (requires Docker)

pub mod backends;
pub mod driver;
pub mod error;
pub mod prelude;

// Re-export commonly used types at crate root
pub use backends::{MongoFixtureDriver, MongoFixtureDriverBuilder};
pub use driver::{StorageDriver, StorageDriverExt};
pub use error::{FixtureError, FixtureResult};
