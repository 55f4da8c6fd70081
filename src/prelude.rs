//! Convenience re-exports for common usage.
//!
//! ```ignore
//! use dbfixtures_mongodb::prelude::*;
//! ```

pub use crate::backends::{MongoFixtureDriver, MongoFixtureDriverBuilder};
pub use crate::driver::{StorageDriver, StorageDriverExt};
pub use crate::error::{FixtureError, FixtureResult};
