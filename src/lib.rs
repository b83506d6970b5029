//! # Pet Manager Data Core
//!
//! Local record keeping for pets, their medical history and care
//! reminders: a durable indexed SQLite store plus a domain service that
//! mirrors it in memory and exposes the operations the presentation
//! layer renders from.
//!
//! ```no_run
//! use pet_manager::{PetManagerService, SqliteStore};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let pool = pet_manager::utils::setup_sqlite_db_pool(false).await?;
//! let mut service = PetManagerService::load(SqliteStore::from_pool(pool)).await?;
//!
//! let cards = pet_manager::api::pet::get_pet_cards(&service);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod consts;
pub mod logger;
pub mod models;
pub mod repo;
pub mod utils;

pub use api::service::PetManagerService;
pub use repo::sqlite::SqliteStore;
pub use repo::{StoreError, StoreRecord, StoreResult};
