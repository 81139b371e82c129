//! # reportdesk-database
//!
//! The [`RecordStore`] trait and its backends: a process-local map, a
//! PostgreSQL table accessed through sqlx, and Cloud Firestore over its REST
//! API. [`build_record_store`] picks one from configuration.

pub mod connection;
pub mod firestore;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod store;

use std::sync::Arc;

use tracing::info;

use reportdesk_core::config::{RecordBackend, RecordStoreConfig};
use reportdesk_core::result::AppResult;

pub use connection::DatabasePool;
pub use firestore::FirestoreRecordStore;
pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;
pub use store::RecordStore;

/// Construct the configured record store backend.
pub async fn build_record_store(config: &RecordStoreConfig) -> AppResult<Arc<dyn RecordStore>> {
    info!(backend = config.backend.as_str(), "Initializing record store");

    let store: Arc<dyn RecordStore> = match config.backend {
        RecordBackend::Memory => Arc::new(MemoryRecordStore::new()),
        RecordBackend::Postgres => {
            let pool = DatabasePool::connect(&config.postgres).await?;
            if config.postgres.run_migrations {
                migration::run_migrations(pool.pool()).await?;
            }
            Arc::new(PgRecordStore::new(pool.into_pool()))
        }
        RecordBackend::Firestore => Arc::new(FirestoreRecordStore::new(
            &config.firestore,
            &config.collection,
        )?),
    };

    Ok(store)
}
