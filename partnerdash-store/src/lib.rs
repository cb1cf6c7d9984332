//! PartnerDash Store
//!
//! Data access for the partner dashboard.
//!
//! # Overview
//!
//! This crate provides:
//! - [`DataSource`] trait implemented by every backend
//! - [`MemoryStore`] seeded with fixtures and generated demo series
//! - [`RemoteStore`] talking to a hosted REST and object storage backend
//! - [`demo`] series generator used by the in-memory store
//! - [`media`] image and video preparation before upload
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use partnerdash_store::{DataSource, SeriesScope, connect};
//!
//! let store: Arc<dyn DataSource> = connect(&config)?;
//! let series = store.metric_series(SeriesScope::Global).await?;
//! ```

pub mod demo;
mod error;
mod fixtures;
pub mod media;
mod memory;
mod remote;
mod source;

use std::sync::Arc;

use partnerdash_common::{DashboardConfig, DataSourceKind};

pub use error::{Result, StoreError};
pub use media::MediaUpload;
pub use memory::MemoryStore;
pub use remote::RemoteStore;
pub use source::{Bucket, DataSource, SeriesScope};

/// Build the data source selected by the configuration.
pub fn connect(config: &DashboardConfig) -> Result<Arc<dyn DataSource>> {
    let store: Arc<dyn DataSource> = match config.data_source {
        DataSourceKind::Mock => Arc::new(MemoryStore::new()),
        DataSourceKind::Remote => Arc::new(RemoteStore::new(&config.remote)?),
    };

    tracing::info!(backend = store.backend_tag(), "Data source ready");
    Ok(store)
}
