//! Infrastructure layer: persistence collaborator and configuration.

pub mod config;
pub mod store;

pub use config::{ApiConfig, ConfigError};
pub use store::{
    InMemoryProductStore, ListOrder, ProductCriteria, ProductStore, SortDirection, SortField,
    StoreError, StoreResult,
};
