pub mod manager;
pub mod models;

pub use manager::{StoreError, StoreManager};
