pub mod aggregation;
pub mod classifier;
pub mod components;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod fleet;
pub mod kiosk_loader;
pub mod nearest;
pub mod pipelines;
pub mod selector;
pub mod types;
pub mod util;
