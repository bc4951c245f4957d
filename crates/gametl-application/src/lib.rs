//! Application layer for gametl.
//!
//! Services here own the process-wide state (configuration, catalog,
//! progress, job lifecycle) and coordinate the seams defined in
//! `gametl-core` without knowing their concrete implementations.

pub mod config_store;
pub mod job_controller;
pub mod model_catalog;
pub mod progress_hub;

pub use config_store::ConfigStore;
pub use job_controller::JobController;
pub use model_catalog::ModelCatalogService;
pub use progress_hub::{ProgressHub, SharedProgress, Subscription};
