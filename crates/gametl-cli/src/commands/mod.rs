pub mod config;
pub mod models;
pub mod paths;
pub mod run;
pub mod select;
