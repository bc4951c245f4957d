//! Model catalog domain module.

mod filter;
mod source;

pub use filter::filter_models;
pub use source::ModelSource;
