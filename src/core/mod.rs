pub mod dataset;
pub mod error;
pub mod operations;

pub use dataset::*;
pub use error::{LoaderError, LoaderResult};
pub use operations::*;
