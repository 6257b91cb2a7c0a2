//! Loader for single-object tracking datasets in the VisDrone SOT layout.
//!
//! [`VisdroneSotLoader`] reads every `<video>.txt` annotation file, pairs it
//! with the `<video>/*.jpg` frame directory, and hands out positional
//! training / validation splits.

pub mod config;
pub mod core;
pub mod logging;

pub use crate::config::LoaderConfig;
pub use crate::core::{
    BoundingBox, Category, DatasetSplit, DatasetSummary, Frame, LoaderError, LoaderResult, Video,
    VideoLoader, VideoSplit, VisdroneSotLoader,
};
