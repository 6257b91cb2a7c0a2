use std::ops::Range;
use tracing::info;

use super::types::{Category, Video};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetSplit {
    Train,
    Val,
}

impl DatasetSplit {
    pub fn as_str(&self) -> &str {
        match self {
            DatasetSplit::Train => "train",
            DatasetSplit::Val => "val",
        }
    }

    pub fn is_train(&self) -> bool {
        matches!(self, DatasetSplit::Train)
    }

    pub fn from_want_train(want_train: bool) -> Self {
        if want_train {
            DatasetSplit::Train
        } else {
            DatasetSplit::Val
        }
    }
}

/// Videos selected for one split, copied out of the loader
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VideoSplit {
    pub videos: Vec<Video>,
    pub total_annotated_frames: usize,
}

impl VideoSplit {
    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}

/// Number of videos that go to validation for a category of `num_videos`
pub fn num_val_videos(num_videos: usize, val_ratio: f64) -> usize {
    let num_val = (val_ratio * num_videos as f64).floor();
    if num_val <= 0.0 {
        0
    } else {
        (num_val as usize).min(num_videos)
    }
}

/// Index range of a category's videos belonging to `split`.
///
/// Training takes the first `num_videos - num_val` videos, validation the rest.
/// Both ranges are empty when `num_videos == 0`.
pub fn split_range(num_videos: usize, val_ratio: f64, split: DatasetSplit) -> Range<usize> {
    let num_train = num_videos - num_val_videos(num_videos, val_ratio);
    match split {
        DatasetSplit::Train => 0..num_train,
        DatasetSplit::Val => num_train..num_videos,
    }
}

/// Select the videos of `split` from every category.
///
/// Slices are concatenated in category order, keeping the discovery order
/// within each category.
pub fn select_split(categories: &[Category], val_ratio: f64, split: DatasetSplit) -> VideoSplit {
    let mut videos = Vec::new();
    for category in categories {
        let range = split_range(category.videos.len(), val_ratio, split);
        videos.extend_from_slice(&category.videos[range]);
    }

    let total_annotated_frames = videos.iter().map(|v| v.annotations.len()).sum();
    info!(
        "Selected {} {} videos, total annotated video frames: {}",
        videos.len(),
        split.as_str(),
        total_annotated_frames
    );

    VideoSplit {
        videos,
        total_annotated_frames,
    }
}
