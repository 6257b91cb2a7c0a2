mod annotation;
mod loader;
mod split;
mod types;

pub use annotation::{
    parse_annotation_file, parse_annotation_line, parse_annotations, ParsedAnnotations,
};
pub use loader::{DatasetSummary, VideoLoader, VisdroneSotLoader, VISDRONE_SOT_CATEGORY};
pub use split::{num_val_videos, select_split, split_range, DatasetSplit, VideoSplit};
pub use types::{BoundingBox, Category, Frame, Video};
