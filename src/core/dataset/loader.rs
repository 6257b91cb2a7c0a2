use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use super::annotation::{parse_annotation_file, ParsedAnnotations};
use super::split::{select_split, DatasetSplit, VideoSplit};
use super::types::{Category, Video};
use crate::config::LoaderConfig;
use crate::core::error::{LoaderError, LoaderResult};
use crate::core::operations::{ensure_directory, find_matching_files, frame_dir_for_annotation};

/// Name of the single category built from a VisDrone SOT layout
pub const VISDRONE_SOT_CATEGORY: &str = "visdrone_sot";

/// Read-only access to a loaded tracking dataset
pub trait VideoLoader {
    /// Every loaded video, in discovery order
    fn videos(&self) -> &[Video];

    fn categories(&self) -> &[Category];

    /// Copy out the training (`want_train`) or validation videos
    fn get_videos(&self, want_train: bool) -> VideoSplit;
}

/// Counts describing a loaded dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DatasetSummary {
    pub num_categories: usize,
    pub num_videos: usize,
    pub num_annotations: usize,
    pub num_frame_files: usize,
}

/// Loader for single-object tracking datasets laid out as
///
/// ```text
/// annotations/<video>.txt      one `xmin,ymin,w,h` line per frame
/// sequences/<video>/*.jpg      frame images
/// ```
///
/// All filesystem work happens in [`VisdroneSotLoader::new`]; afterwards the
/// loader is only read.
#[derive(Debug, Clone)]
pub struct VisdroneSotLoader {
    config: LoaderConfig,
    videos: Vec<Video>,
    categories: Vec<Category>,
}

impl VisdroneSotLoader {
    /// Load every video found under `annotations_folder`.
    ///
    /// Never fails: an invalid annotations folder leaves the dataset empty, and
    /// per-video problems are logged and the video degraded or skipped.
    pub fn new(
        video_folder: impl AsRef<Path>,
        annotations_folder: impl AsRef<Path>,
        config: LoaderConfig,
    ) -> Self {
        Self::with_parser(
            video_folder.as_ref(),
            annotations_folder.as_ref(),
            config,
            parse_annotation_file,
        )
    }

    /// Load with `parse` reading each annotation file
    fn with_parser<P>(
        video_folder: &Path,
        annotations_folder: &Path,
        config: LoaderConfig,
        parse: P,
    ) -> Self
    where
        P: Fn(&Path) -> LoaderResult<ParsedAnnotations>,
    {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!("{}. Using default loader config.", e);
                LoaderConfig::default()
            }
        };

        let mut loader = Self {
            config,
            videos: Vec::new(),
            categories: Vec::new(),
        };
        loader.load(video_folder, annotations_folder, &parse);
        loader
    }

    fn load<P>(&mut self, video_folder: &Path, annotations_folder: &Path, parse: &P)
    where
        P: Fn(&Path) -> LoaderResult<ParsedAnnotations>,
    {
        if ensure_directory(annotations_folder).is_err() {
            return;
        }

        let annotation_files =
            match find_matching_files(annotations_folder, &self.config.annotation_extension) {
                Ok(files) => files,
                Err(e) => {
                    error!("Failed to list annotations in {:?}: {}", annotations_folder, e);
                    return;
                }
            };

        let max_vid_num = self.config.video_limit(annotation_files.len());
        info!("Found {} annotations...", max_vid_num);

        let mut category = Category::new(VISDRONE_SOT_CATEGORY);
        for annotation_path in annotation_files.iter().take(max_vid_num) {
            info!("Processing annotation file: {}", annotation_path.display());
            if let Some(video) = self.load_video(video_folder, annotation_path, parse) {
                self.videos.push(video.clone());
                category.videos.push(video);
            }
        }

        self.categories.push(category);
        info!(
            "Loaded {} videos with {} annotated frames",
            self.videos.len(),
            self.videos.iter().map(Video::num_annotations).sum::<usize>()
        );
    }

    /// Build one video, or `None` if its annotation file cannot be read
    fn load_video<P>(
        &self,
        video_folder: &Path,
        annotation_path: &Path,
        parse: &P,
    ) -> Option<Video>
    where
        P: Fn(&Path) -> LoaderResult<ParsedAnnotations>,
    {
        let path = match frame_dir_for_annotation(video_folder, annotation_path) {
            Some(path) => path,
            None => {
                warn!("Cannot derive a video name from {:?}, skipping", annotation_path);
                return None;
            }
        };

        let parsed = match parse(annotation_path) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("{}. Skipping video.", e);
                return None;
            }
        };

        let all_frames = self.find_frames(&path);

        Some(Video {
            path,
            all_frames,
            annotations: parsed.frames,
        })
    }

    fn find_frames(&self, video_path: &Path) -> Vec<PathBuf> {
        match find_matching_files(video_path, &self.config.frame_extension) {
            Ok(frames) => frames,
            Err(LoaderError::InvalidDirectory(_)) => {
                warn!("{}", LoaderError::MissingFrameDirectory(video_path.to_path_buf()));
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to list frames in {:?}: {}", video_path, e);
                Vec::new()
            }
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Same as [`VideoLoader::get_videos`] with a named split
    pub fn get_split(&self, split: DatasetSplit) -> VideoSplit {
        select_split(&self.categories, self.config.val_ratio, split)
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            num_categories: self.categories.len(),
            num_videos: self.videos.len(),
            num_annotations: self.videos.iter().map(Video::num_annotations).sum(),
            num_frame_files: self.videos.iter().map(|v| v.all_frames.len()).sum(),
        }
    }
}

impl VideoLoader for VisdroneSotLoader {
    fn videos(&self) -> &[Video] {
        &self.videos
    }

    fn categories(&self) -> &[Category] {
        &self.categories
    }

    fn get_videos(&self, want_train: bool) -> VideoSplit {
        self.get_split(DatasetSplit::from_want_train(want_train))
    }
}
