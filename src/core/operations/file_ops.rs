use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

use crate::core::error::{LoaderError, LoaderResult};

/// Check that `dir` exists and is a directory.
///
/// # Returns
/// * `Ok(())` if the directory can be scanned
/// * `Err(LoaderError::InvalidDirectory)` otherwise
pub fn ensure_directory(dir: &Path) -> LoaderResult<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        error!("Error - {:?} is not a valid directory!", dir);
        Err(LoaderError::InvalidDirectory(dir.to_path_buf()))
    }
}

/// List the regular files directly inside `dir` whose extension is `extension`.
///
/// The comparison is case-sensitive. A file named only `.txt` has no
/// extension and is not matched, since it would name a video with an empty
/// stem. Results are sorted by file name so the order only depends on the
/// directory contents.
///
/// # Arguments
/// * `dir` - Directory to scan (not recursive)
/// * `extension` - Extension without the leading dot, e.g. `"txt"`
///
/// # Returns
/// * `Ok(Vec<PathBuf>)` with full paths of the matching files
/// * `Err(LoaderError::InvalidDirectory)` if `dir` is not a directory
/// * `Err(LoaderError::Io)` if reading the directory fails
pub fn find_matching_files(dir: &Path, extension: &str) -> LoaderResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(LoaderError::InvalidDirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) == Some(extension) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!("Found {} *.{} files in {:?}", files.len(), extension, dir);
    Ok(files)
}

/// Derive the image directory of a video from its annotation file name.
///
/// `uav0000013_00000_s.txt` under `video_root` maps to
/// `video_root/uav0000013_00000_s`.
pub fn frame_dir_for_annotation(video_root: &Path, annotation_file: &Path) -> Option<PathBuf> {
    annotation_file.file_stem().map(|stem| video_root.join(stem))
}
