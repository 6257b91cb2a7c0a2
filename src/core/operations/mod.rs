mod file_ops;

pub use file_ops::{ensure_directory, find_matching_files, frame_dir_for_annotation};
