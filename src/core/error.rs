use std::io;
use std::path::PathBuf;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Conditions the loader can run into while reading a dataset from disk.
///
/// None of these abort a full load: the loader logs them and degrades
/// (empty dataset, empty frame list, truncated annotations or a skipped video).
#[derive(Debug)]
pub enum LoaderError {
    /// The annotations root is missing or is not a directory
    InvalidDirectory(PathBuf),
    /// The image directory of a single video does not exist
    MissingFrameDirectory(PathBuf),
    /// A line that is not `<int>,<int>,<int>,<int>`
    MalformedAnnotationLine {
        path: PathBuf,
        line_number: usize,
        line: String,
    },
    /// An annotation file exists but could not be opened or read
    FileOpenFailure { path: PathBuf, source: io::Error },
    /// Validation ratio outside `[0, 1]` or not finite
    InvalidSplitRatio(f64),
    Config(String),
    Io(io::Error),
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoaderError::InvalidDirectory(path) => {
                write!(f, "{} is not a valid directory", path.display())
            }
            LoaderError::MissingFrameDirectory(path) => {
                write!(f, "frame directory {} does not exist", path.display())
            }
            LoaderError::MalformedAnnotationLine {
                path,
                line_number,
                line,
            } => write!(
                f,
                "malformed annotation at {}:{}: {:?}",
                path.display(),
                line_number,
                line
            ),
            LoaderError::FileOpenFailure { path, source } => {
                write!(f, "failed to open {}: {}", path.display(), source)
            }
            LoaderError::InvalidSplitRatio(ratio) => {
                write!(f, "validation ratio {} is outside [0, 1]", ratio)
            }
            LoaderError::Config(msg) => write!(f, "Invalid configuration: {}", msg),
            LoaderError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for LoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoaderError::FileOpenFailure { source, .. } => Some(source),
            LoaderError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LoaderError {
    fn from(error: io::Error) -> Self {
        LoaderError::Io(error)
    }
}
