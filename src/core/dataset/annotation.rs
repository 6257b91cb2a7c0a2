use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

use super::types::{BoundingBox, Frame};
use crate::core::error::{LoaderError, LoaderResult};

/// Frames read from one annotation file
#[derive(Debug, Default)]
pub struct ParsedAnnotations {
    pub frames: Vec<Frame>,
    /// Set when reading stopped early at a malformed line
    pub truncated_by: Option<LoaderError>,
}

impl ParsedAnnotations {
    pub fn is_truncated(&self) -> bool {
        self.truncated_by.is_some()
    }
}

/// Parse one `xmin,ymin,width,height` line.
///
/// Surrounding whitespace on each field is ignored. Exactly four integer
/// fields are required.
pub fn parse_annotation_line(line: &str) -> Option<(i32, i32, i32, i32)> {
    let mut fields = line.split(',').map(str::trim);
    let xmin = fields.next()?.parse::<i32>().ok()?;
    let ymin = fields.next()?.parse::<i32>().ok()?;
    let width = fields.next()?.parse::<i32>().ok()?;
    let height = fields.next()?.parse::<i32>().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some((xmin, ymin, width, height))
}

/// Read annotations from `reader`, one box per line.
///
/// Frame numbers are assigned sequentially from 0 in read order. Blank lines
/// are skipped and do not consume a frame number. The first malformed line
/// stops parsing: frames before it are kept and the condition is returned in
/// `truncated_by`.
///
/// # Arguments
/// * `reader` - Source of annotation text
/// * `source` - Path used in diagnostics
///
/// # Returns
/// * `Ok(ParsedAnnotations)` with every frame read before EOF or the first bad line
/// * `Err(LoaderError::Io)` if the reader itself fails
pub fn parse_annotations<R: BufRead>(reader: R, source: &Path) -> LoaderResult<ParsedAnnotations> {
    let mut parsed = ParsedAnnotations::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            // Non UTF-8 bytes cannot be a valid line; treat them like any other bad line
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                let err = LoaderError::MalformedAnnotationLine {
                    path: source.to_path_buf(),
                    line_number: idx + 1,
                    line: String::from("<invalid UTF-8>"),
                };
                warn!("{}; keeping {} frames", err, parsed.frames.len());
                parsed.truncated_by = Some(err);
                break;
            }
            Err(e) => return Err(e.into()),
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match parse_annotation_line(trimmed) {
            Some((xmin, ymin, width, height)) => {
                let frame_num = parsed.frames.len();
                parsed.frames.push(Frame {
                    frame_num,
                    bbox: BoundingBox::from_xywh(xmin, ymin, width, height),
                });
            }
            None => {
                let err = LoaderError::MalformedAnnotationLine {
                    path: source.to_path_buf(),
                    line_number: idx + 1,
                    line: line.clone(),
                };
                warn!("{}; keeping {} frames", err, parsed.frames.len());
                parsed.truncated_by = Some(err);
                break;
            }
        }
    }

    Ok(parsed)
}

/// Open and parse an annotation file.
///
/// The file handle is dropped on every return path, including early stops.
///
/// # Returns
/// * `Ok(ParsedAnnotations)` if the file could be opened and read
/// * `Err(LoaderError::FileOpenFailure)` if it could not be opened or read
pub fn parse_annotation_file(path: &Path) -> LoaderResult<ParsedAnnotations> {
    let file = File::open(path).map_err(|source| LoaderError::FileOpenFailure {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = parse_annotations(BufReader::new(file), path).map_err(|err| match err {
        LoaderError::Io(source) => LoaderError::FileOpenFailure {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    debug!("Parsed {} annotations from {:?}", parsed.frames.len(), path);
    Ok(parsed)
}
