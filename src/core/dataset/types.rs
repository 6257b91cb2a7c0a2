use std::path::{Path, PathBuf};

/// Axis-aligned box in pixel units: top-left `(x1, y1)`, bottom-right `(x2, y2)`.
///
/// `x2 >= x1` and `y2 >= y1` are expected but not enforced; whatever the
/// annotation file contains is passed through.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build a box from `xmin, ymin, width, height` as stored in annotation files
    pub fn from_xywh(xmin: i32, ymin: i32, width: i32, height: i32) -> Self {
        let x1 = f64::from(xmin);
        let y1 = f64::from(ymin);
        Self {
            x1,
            y1,
            x2: x1 + f64::from(width),
            y2: y1 + f64::from(height),
        }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn center_x(&self) -> f64 {
        (self.x1 + self.x2) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        (self.y1 + self.y2) / 2.0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}

/// Ground-truth box for one time step of a video
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// 0-based position in the annotation file, not read from the file
    pub frame_num: usize,
    pub bbox: BoundingBox,
}

/// One annotated video sequence
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Video {
    /// Directory holding the frame images
    pub path: PathBuf,
    /// Frame image files in discovery order
    pub all_frames: Vec<PathBuf>,
    /// Annotations in file order
    pub annotations: Vec<Frame>,
}

impl Video {
    /// Look up the annotation for `frame_num`
    pub fn find_annotation(&self, frame_num: usize) -> Option<&Frame> {
        self.annotations.iter().find(|f| f.frame_num == frame_num)
    }

    /// Image file for `frame_num`, if one was found on disk.
    ///
    /// Annotation and image counts are never cross-checked, so this may be
    /// `None` even when an annotation exists.
    pub fn frame_path(&self, frame_num: usize) -> Option<&Path> {
        self.all_frames.get(frame_num).map(PathBuf::as_path)
    }

    pub fn num_annotations(&self) -> usize {
        self.annotations.len()
    }
}

/// Named group of videos
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Category {
    pub name: String,
    pub videos: Vec<Video>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            videos: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_video(num_frames: usize) -> Video {
        Video {
            path: PathBuf::from("/seq/vid"),
            all_frames: (0..num_frames)
                .map(|i| PathBuf::from(format!("/seq/vid/{:07}.jpg", i + 1)))
                .collect(),
            annotations: (0..num_frames)
                .map(|i| Frame {
                    frame_num: i,
                    bbox: BoundingBox::from_xywh(i as i32, 0, 10, 10),
                })
                .collect(),
        }
    }

    #[test]
    fn test_from_xywh_converts_to_corners() {
        let bbox = BoundingBox::from_xywh(10, 20, 30, 40);
        assert_eq!(bbox, BoundingBox::new(10.0, 20.0, 40.0, 60.0));
        assert_eq!(bbox.width(), 30.0);
        assert_eq!(bbox.height(), 40.0);
        assert_eq!(bbox.center_x(), 25.0);
        assert_eq!(bbox.center_y(), 40.0);
        assert_eq!(bbox.area(), 1200.0);
    }

    #[test]
    fn test_from_xywh_does_not_overflow() {
        let bbox = BoundingBox::from_xywh(i32::MAX, 0, i32::MAX, 1);
        assert_eq!(bbox.x2, 2.0 * f64::from(i32::MAX));
    }

    #[test]
    fn test_negative_size_passes_through() {
        let bbox = BoundingBox::from_xywh(50, 50, -10, -5);
        assert_eq!(bbox.x2, 40.0);
        assert_eq!(bbox.y2, 45.0);
    }

    #[test]
    fn test_find_annotation_and_frame_path() {
        let video = create_test_video(3);
        assert_eq!(video.find_annotation(2).unwrap().bbox.x1, 2.0);
        assert!(video.find_annotation(3).is_none());
        assert_eq!(
            video.frame_path(0),
            Some(Path::new("/seq/vid/0000001.jpg"))
        );
        assert!(video.frame_path(5).is_none());
    }
}
