//! Output targets: where each icon goes and how large it is.
//!
//! A target is an explicit `(path, resolution)` pair. Callers that only have
//! a list of paths can infer the resolution from the filename with
//! [`OutputTarget::from_path_hint`]:
//!
//! | Filename contains | Resolution |
//! |---|---|
//! | `192x192` | exactly 192×192 |
//! | `512x512` | exactly 512×512 |
//! | anything else | the icon's own side, capped at 512 |

use crate::imaging::{DEFAULT_MAX_SIDE, Resolution};
use std::path::{Path, PathBuf};

/// Size tokens recognised in filenames, checked in order.
const HINTED_SIZES: &[(&str, u32)] = &[("192x192", 192), ("512x512", 512)];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub path: PathBuf,
    pub resolution: Resolution,
}

impl OutputTarget {
    pub fn new(path: impl Into<PathBuf>, resolution: Resolution) -> Self {
        Self {
            path: path.into(),
            resolution,
        }
    }

    /// Build a target whose resolution is inferred from the filename.
    ///
    /// Only the file name is inspected, so a size token in a parent
    /// directory name has no effect.
    pub fn from_path_hint(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let resolution = resolution_hint(&path);
        Self { path, resolution }
    }

    /// Concrete output dimensions for an icon of side `side`.
    pub fn dimensions_for(&self, side: u32) -> (u32, u32) {
        self.resolution.dimensions_for(side)
    }
}

/// Infer a resolution from a size token in the filename.
pub fn resolution_hint(path: &Path) -> Resolution {
    let filename = path
        .file_name()
        .map(|f| f.to_string_lossy())
        .unwrap_or_default();

    HINTED_SIZES
        .iter()
        .find(|(token, _)| filename.contains(token))
        .map(|&(_, side)| Resolution::square(side))
        .unwrap_or(Resolution::AtMost(DEFAULT_MAX_SIDE))
}

/// Targets for a list of paths, each resolved by filename hint.
pub fn targets_from_paths<P: AsRef<Path>>(paths: &[P]) -> Vec<OutputTarget> {
    paths
        .iter()
        .map(|p| OutputTarget::from_path_hint(p.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_192() {
        let t = OutputTarget::from_path_hint("public/pwa-192x192.png");
        assert_eq!(t.resolution, Resolution::square(192));
        assert_eq!(t.dimensions_for(768), (192, 192));
    }

    #[test]
    fn hint_512() {
        let t = OutputTarget::from_path_hint("public/pwa-512x512.png");
        assert_eq!(t.resolution, Resolution::square(512));
        // Upscales small sources
        assert_eq!(t.dimensions_for(300), (512, 512));
    }

    #[test]
    fn plain_name_caps_at_512() {
        let t = OutputTarget::from_path_hint("public/icon.png");
        assert_eq!(t.resolution, Resolution::AtMost(512));
        assert_eq!(t.dimensions_for(768), (512, 512));
        assert_eq!(t.dimensions_for(256), (256, 256));
    }

    #[test]
    fn hint_ignores_directory_names() {
        let t = OutputTarget::from_path_hint("icons-192x192/icon.png");
        assert_eq!(t.resolution, Resolution::AtMost(512));
    }

    #[test]
    fn hint_matches_anywhere_in_filename() {
        assert_eq!(
            resolution_hint(Path::new("apple-touch-192x192-v2.png")),
            Resolution::square(192)
        );
    }

    #[test]
    fn other_size_tokens_fall_back_to_cap() {
        assert_eq!(
            resolution_hint(Path::new("favicon-32x32.png")),
            Resolution::AtMost(512)
        );
    }

    #[test]
    fn targets_keep_order_and_duplicates() {
        let targets = targets_from_paths(&["a.png", "pwa-192x192.png", "a.png"]);
        let paths: Vec<_> = targets.iter().map(|t| t.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("a.png"),
                PathBuf::from("pwa-192x192.png"),
                PathBuf::from("a.png")
            ]
        );
    }
}
