//! The icon pipeline: one source image in, one or more circular icons out.
//!
//! ```text
//! load → square crop → circle mask → [white border] → per target: resize → PNG
//! ```
//!
//! The composited icon is built once; every target is a resample of that
//! single buffer, so targets never depend on each other.
//!
//! ## Write failures
//!
//! What happens when one target cannot be written is chosen by the caller
//! through [`WritePolicy`]:
//!
//! - [`WritePolicy::Abort`] writes targets in order and stops at the first
//!   failure. Files written before the failure stay on disk.
//! - [`WritePolicy::Continue`] writes all targets in parallel and collects
//!   the failures in [`IconReport::failures`].
//!
//! ## Progress events
//!
//! [`compose_with_backend`] sends an [`IconEvent`] over an mpsc channel as
//! each step finishes: source loaded, circle cropped, border drawn, and one
//! `Saved` or `SaveFailed` per target. Pass `None` to run silently.

use crate::imaging::operations::{add_border, circular, resize_to};
use crate::imaging::{
    BackendError, BorderRatio, IconBackend, InvalidBorderRatio, RustBackend, centered_square_crop,
};
use crate::targets::{OutputTarget, targets_from_paths};
use image::RgbaImage;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IconError {
    #[error("Source image not found: {0}")]
    SourceNotFound(PathBuf),
    #[error("Source image has no pixels: {0}")]
    EmptySource(PathBuf),
    #[error("No output targets given")]
    NoTargets,
    #[error(transparent)]
    InvalidBorderRatio(#[from] InvalidBorderRatio),
    #[error("Failed to load source: {0}")]
    Load(#[source] BackendError),
    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: BackendError },
}

/// What to do when a target cannot be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WritePolicy {
    /// Stop at the first failed write.
    #[default]
    Abort,
    /// Attempt every target and report all failures at the end.
    Continue,
}

/// Options shared by all targets of one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct IconOptions {
    pub border: BorderRatio,
    pub on_write_error: WritePolicy,
}

/// Progress notifications emitted while the pipeline runs.
#[derive(Debug, Clone, PartialEq)]
pub enum IconEvent {
    Loaded {
        path: PathBuf,
        width: u32,
        height: u32,
    },
    Cropped {
        side: u32,
    },
    Bordered {
        border_width: u32,
        inner_size: u32,
    },
    Saved {
        path: PathBuf,
        width: u32,
        height: u32,
    },
    SaveFailed {
        path: PathBuf,
        message: String,
    },
}

/// A target that was written successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenIcon {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// A target that could not be written (only under [`WritePolicy::Continue`]).
#[derive(Debug)]
pub struct FailedIcon {
    pub path: PathBuf,
    pub error: BackendError,
}

/// Summary of one pipeline run.
#[derive(Debug)]
pub struct IconReport {
    /// Source dimensions before cropping.
    pub source_dimensions: (u32, u32),
    /// Side of the square icon before per-target resizing.
    pub side: u32,
    /// Border width in pixels; 0 when no border was drawn.
    pub border_width: u32,
    pub written: Vec<WrittenIcon>,
    pub failures: Vec<FailedIcon>,
}

impl IconReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Produce circular icons from `source` at each destination.
///
/// Destination sizes are inferred from their filenames; see
/// [`OutputTarget::from_path_hint`]. A `border_ratio` of 0 draws no border.
pub fn produce_icons<P: AsRef<Path>>(
    source: &Path,
    destinations: &[P],
    border_ratio: f64,
) -> Result<IconReport, IconError> {
    let options = IconOptions {
        border: BorderRatio::new(border_ratio)?,
        on_write_error: WritePolicy::Abort,
    };
    let targets = targets_from_paths(destinations);
    compose_with_backend(&RustBackend::new(), source, &targets, &options, None)
}

/// Geometry of a run, computed without compositing or writing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconPlan {
    pub source_dimensions: (u32, u32),
    pub side: u32,
    pub border_width: u32,
}

/// Decode the source and work out the icon geometry, for dry runs.
pub fn plan_with_backend(
    backend: &impl IconBackend,
    source: &Path,
    border: BorderRatio,
) -> Result<IconPlan, IconError> {
    let original = load_source(backend, source)?;
    let (width, height) = original.dimensions();
    let side = centered_square_crop(width, height).side;
    Ok(IconPlan {
        source_dimensions: (width, height),
        side,
        border_width: border.width_for(side),
    })
}

fn load_source(backend: &impl IconBackend, source: &Path) -> Result<RgbaImage, IconError> {
    if !source.exists() {
        return Err(IconError::SourceNotFound(source.to_path_buf()));
    }
    let original = backend.load(source).map_err(IconError::Load)?;
    if original.width() == 0 || original.height() == 0 {
        return Err(IconError::EmptySource(source.to_path_buf()));
    }
    Ok(original)
}

/// Run the full pipeline with an explicit backend, target list and options.
pub fn compose_with_backend(
    backend: &impl IconBackend,
    source: &Path,
    targets: &[OutputTarget],
    options: &IconOptions,
    events: Option<Sender<IconEvent>>,
) -> Result<IconReport, IconError> {
    if targets.is_empty() {
        return Err(IconError::NoTargets);
    }
    let original = load_source(backend, source)?;
    let (width, height) = original.dimensions();
    emit(
        &events,
        IconEvent::Loaded {
            path: source.to_path_buf(),
            width,
            height,
        },
    );

    let icon = build_icon(&original, options.border, &events);
    let side = icon.width();

    let mut report = IconReport {
        source_dimensions: (width, height),
        side,
        border_width: options.border.width_for(side),
        written: Vec::new(),
        failures: Vec::new(),
    };

    match options.on_write_error {
        WritePolicy::Abort => {
            for target in targets {
                match write_target(backend, &icon, target, &events) {
                    Ok(written) => report.written.push(written),
                    Err(source) => {
                        return Err(IconError::Write {
                            path: target.path.clone(),
                            source,
                        });
                    }
                }
            }
        }
        WritePolicy::Continue => {
            let results: Vec<_> = targets
                .par_iter()
                .map_with(events.clone(), |tx, target| {
                    write_target(backend, &icon, target, tx).map_err(|error| FailedIcon {
                        path: target.path.clone(),
                        error,
                    })
                })
                .collect();
            for result in results {
                match result {
                    Ok(written) => report.written.push(written),
                    Err(failed) => report.failures.push(failed),
                }
            }
        }
    }

    Ok(report)
}

/// Build the final square icon: circular crop plus optional border.
fn build_icon(
    original: &RgbaImage,
    border: BorderRatio,
    events: &Option<Sender<IconEvent>>,
) -> RgbaImage {
    let circle = circular(original);
    let side = circle.width();
    emit(events, IconEvent::Cropped { side });

    let border_width = border.width_for(side);
    if border_width == 0 {
        return circle;
    }
    emit(
        events,
        IconEvent::Bordered {
            border_width,
            inner_size: border.inner_size_for(side),
        },
    );
    add_border(&circle, border)
}

fn write_target(
    backend: &impl IconBackend,
    icon: &RgbaImage,
    target: &OutputTarget,
    events: &Option<Sender<IconEvent>>,
) -> Result<WrittenIcon, BackendError> {
    let (width, height) = target.dimensions_for(icon.width());
    let resized = resize_to(icon, width, height);
    if let Err(e) = backend.save(&resized, &target.path) {
        emit(
            events,
            IconEvent::SaveFailed {
                path: target.path.clone(),
                message: e.to_string(),
            },
        );
        return Err(e);
    }
    emit(
        events,
        IconEvent::Saved {
            path: target.path.clone(),
            width,
            height,
        },
    );
    Ok(WrittenIcon {
        path: target.path.clone(),
        width,
        height,
    })
}

fn emit(events: &Option<Sender<IconEvent>>, event: IconEvent) {
    if let Some(tx) = events {
        // A closed receiver only means nobody is listening
        let _ = tx.send(event);
    }
}
