//! CLI output formatting.
//!
//! Every pipeline event maps to zero or more display lines. Format functions
//! are pure (they return `Vec<String>`) so they can be tested without
//! capturing stdout; `main` does the printing.
//!
//! # Output Format
//!
//! ## make
//!
//! ```text
//! Source: public/icon.jpg (1024x768)
//!     Cropped to 768x768 circle
//!     Border: 38px (inner 692x692)
//! Saved public/icon.png (512x512)
//! Saved public/pwa-192x192.png (192x192)
//! Saved public/pwa-512x512.png (512x512)
//! Wrote 3 icons
//! ```
//!
//! A target that cannot be written prints `Failed <path>: <reason>` on stderr
//! in place of its `Saved` line.
//!
//! ## check
//!
//! ```text
//! Source: public/icon.jpg (1024x768)
//!     Icon side: 768px
//!     Border: none
//! Targets
//! 001 public/icon.png → 512x512
//! 002 public/pwa-192x192.png → 192x192
//! ```

use crate::compose::{IconEvent, IconReport};
use crate::targets::OutputTarget;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn source_line(path: &Path, width: u32, height: u32) -> String {
    format!("Source: {} ({}x{})", path.display(), width, height)
}

pub fn format_icon_event(event: &IconEvent) -> Vec<String> {
    match event {
        IconEvent::Loaded {
            path,
            width,
            height,
        } => vec![source_line(path, *width, *height)],
        IconEvent::Cropped { side } => vec![format!("    Cropped to {side}x{side} circle")],
        IconEvent::Bordered {
            border_width,
            inner_size,
        } => vec![format!(
            "    Border: {border_width}px (inner {inner_size}x{inner_size})"
        )],
        IconEvent::Saved {
            path,
            width,
            height,
        } => vec![format!("Saved {} ({}x{})", path.display(), width, height)],
        IconEvent::SaveFailed { path, message } => {
            vec![format!("Failed {}: {}", path.display(), message)]
        }
    }
}

/// Closing summary after a `make` run.
pub fn format_report_summary(report: &IconReport) -> Vec<String> {
    let written = report.written.len();
    let noun = if written == 1 { "icon" } else { "icons" };
    let mut lines = vec![format!("Wrote {written} {noun}")];
    let failed = report.failures.len();
    if failed > 0 {
        let noun = if failed == 1 { "icon" } else { "icons" };
        lines.push(format!("Failed {failed} {noun}"));
    }
    lines
}

/// Dry-run plan printed by `check`.
pub fn format_plan(
    source: &Path,
    source_dimensions: (u32, u32),
    side: u32,
    border_width: u32,
    targets: &[OutputTarget],
) -> Vec<String> {
    let (w, h) = source_dimensions;
    let mut lines = vec![source_line(source, w, h)];
    lines.push(format!("    Icon side: {side}px"));
    if border_width == 0 {
        lines.push("    Border: none".to_string());
    } else {
        lines.push(format!("    Border: {border_width}px"));
    }
    lines.push("Targets".to_string());
    for (i, target) in targets.iter().enumerate() {
        let (tw, th) = target.dimensions_for(side);
        lines.push(format!(
            "{} {} \u{2192} {}x{}",
            format_index(i + 1),
            target.path.display(),
            tw,
            th
        ));
    }
    lines
}

pub fn print_plan(
    source: &Path,
    source_dimensions: (u32, u32),
    side: u32,
    border_width: u32,
    targets: &[OutputTarget],
) {
    for line in format_plan(source, source_dimensions, side, border_width, targets) {
        println!("{}", line);
    }
}
