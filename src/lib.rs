//! # Roundel
//!
//! Turns one image into a set of circular icons: the app icon and the PWA
//! manifest sizes, optionally framed by a white ring.
//!
//! # Pipeline
//!
//! ```text
//! source.jpg ─ load ─ square crop ─ circle mask ─ [border] ─┬─ resize ─ icon.png
//!                                                           ├─ resize ─ pwa-192x192.png
//!                                                           └─ resize ─ pwa-512x512.png
//! ```
//!
//! The composited icon is built once and each target is an independent
//! resample of it. Nothing is cached between runs; outputs are overwritten.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`compose`] | The pipeline: [`compose::produce_icons`], write policy, progress events |
//! | [`imaging`] | Pure-Rust image operations: crop, mask, border, resize, PNG I/O |
//! | [`targets`] | Output targets and filename-based size inference |
//! | [`config`] | `roundel.toml` loading, merging over stock defaults, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Explicit Targets
//!
//! A target is a `(path, resolution)` pair. Inferring the size from a
//! `192x192` token in the filename is kept as a convenience for plain path
//! lists, but a config entry with `size = N` always wins.
//!
//! ## Caller-Chosen Failure Handling
//!
//! Every stage returns a typed error. Whether a failed write aborts the run or
//! lets the other targets finish is a [`compose::WritePolicy`] chosen by the
//! caller; the default aborts.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, Lanczos3 resampling and PNG encoding all come from the `image`
//! crate. No ImageMagick, no system libraries.

pub mod compose;
pub mod config;
pub mod imaging;
pub mod output;
pub mod targets;

#[cfg(test)]
pub(crate) mod test_helpers;
