//! # outliner-core
//!
//! Heading inference for paginated documents.
//!
//! This crate provides:
//! - the line feature store and text normalization
//! - style clustering, candidate filtering and size thresholds
//! - level classification and outline consolidation
//! - the OCR fallback heuristic and title selection
//! - the [`OutlineEngine`] that runs them per document, plus the collaborator
//!   traits ([`LineSource`], [`LanguageTagger`], [`OcrSource`]) backends plug in

/// Cooperative cancellation for time budgets.
pub mod cancel;
/// Heading level assignment.
pub mod classify;
/// Style clustering over size and vertical position.
pub mod cluster;
/// Heuristic parameters.
pub mod config;
/// Merging and ordering of classified headings.
pub mod consolidate;
/// Error types and result aliases.
pub mod error;
/// Heading candidate filter.
pub mod filter;
/// Language tagging of lines.
pub mod language;
/// Raw and normalized line records.
pub mod line;
/// OCR fallback heuristic.
pub mod ocr;
/// The per-document engine.
pub mod pipeline;
/// Text normalization and typographic cues.
pub mod text;
/// Size bands.
pub mod thresholds;
/// Title selection.
pub mod title;

pub use cancel::CancelToken;
pub use classify::Level;
pub use config::HeuristicConfig;
pub use consolidate::OutlineEntry;
pub use error::{OutlineError, OutlineResult};
pub use language::{LanguageTagger, NoLanguage, ScriptTagger};
pub use line::{Alignment, Line, RawLine};
pub use ocr::{NoOcr, OcrSource};
pub use pipeline::{DocumentOutline, LineSource, OutlineEngine};
pub use thresholds::Thresholds;
