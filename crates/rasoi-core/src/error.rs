//! # Error Types
//!
//! Domain-specific error types for rasoi-core.
//!
//! ## Error Hierarchy
//! ```text
//! rasoi-core errors (this file)
//! ├── ValidationError  - non-numeric quantity/discount fields
//! ├── CoreError        - order-level rule violations (empty order)
//! └── RenderError      - bill/report document rendering failures
//!
//! rasoi-db errors (separate crate)
//! ├── PersistenceError - storage failures
//! ├── LedgerError      - submission rejected or write failed
//! └── AuthError        - credential mismatch
//! ```
//!
//! A `ValidationError` aborts the computation that raised it with no
//! side effects on persisted data. All errors are reported
//! synchronously to the initiating action; none are retried.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for the order calculator.
///
/// Raised when a quantity or discount field contains something that is
/// not a number. Blank fields are not errors; they parse as zero.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A quantity field holds a non-numeric value.
    #[error("invalid quantity '{value}' for item {item_id}")]
    InvalidQuantity { item_id: i64, value: String },

    /// The discount field holds a non-numeric value.
    #[error("invalid discount '{value}'")]
    InvalidDiscount { value: String },
}

// =============================================================================
// Core Error
// =============================================================================

/// Order-level business rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Computed final total is not strictly positive; the order is
    /// rejected before any write is attempted.
    #[error("order total must be positive, got {final_total:.2}")]
    EmptyOrder { final_total: f64 },

    /// A quantity or discount field failed to parse.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Render Error
// =============================================================================

/// Document generation failures.
///
/// The print-style bill requires a font resource; when it is missing
/// the renderer fails explicitly instead of producing a degraded
/// document. Callers degrade gracefully by falling back to the
/// plain-text preview, which needs no resources.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The font file required by the print-style bill is absent.
    #[error("font file not found: {}", path.display())]
    FontMissing { path: PathBuf },

    /// CSV encoding or decoding failed.
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding or decoding failed.
    #[error("json export failed: {0}")]
    Json(#[from] serde_json::Error),

    /// An export being re-parsed did not have the expected shape.
    #[error("malformed bill export: {0}")]
    Malformed(String),

    /// Filesystem error while reading a resource or writing an export.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias for calculator results.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
