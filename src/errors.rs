//! Error types with diagnostics using miette
//!
//! Only the data edge is fallible: bootstrap (grid JSON), enum parsing of
//! external records, and SVG metadata extraction. Lookups inside the
//! placement path never return these; they degrade to a fallback value.

use miette::Diagnostic;
use thiserror::Error;

// ============================================================================
// Grid Errors
// ============================================================================

/// Errors raised while building grid tables at bootstrap
#[derive(Error, Diagnostic, Debug)]
pub enum GridError {
    #[error("grid table is not valid JSON")]
    #[diagnostic(code(kinetic::grid::invalid_json))]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("grid table has no `{mode}` section")]
    #[diagnostic(
        code(kinetic::grid::missing_mode),
        help("the table must contain both `diamond` and `box` sections")
    )]
    MissingGridMode { mode: String },

    #[error("grid table for `{mode}` has no center_point")]
    #[diagnostic(code(kinetic::grid::missing_center))]
    MissingCenterPoint { mode: String },
}

// ============================================================================
// Notation Errors
// ============================================================================

/// Unrecognized notation values at the data edge (CSV/JSON records)
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("unknown motion type: {value}")]
    #[diagnostic(
        code(kinetic::notation::motion_type),
        help("expected one of pro, anti, float, dash, static")
    )]
    UnknownMotionType { value: String },

    #[error("unknown location: {value}")]
    #[diagnostic(
        code(kinetic::notation::location),
        help("expected a compass point: n, e, s, w, ne, se, sw, nw")
    )]
    UnknownLocation { value: String },

    #[error("unknown orientation: {value}")]
    #[diagnostic(
        code(kinetic::notation::orientation),
        help("expected one of in, out, clock, counter")
    )]
    UnknownOrientation { value: String },

    #[error("unknown prop rotation direction: {value}")]
    #[diagnostic(
        code(kinetic::notation::prop_rot_dir),
        help("expected one of cw, ccw, no_rot")
    )]
    UnknownPropRotDir { value: String },

    #[error("unknown hand rotation direction: {value}")]
    #[diagnostic(
        code(kinetic::notation::hand_rot_dir),
        help("expected one of cw_shift, ccw_shift, dash, static")
    )]
    UnknownHandRotDir { value: String },

    #[error("unknown grid mode: {value}")]
    #[diagnostic(code(kinetic::notation::grid_mode), help("expected diamond or box"))]
    UnknownGridMode { value: String },

    #[error("unknown color: {value}")]
    #[diagnostic(code(kinetic::notation::color), help("expected red or blue"))]
    UnknownColor { value: String },

    #[error("invalid turns value: {value}")]
    #[diagnostic(
        code(kinetic::notation::turns),
        help("expected 0, 0.5, 1, 1.5, 2, 2.5, 3 or \"fl\"")
    )]
    InvalidTurns { value: String },
}

// ============================================================================
// Coordinate Errors
// ============================================================================

/// A single grid coordinate string that could not be read.
///
/// The grid store turns these into a `(0, 0)` entry plus a warning.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum CoordParseError {
    #[error("malformed coordinate tuple: {input:?}")]
    #[diagnostic(code(kinetic::coords::syntax))]
    Syntax { input: String },

    #[error("coordinate tuple {input:?} has {found} components, expected 2")]
    #[diagnostic(code(kinetic::coords::token_count))]
    TokenCount { input: String, found: usize },

    #[error("coordinate tuple {input:?} is not finite")]
    #[diagnostic(code(kinetic::coords::non_finite))]
    NonFinite { input: String },
}

// ============================================================================
// SVG Errors
// ============================================================================

/// Errors while extracting metadata from arrow/prop SVG text
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum SvgError {
    #[error("svg has no viewBox attribute")]
    #[diagnostic(code(kinetic::svg::missing_viewbox))]
    MissingViewBox,

    #[error("invalid viewBox: {value:?}")]
    #[diagnostic(
        code(kinetic::svg::invalid_viewbox),
        help("viewBox must be four numbers: min-x min-y width height")
    )]
    InvalidViewBox { value: String },
}
