//! Error types for the pattern translator
//!
//! Errors are categorized by where they surface: parsing the vendor pattern,
//! checking capture names, or compiling the translated regex. Unrecognized
//! `<...>` constructs are not errors at all; they pass through as literal text.

use thiserror::Error;

/// The main error type for pattern translation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranslateError {
    /// Errors that occur while parsing the vendor pattern
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Two capture variables adapt to the same regex group name
    #[error("duplicate capture name '{name}' in pattern `{pattern}`")]
    DuplicateCaptureName {
        /// The adapted group name that occurs more than once
        name: String,
        /// The vendor pattern being translated
        pattern: String,
    },

    /// The translated regex was rejected by the regex compiler
    #[error("translated pattern `{regex}` does not compile: {message}")]
    Compile {
        /// The translated regex source
        regex: String,
        /// The compiler's diagnostic
        message: String,
    },

    /// The regex engine gave up while matching (backtracking limit)
    #[error("match error: {0}")]
    Match(String),
}

/// Errors that occur during parsing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Bracket or group nesting exceeds the configured bound
    #[error("nesting depth exceeds {max_depth} at position {position}")]
    NestingTooDeep {
        /// The configured maximum depth
        max_depth: usize,
        /// Byte offset of the group that crossed the bound
        position: usize,
    },
}

/// A span representing a location in the source pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start position (inclusive)
    pub start: usize,
    /// End position (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// The slice of `source` this span covers
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// Result type alias for translation operations
pub type Result<T> = std::result::Result<T, TranslateError>;
