// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for ephysio.
//!
//! Provides error types for adapter operations:
//! - Format classification and reader construction
//! - Channel lookup and stream resolution
//! - Sample and event extraction
//!
//! Every variant carries enough context for the caller to diagnose the
//! failure without re-querying the header. No variant is retried
//! internally: all failures are deterministic for a fixed file-set and
//! request.

use std::fmt;

/// Errors that can occur during adapter operations.
#[derive(Debug, Clone)]
pub enum AdapterError {
    /// No registered format matched the input path
    FormatNotRecognized {
        /// Path that failed classification
        path: String,
        /// Names of the classifiers that were attempted, in order
        attempted: Vec<String>,
    },

    /// A requested channel identifier matched no channel
    ChannelNotFound {
        /// Identifier that was requested
        identifier: String,
        /// Channel names available in the partition that was searched
        available: Vec<String>,
    },

    /// A requested channel name matched more than one channel
    AmbiguousChannel {
        /// Identifier that was requested
        identifier: String,
        /// Number of channels that matched
        matches: usize,
    },

    /// Requested channels span more than one acquisition stream
    MultiStreamViolation {
        /// (channel id, stream id) pair for every requested channel
        assignments: Vec<(String, String)>,
    },

    /// Sample range outside the segment's sample bounds
    SampleRangeOutOfBounds {
        /// Requested start sample (caller convention, 1-based inclusive)
        start: i64,
        /// Requested end sample (caller convention, 1-based inclusive)
        end: i64,
        /// Number of samples available in the segment
        available: u64,
    },

    /// Channel kind not valid for the requested operation
    UnsupportedChannelKind {
        /// Kind value as received from the caller
        received: String,
        /// Kinds the operation accepts
        expected: Vec<String>,
    },

    /// Block or segment index outside the recording's structure
    SelectorOutOfRange {
        /// Which selector was out of range ("block" or "segment")
        selector: String,
        /// Index that was requested
        index: usize,
        /// Number of entries available
        available: usize,
    },

    /// Header is malformed or self-inconsistent
    HeaderError {
        /// What was being resolved against the header
        context: String,
        /// Error message
        message: String,
    },

    /// Other error
    Other(String),
}

impl AdapterError {
    /// Create a format-not-recognized error.
    pub fn format_not_recognized(
        path: impl Into<String>,
        attempted: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        AdapterError::FormatNotRecognized {
            path: path.into(),
            attempted: attempted.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a channel-not-found error.
    pub fn channel_not_found(
        identifier: impl Into<String>,
        available: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        AdapterError::ChannelNotFound {
            identifier: identifier.into(),
            available: available.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an ambiguous-channel error.
    pub fn ambiguous_channel(identifier: impl Into<String>, matches: usize) -> Self {
        AdapterError::AmbiguousChannel {
            identifier: identifier.into(),
            matches,
        }
    }

    /// Create a multi-stream violation from (channel id, stream id) pairs.
    pub fn multi_stream_violation(assignments: Vec<(String, String)>) -> Self {
        AdapterError::MultiStreamViolation { assignments }
    }

    /// Create a sample-range error.
    pub fn sample_range_out_of_bounds(start: i64, end: i64, available: u64) -> Self {
        AdapterError::SampleRangeOutOfBounds {
            start,
            end,
            available,
        }
    }

    /// Create an unsupported-channel-kind error.
    pub fn unsupported_channel_kind(
        received: impl Into<String>,
        expected: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        AdapterError::UnsupportedChannelKind {
            received: received.into(),
            expected: expected.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a selector-out-of-range error.
    pub fn selector_out_of_range(
        selector: impl Into<String>,
        index: usize,
        available: usize,
    ) -> Self {
        AdapterError::SelectorOutOfRange {
            selector: selector.into(),
            index,
            available,
        }
    }

    /// Create a header error.
    pub fn header(context: impl Into<String>, message: impl Into<String>) -> Self {
        AdapterError::HeaderError {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            AdapterError::FormatNotRecognized { path, attempted } => vec![
                ("path", path.clone()),
                ("attempted", attempted.join(", ")),
            ],
            AdapterError::ChannelNotFound {
                identifier,
                available,
            } => vec![
                ("identifier", identifier.clone()),
                ("available", available.join(", ")),
            ],
            AdapterError::AmbiguousChannel {
                identifier,
                matches,
            } => vec![
                ("identifier", identifier.clone()),
                ("matches", matches.to_string()),
            ],
            AdapterError::MultiStreamViolation { assignments } => vec![(
                "assignments",
                assignments
                    .iter()
                    .map(|(c, s)| format!("{c}->{s}"))
                    .collect::<Vec<_>>()
                    .join(", "),
            )],
            AdapterError::SampleRangeOutOfBounds {
                start,
                end,
                available,
            } => vec![
                ("start", start.to_string()),
                ("end", end.to_string()),
                ("available", available.to_string()),
            ],
            AdapterError::UnsupportedChannelKind { received, expected } => vec![
                ("received", received.clone()),
                ("expected", expected.join(", ")),
            ],
            AdapterError::SelectorOutOfRange {
                selector,
                index,
                available,
            } => vec![
                ("selector", selector.clone()),
                ("index", index.to_string()),
                ("available", available.to_string()),
            ],
            AdapterError::HeaderError { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            AdapterError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdapterError::FormatNotRecognized { path, attempted } => {
                write!(
                    f,
                    "No known format recognizes '{path}' (attempted: {})",
                    attempted.join(", ")
                )
            }
            AdapterError::ChannelNotFound {
                identifier,
                available,
            } => {
                if available.is_empty() {
                    write!(f, "Channel not found: '{identifier}'")
                } else {
                    write!(
                        f,
                        "Channel not found: '{identifier}' (available: {})",
                        available.join(", ")
                    )
                }
            }
            AdapterError::AmbiguousChannel {
                identifier,
                matches,
            } => write!(
                f,
                "Ambiguous channel name '{identifier}': {matches} channels match"
            ),
            AdapterError::MultiStreamViolation { assignments } => {
                writeln!(
                    f,
                    "All requested channels must belong to a single signal stream."
                )?;
                for (channel_id, stream_id) in assignments {
                    writeln!(f, "Channel_id: '{channel_id}', stream_id: '{stream_id}'.")?;
                }
                Ok(())
            }
            AdapterError::SampleRangeOutOfBounds {
                start,
                end,
                available,
            } => write!(
                f,
                "Sample range {start}..={end} outside segment bounds ({available} samples available)"
            ),
            AdapterError::UnsupportedChannelKind { received, expected } => write!(
                f,
                "Unsupported channel kind '{received}' (expected one of: {})",
                expected.join(", ")
            ),
            AdapterError::SelectorOutOfRange {
                selector,
                index,
                available,
            } => write!(
                f,
                "{selector} index {index} out of range ({available} available)"
            ),
            AdapterError::HeaderError { context, message } => {
                write!(f, "Header error in {context}: {message}")
            }
            AdapterError::Other(msg) => write!(f, "Other error: {msg}"),
        }
    }
}

impl std::error::Error for AdapterError {}

impl From<std::io::Error> for AdapterError {
    fn from(err: std::io::Error) -> Self {
        AdapterError::Other(format!("I/O error: {err}"))
    }
}

/// Result type for ephysio operations.
pub type Result<T> = std::result::Result<T, AdapterError>;
