// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout ephysio.
//!
//! This module provides the foundational types for the library:
//! - [`AdapterError`] - Comprehensive error handling
//! - [`ChannelKind`] - The three channel taxonomies unified by the adapter
//! - [`SampleKind`] - Channel kind plus the synthetic `time` pseudo-kind

use serde::{Deserialize, Serialize};

pub mod error;

pub use error::{AdapterError, Result};

/// Channel kind identifier.
///
/// Every channel in a recording belongs to exactly one of three
/// taxonomies, which the adapter reconciles into one catalog:
/// - `Continuous` - analog/voltage traces sampled on a regular grid
/// - `DiscretizedEvent` - spike-like channels with an associated
///   waveform sampling rate
/// - `TimestampedEvent` - marker/event channels with no sampling rate,
///   carrying a code per occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChannelKind {
    /// Analog/voltage trace
    Continuous,
    /// Spike-like channel with a waveform sampling rate
    DiscretizedEvent,
    /// Marker/event channel with per-occurrence codes
    TimestampedEvent,
}

/// Error returned when parsing a `ChannelKind` from string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseChannelKindError {
    _private: (),
}

impl std::fmt::Display for ParseChannelKindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid channel kind, expected 'continuous', 'discretized-event', or 'timestamped-event'"
        )
    }
}

impl std::error::Error for ParseChannelKindError {}

impl std::str::FromStr for ChannelKind {
    type Err = ParseChannelKindError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "continuous" => Ok(ChannelKind::Continuous),
            "discretized-event" => Ok(ChannelKind::DiscretizedEvent),
            "timestamped-event" => Ok(ChannelKind::TimestampedEvent),
            _ => Err(ParseChannelKindError { _private: () }),
        }
    }
}

impl ChannelKind {
    /// Check if this kind carries a sampling rate.
    pub fn is_sampled(&self) -> bool {
        matches!(
            self,
            ChannelKind::Continuous | ChannelKind::DiscretizedEvent
        )
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Continuous => "continuous",
            ChannelKind::DiscretizedEvent => "discretized-event",
            ChannelKind::TimestampedEvent => "timestamped-event",
        }
    }
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind selector for sample extraction.
///
/// Sample reads accept either a real channel kind or the synthetic
/// `time` pseudo-kind, which produces a derived time vector instead of
/// reading from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SampleKind {
    /// Synthesized time vector for the requested sample range
    Time,
    /// Samples of a real channel kind
    Data(ChannelKind),
}

impl std::str::FromStr for SampleKind {
    type Err = ParseChannelKindError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("time") {
            Ok(SampleKind::Time)
        } else {
            s.parse().map(SampleKind::Data)
        }
    }
}

impl SampleKind {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleKind::Time => "time",
            SampleKind::Data(kind) => kind.as_str(),
        }
    }
}
