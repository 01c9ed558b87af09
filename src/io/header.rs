// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Shared header and sample types for all recording formats.
//!
//! This module provides the unified types a format decoder fills in when
//! parsing its native header. Each channel kind gets an explicit, closed
//! struct: unknown native fields are rejected at the decoder boundary
//! instead of being propagated downstream as open mappings.

use serde::{Deserialize, Serialize};

/// Definition of one continuous (analog) channel from the header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuousChannelDef {
    /// Stable identifier assigned by the raw format
    pub id: String,
    /// Human-readable label, not guaranteed unique across kinds
    pub name: String,
    /// Sampling rate in Hz
    pub sample_rate: f64,
    /// Physical unit of the rescaled samples (e.g., "uV")
    pub units: String,
    /// Multiplier from raw sample words to physical units
    pub gain: f64,
    /// Additive offset applied after the gain
    pub offset: f64,
    /// Identifier of the acquisition stream this channel belongs to
    pub stream_id: String,
}

impl ContinuousChannelDef {
    /// Create a new continuous channel definition with unit scaling.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        sample_rate: f64,
        stream_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sample_rate,
            units: String::new(),
            gain: 1.0,
            offset: 0.0,
            stream_id: stream_id.into(),
        }
    }

    /// Set the physical units.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Set the raw-to-physical scaling.
    pub fn with_scaling(mut self, gain: f64, offset: f64) -> Self {
        self.gain = gain;
        self.offset = offset;
        self
    }

    /// Convert one raw sample word to physical units.
    pub fn to_physical(&self, raw: i32) -> f64 {
        raw as f64 * self.gain + self.offset
    }
}

/// Definition of one discretized event (spike-like) channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscretizedEventChannelDef {
    /// Stable identifier assigned by the raw format
    pub id: String,
    /// Human-readable label
    pub name: String,
    /// Sampling rate of the associated waveform snippets, in Hz
    pub wf_sample_rate: f64,
}

impl DiscretizedEventChannelDef {
    /// Create a new discretized event channel definition.
    pub fn new(id: impl Into<String>, name: impl Into<String>, wf_sample_rate: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            wf_sample_rate,
        }
    }
}

/// Definition of one timestamped event (marker) channel.
///
/// Marker channels have no sampling rate; each occurrence carries a code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestampedEventChannelDef {
    /// Stable identifier assigned by the raw format
    pub id: String,
    /// Human-readable label
    pub name: String,
}

impl TimestampedEventChannelDef {
    /// Create a new timestamped event channel definition.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Definition of one acquisition stream.
///
/// A stream is a maximal set of continuous channels sharing sampling
/// rate, start time, sample count, and sample representation. Chunk
/// reads are only valid within one stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamDef {
    /// Stable identifier assigned by the raw format
    pub id: String,
    /// Human-readable label
    pub name: String,
    /// Shared sampling rate of every channel in the stream, in Hz
    pub sample_rate: f64,
}

impl StreamDef {
    /// Create a new stream definition.
    pub fn new(id: impl Into<String>, name: impl Into<String>, sample_rate: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sample_rate,
        }
    }
}

/// Parsed header of a recording file-set.
///
/// Holds the three channel-kind partitions in their native order, plus
/// the ordered stream list. The header enumerates every channel ever
/// possible for the file-set; a given segment may realize only a subset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Continuous channels, native order
    pub continuous: Vec<ContinuousChannelDef>,
    /// Discretized event channels, native order
    pub discretized: Vec<DiscretizedEventChannelDef>,
    /// Timestamped event channels, native order
    pub timestamped: Vec<TimestampedEventChannelDef>,
    /// Acquisition streams, in the order chunk reads index them
    pub streams: Vec<StreamDef>,
}

impl Header {
    /// Get the index of a stream in the ordered stream list.
    pub fn stream_index(&self, stream_id: &str) -> Option<usize> {
        self.streams.iter().position(|s| s.id == stream_id)
    }

    /// Get the index of a discretized event channel by exact name.
    pub fn discretized_index(&self, name: &str) -> Option<usize> {
        self.discretized.iter().position(|c| c.name == name)
    }

    /// Get the index of a timestamped event channel by exact name.
    pub fn timestamped_index(&self, name: &str) -> Option<usize> {
        self.timestamped.iter().position(|c| c.name == name)
    }

    /// Total channel count across all three partitions.
    pub fn channel_count(&self) -> usize {
        self.continuous.len() + self.discretized.len() + self.timestamped.len()
    }
}

/// Raw multi-channel sample chunk, before unit rescaling.
///
/// Row-major `[rows × cols]` where rows are samples and cols are the
/// requested channels, in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct RawChunk {
    data: Vec<i32>,
    rows: usize,
    cols: usize,
}

impl RawChunk {
    /// Create a chunk from row-major data.
    ///
    /// Panics if `data.len() != rows * cols`.
    pub fn from_rows(data: Vec<i32>, rows: usize, cols: usize) -> Self {
        assert_eq!(data.len(), rows * cols, "chunk shape mismatch");
        Self { data, rows, cols }
    }

    /// Number of samples per channel.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of channels.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get one raw sample word.
    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.data[row * self.cols + col]
    }

    /// Row-major view of the raw data.
    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }
}

/// Rescaled multi-channel sample matrix in physical units.
///
/// Row-major `[rows × cols]`: `rows` samples by `cols` channels, channels
/// in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleMatrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl SampleMatrix {
    /// Create a matrix from row-major data.
    ///
    /// Panics if `data.len() != rows * cols`.
    pub fn from_rows(data: Vec<f64>, rows: usize, cols: usize) -> Self {
        assert_eq!(data.len(), rows * cols, "matrix shape mismatch");
        Self { data, rows, cols }
    }

    /// Create a single-column matrix from a vector.
    pub fn from_column(data: Vec<f64>) -> Self {
        let rows = data.len();
        Self {
            data,
            rows,
            cols: 1,
        }
    }

    /// Number of samples per channel.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of channels.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get one sample in physical units.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Extract one channel's samples as a contiguous vector.
    pub fn column(&self, col: usize) -> Vec<f64> {
        (0..self.rows).map(|row| self.get(row, col)).collect()
    }

    /// Row-major view of the data.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Concatenate matrices column-wise.
    ///
    /// All inputs must have the same row count. Used to reassemble
    /// per-channel extractions into one multi-channel matrix.
    pub fn concat_columns(parts: &[SampleMatrix]) -> Option<SampleMatrix> {
        let rows = parts.first()?.rows;
        if parts.iter().any(|p| p.rows != rows) {
            return None;
        }
        let cols: usize = parts.iter().map(|p| p.cols).sum();
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for part in parts {
                for col in 0..part.cols {
                    data.push(part.get(row, col));
                }
            }
        }
        Some(SampleMatrix { data, rows, cols })
    }
}
