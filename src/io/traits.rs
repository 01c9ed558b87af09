// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core traits for unified recording access.
//!
//! This module defines the boundary between the adapter layer and the
//! format-specific raw decoders. A decoder parses a file's bytes into a
//! [`Header`] and serves chunk and timestamp reads; everything above
//! this trait is format-independent.

use std::any::Any;
use std::path::Path;

use crate::core::ChannelKind;
use crate::Result;

use super::header::{Header, RawChunk, SampleMatrix};

/// Raw event timestamps for one channel, before rescaling.
///
/// Parallel sequences: `durations` and `codes`, when present, have the
/// same length as `timestamps`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEventData {
    /// Event times in the decoder's native clock ticks
    pub timestamps: Vec<i64>,
    /// Event durations in native ticks, for formats that record them
    pub durations: Option<Vec<i64>>,
    /// Per-occurrence marker codes; empty for channels without codes
    pub codes: Vec<i32>,
}

/// Trait for format-specific raw decoders.
///
/// This trait abstracts over acquisition formats to provide a unified
/// read API. Implementations are constructed by a [`RawFormat`] and are
/// bound to one file-set.
///
/// # Conventions
///
/// - `parse_header` is idempotent: calling it repeatedly re-reads or
///   reuses the header but never changes the result.
/// - Sample positions at this boundary are 0-based half-open
///   `[start, stop)`. The caller-facing 1-based inclusive convention is
///   converted exactly once, in the sample extractor.
/// - Time ranges are half-open `[t0, t1)` in seconds.
/// - `channel_indices` index into the header's continuous partition.
pub trait RawReader: Send {
    /// Parse the native header, if not already parsed, and return it.
    fn parse_header(&mut self) -> Result<&Header>;

    /// Get the parsed header.
    ///
    /// Fails with a header error if `parse_header` has not succeeded yet.
    fn header(&self) -> Result<&Header>;

    /// Number of top-level recording blocks.
    fn block_count(&self) -> usize;

    /// Number of segments in one block.
    fn segment_count(&self, block: usize) -> Result<usize>;

    /// Start and stop time of one segment, in seconds.
    fn segment_bounds(&self, block: usize, segment: usize) -> Result<(f64, f64)>;

    /// Names of the channels actually materialized in one segment.
    ///
    /// The union over continuous signal series, spike trains, and other
    /// timestamped series instantiated in the segment. May be a strict
    /// subset of the header catalog; zero-length signals are sometimes
    /// omitted at the segment level.
    fn segment_channel_names(&self, block: usize, segment: usize) -> Result<Vec<String>>;

    /// Number of samples one stream holds in one segment.
    fn segment_sample_count(&self, block: usize, segment: usize, stream: usize) -> Result<u64>;

    /// Read a raw multi-channel chunk covering `[start, stop)`.
    ///
    /// All requested channels must belong to `stream`; the adapter
    /// validates this before calling.
    fn read_chunk(
        &self,
        block: usize,
        segment: usize,
        stream: usize,
        channel_indices: &[usize],
        start: u64,
        stop: u64,
    ) -> Result<RawChunk>;

    /// Rescale a raw chunk to floating-point physical units using the
    /// per-channel scale/offset metadata.
    fn rescale_chunk(
        &self,
        chunk: &RawChunk,
        stream: usize,
        channel_indices: &[usize],
    ) -> Result<SampleMatrix>;

    /// Read raw event timestamps for one channel, bounded by `[t0, t1)`.
    ///
    /// `channel_index` indexes the partition selected by `kind`
    /// (discretized or timestamped).
    fn event_timestamps(
        &self,
        kind: ChannelKind,
        channel_index: usize,
        block: usize,
        segment: usize,
        t0: f64,
        t1: f64,
    ) -> Result<RawEventData>;

    /// Rescale raw event timestamps to physical seconds.
    fn rescale_timestamps(
        &self,
        kind: ChannelKind,
        channel_index: usize,
        timestamps: &[i64],
    ) -> Result<Vec<f64>>;

    /// Downcast to `Any` for accessing format-specific functionality.
    fn as_any(&self) -> &dyn Any;
}

/// File-set layout of an acquisition format.
///
/// Determines whether a format's constructor receives a file path or a
/// directory path, and how sibling files are discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileMode {
    /// One self-contained file
    SingleFile,
    /// A primary file that self-discovers sibling files
    MultiFile,
    /// A directory containing the recording
    Directory,
}

impl FileMode {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileMode::SingleFile => "single-file",
            FileMode::MultiFile => "multi-file",
            FileMode::Directory => "directory-based",
        }
    }
}

impl std::fmt::Display for FileMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for registrable acquisition formats.
///
/// A format advertises how it classifies paths and constructs a bound
/// [`RawReader`]. Formats are consulted by the
/// [`FormatRegistry`](crate::io::factory::FormatRegistry) in
/// registration order.
pub trait RawFormat: Send + Sync {
    /// Short format name used in diagnostics (e.g., "ced").
    fn name(&self) -> &str;

    /// File extensions this format claims, lowercase, without the dot.
    ///
    /// Ignored for `Directory` formats, which match directories instead.
    fn extensions(&self) -> &[&str];

    /// File-set layout of this format.
    fn file_mode(&self) -> FileMode;

    /// Construct a reader bound to the given path.
    ///
    /// Receives a file path for `SingleFile`/`MultiFile` formats and a
    /// directory path for `Directory` formats.
    fn open(&self, path: &Path) -> Result<Box<dyn RawReader>>;
}
