// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Format-independent adapter over one recording file-set.
//!
//! This module is the caller-facing surface: a [`RecordingAdapter`]
//! wraps one bound [`RawReader`] and exposes catalog discovery, stream
//! validation, and sample/event extraction without any knowledge of the
//! underlying acquisition format.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use ephysio::adapter::RecordingAdapter;
//! use ephysio::adapter::catalog::ChannelSelector;
//! use ephysio::core::{ChannelKind, SampleKind};
//! use ephysio::io::factory::FormatRegistry;
//!
//! let registry = FormatRegistry::new();
//! // registry.register(Box::new(MyFormat));
//! let mut adapter = RecordingAdapter::open(&registry, &[PathBuf::from("session.smr")])?;
//!
//! let channels = adapter.channels()?;
//! let selector = ChannelSelector::ByNames(vec!["ch0".into(), "ch1".into()]);
//! let samples = adapter.read_samples(
//!     SampleKind::Data(ChannelKind::Continuous),
//!     &selector,
//!     0, // block
//!     0, // segment
//!     1,
//!     1000,
//! )?;
//! # Ok::<(), ephysio::AdapterError>(())
//! ```

pub mod catalog;
pub mod events;
pub mod samples;
pub mod segment;
pub mod stream;

pub use catalog::{Channel, ChannelSelector};
pub use events::ChannelEvents;
pub use stream::ReadCompatibility;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::{ChannelKind, SampleKind};
use crate::io::factory::FormatRegistry;
use crate::io::header::SampleMatrix;
use crate::io::traits::RawReader;
use crate::Result;

/// A requested channel resolved to its internal identity.
///
/// The shape handed back to management layers that track channels by
/// their own bookkeeping: the adapter's kind tag plus the raw format's
/// id, name, rate, and stream assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelBinding {
    /// Channel kind within the adapter's taxonomy
    pub kind: ChannelKind,
    /// Stable identifier assigned by the raw format
    pub id: String,
    /// Human-readable label
    pub name: String,
    /// Sampling rate in Hz; 0.0 for timestamped-event channels
    pub sample_rate: f64,
    /// Stream assignment; `None` for the two event kinds
    pub stream_id: Option<String>,
}

impl From<&Channel> for ChannelBinding {
    fn from(channel: &Channel) -> Self {
        Self {
            kind: channel.kind(),
            id: channel.id().to_string(),
            name: channel.name().to_string(),
            sample_rate: channel.sample_rate(),
            stream_id: channel.stream_id().map(str::to_string),
        }
    }
}

/// Uniform read access to one recording file-set.
///
/// Each adapter owns one reader bound to its file-set. Header parsing
/// is idempotent, so operations re-request it freely; callers issuing
/// many reads against the same file-set should reuse one adapter to
/// avoid repeated header parsing. No cross-adapter caching exists, and
/// correctness never depends on any.
pub struct RecordingAdapter {
    reader: Box<dyn RawReader>,
}

impl RecordingAdapter {
    /// Wrap an already-constructed reader.
    pub fn new(reader: Box<dyn RawReader>) -> Self {
        Self { reader }
    }

    /// Classify and open a file-set through a format registry.
    pub fn open(registry: &FormatRegistry, paths: &[PathBuf]) -> Result<Self> {
        Ok(Self::new(registry.open_file_set(paths)?))
    }

    /// Access the underlying reader for format-specific operations.
    pub fn raw_reader(&self) -> &dyn RawReader {
        self.reader.as_ref()
    }

    /// List every channel the header enumerates, across all three kinds.
    pub fn channels(&mut self) -> Result<Vec<Channel>> {
        let header = self.reader.parse_header()?;
        Ok(catalog::list_channels(header))
    }

    /// List the channels actually materialized in one segment.
    pub fn channels_in_segment(&mut self, block: usize, segment: usize) -> Result<Vec<Channel>> {
        segment::channels_in_segment(self.reader.as_mut(), block, segment)
    }

    /// Resolve requested names against one segment into channel bindings.
    ///
    /// Segment-scoped: a name the header enumerates but the segment does not
    /// materialize is not returned. Names are matched against the
    /// segment's channel list; request order is not preserved, catalog
    /// order is.
    pub fn describe_channels(
        &mut self,
        names: &[String],
        block: usize,
        segment: usize,
    ) -> Result<Vec<ChannelBinding>> {
        let channels = self.channels_in_segment(block, segment)?;
        Ok(channels
            .iter()
            .filter(|channel| names.iter().any(|name| name == channel.name()))
            .map(ChannelBinding::from)
            .collect())
    }

    /// Check whether a channel set can be read as one chunk.
    pub fn can_be_read_together(&mut self, selector: &ChannelSelector) -> Result<ReadCompatibility> {
        let header = self.reader.parse_header()?;
        let catalog = catalog::list_channels(header);
        let resolved = selector.resolve(&catalog)?;
        Ok(stream::can_be_read_together(&resolved))
    }

    /// Resolve the single stream index a channel set belongs to.
    pub fn resolve_stream(&mut self, selector: &ChannelSelector) -> Result<usize> {
        let header = self.reader.parse_header()?;
        stream::resolve_stream(header, selector)
    }

    /// Sampling rates of the requested channels, in request order.
    ///
    /// Continuous channels report their stream rate, discretized-event
    /// channels their waveform rate, timestamped-event channels 0.0.
    pub fn sample_rates(&mut self, selector: &ChannelSelector) -> Result<Vec<f64>> {
        let header = self.reader.parse_header()?;
        let catalog = catalog::list_channels(header);
        let resolved = selector.resolve(&catalog)?;
        Ok(resolved.iter().map(|channel| channel.sample_rate()).collect())
    }

    /// Start and stop time of one segment, in seconds.
    pub fn segment_bounds(&mut self, block: usize, segment: usize) -> Result<(f64, f64)> {
        segment::check_selector(self.reader.as_ref(), block, segment)?;
        self.reader.segment_bounds(block, segment)
    }

    /// Read a sample range (1-based inclusive) or synthesize a time
    /// vector; see [`samples::read_samples`].
    pub fn read_samples(
        &mut self,
        kind: SampleKind,
        selector: &ChannelSelector,
        block: usize,
        segment: usize,
        start_sample: i64,
        end_sample: i64,
    ) -> Result<SampleMatrix> {
        samples::read_samples(
            self.reader.as_mut(),
            kind,
            selector,
            block,
            segment,
            start_sample,
            end_sample,
        )
    }

    /// Read event/marker occurrences bounded `[t0, t1)`; see
    /// [`events::read_events`].
    pub fn read_events(
        &mut self,
        kind: ChannelKind,
        selector: &ChannelSelector,
        block: usize,
        segment: usize,
        t0: f64,
        t1: f64,
    ) -> Result<Vec<ChannelEvents>> {
        events::read_events(
            self.reader.as_mut(),
            kind,
            selector,
            block,
            segment,
            t0,
            t1,
        )
    }
}
