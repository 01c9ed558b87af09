// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.
//!
//! Provides an in-memory acquisition format with a deterministic
//! recording: raw sample `i` of continuous channel `c` is `i * 10 + c`,
//! event timestamps are stored in millisecond ticks.

#![allow(dead_code)]

use std::any::Any;
use std::path::Path;

use ephysio::io::header::{
    ContinuousChannelDef, DiscretizedEventChannelDef, Header, RawChunk, SampleMatrix, StreamDef,
    TimestampedEventChannelDef,
};
use ephysio::io::traits::{FileMode, RawEventData, RawFormat, RawReader};
use ephysio::{AdapterError, ChannelKind, Result};

/// Millisecond ticks per second in the fixture's native clock.
const TICKS_PER_SECOND: f64 = 1000.0;

/// One segment of the fixture recording.
#[derive(Debug, Clone)]
pub struct SegmentFixture {
    /// Segment start time in seconds
    pub t_start: f64,
    /// Segment stop time in seconds
    pub t_stop: f64,
    /// Samples every stream holds in this segment
    pub n_samples: u64,
    /// Channel names materialized in this segment
    pub channel_names: Vec<String>,
    /// (tick, code) occurrences per timestamped channel
    pub marks: Vec<Vec<(i64, i32)>>,
    /// Tick occurrences per discretized channel
    pub spikes: Vec<Vec<i64>>,
}

/// The standard fixture header: two streams, one spike channel, one
/// marker channel.
pub fn fixture_header() -> Header {
    Header {
        continuous: vec![
            ContinuousChannelDef::new("0", "ch0", 1000.0, "s0")
                .with_units("uV")
                .with_scaling(0.5, 0.0),
            ContinuousChannelDef::new("1", "ch1", 1000.0, "s0")
                .with_units("uV")
                .with_scaling(0.5, 0.0),
            ContinuousChannelDef::new("2", "aux0", 500.0, "s1")
                .with_units("mV")
                .with_scaling(1.0, -2.0),
        ],
        discretized: vec![DiscretizedEventChannelDef::new("10", "unit1", 30000.0)],
        timestamped: vec![TimestampedEventChannelDef::new("20", "marks")],
        streams: vec![
            StreamDef::new("s0", "main", 1000.0),
            StreamDef::new("s1", "aux", 500.0),
        ],
    }
}

/// The standard two-segment fixture recording.
pub fn fixture_segments() -> Vec<SegmentFixture> {
    vec![
        SegmentFixture {
            t_start: 0.0,
            t_stop: 1.0,
            n_samples: 1000,
            channel_names: vec![
                "ch0".to_string(),
                "ch1".to_string(),
                "aux0".to_string(),
                "unit1".to_string(),
                "marks".to_string(),
            ],
            marks: vec![vec![(100, 7), (250, 8), (900, 9)]],
            spikes: vec![vec![50, 500]],
        },
        SegmentFixture {
            t_start: 1.0,
            t_stop: 2.0,
            n_samples: 1000,
            channel_names: vec!["ch0".to_string(), "unit1".to_string()],
            marks: vec![vec![]],
            spikes: vec![vec![1500]],
        },
    ]
}

/// In-memory reader over one fixture recording.
pub struct FixtureReader {
    header: Header,
    segments: Vec<SegmentFixture>,
    parsed: bool,
    parse_count: usize,
}

impl FixtureReader {
    pub fn new(header: Header, segments: Vec<SegmentFixture>) -> Self {
        Self {
            header,
            segments,
            parsed: false,
            parse_count: 0,
        }
    }

    pub fn standard() -> Self {
        Self::new(fixture_header(), fixture_segments())
    }

    /// How many times the header has been (re)parsed.
    pub fn parse_count(&self) -> usize {
        self.parse_count
    }

    fn segment(&self, block: usize, segment: usize) -> Result<&SegmentFixture> {
        if block != 0 {
            return Err(AdapterError::selector_out_of_range("block", block, 1));
        }
        self.segments.get(segment).ok_or_else(|| {
            AdapterError::selector_out_of_range("segment", segment, self.segments.len())
        })
    }
}

impl RawReader for FixtureReader {
    fn parse_header(&mut self) -> Result<&Header> {
        self.parsed = true;
        self.parse_count += 1;
        Ok(&self.header)
    }

    fn header(&self) -> Result<&Header> {
        if self.parsed {
            Ok(&self.header)
        } else {
            Err(AdapterError::header("header access", "header not parsed"))
        }
    }

    fn block_count(&self) -> usize {
        1
    }

    fn segment_count(&self, block: usize) -> Result<usize> {
        if block != 0 {
            return Err(AdapterError::selector_out_of_range("block", block, 1));
        }
        Ok(self.segments.len())
    }

    fn segment_bounds(&self, block: usize, segment: usize) -> Result<(f64, f64)> {
        let seg = self.segment(block, segment)?;
        Ok((seg.t_start, seg.t_stop))
    }

    fn segment_channel_names(&self, block: usize, segment: usize) -> Result<Vec<String>> {
        Ok(self.segment(block, segment)?.channel_names.clone())
    }

    fn segment_sample_count(&self, block: usize, segment: usize, _stream: usize) -> Result<u64> {
        Ok(self.segment(block, segment)?.n_samples)
    }

    fn read_chunk(
        &self,
        block: usize,
        segment: usize,
        _stream: usize,
        channel_indices: &[usize],
        start: u64,
        stop: u64,
    ) -> Result<RawChunk> {
        let seg = self.segment(block, segment)?;
        if stop > seg.n_samples || start > stop {
            return Err(AdapterError::sample_range_out_of_bounds(
                start as i64,
                stop as i64,
                seg.n_samples,
            ));
        }
        let rows = (stop - start) as usize;
        let mut data = Vec::with_capacity(rows * channel_indices.len());
        for sample in start..stop {
            for &channel in channel_indices {
                data.push((sample * 10 + channel as u64) as i32);
            }
        }
        Ok(RawChunk::from_rows(data, rows, channel_indices.len()))
    }

    fn rescale_chunk(
        &self,
        chunk: &RawChunk,
        _stream: usize,
        channel_indices: &[usize],
    ) -> Result<SampleMatrix> {
        let header = self.header()?;
        let mut data = Vec::with_capacity(chunk.rows() * chunk.cols());
        for row in 0..chunk.rows() {
            for (col, &channel) in channel_indices.iter().enumerate() {
                let def = header.continuous.get(channel).ok_or_else(|| {
                    AdapterError::header("rescale", format!("no continuous channel {channel}"))
                })?;
                data.push(def.to_physical(chunk.get(row, col)));
            }
        }
        Ok(SampleMatrix::from_rows(data, chunk.rows(), chunk.cols()))
    }

    fn event_timestamps(
        &self,
        kind: ChannelKind,
        channel_index: usize,
        block: usize,
        segment: usize,
        t0: f64,
        t1: f64,
    ) -> Result<RawEventData> {
        let seg = self.segment(block, segment)?;
        let in_range = |tick: i64| {
            let seconds = tick as f64 / TICKS_PER_SECOND;
            seconds >= t0 && seconds < t1
        };
        match kind {
            ChannelKind::TimestampedEvent => {
                let occurrences = seg.marks.get(channel_index).ok_or_else(|| {
                    AdapterError::header("events", format!("no marker channel {channel_index}"))
                })?;
                let mut timestamps = Vec::new();
                let mut codes = Vec::new();
                for &(tick, code) in occurrences {
                    if in_range(tick) {
                        timestamps.push(tick);
                        codes.push(code);
                    }
                }
                Ok(RawEventData {
                    timestamps,
                    durations: None,
                    codes,
                })
            }
            ChannelKind::DiscretizedEvent => {
                let occurrences = seg.spikes.get(channel_index).ok_or_else(|| {
                    AdapterError::header("events", format!("no spike channel {channel_index}"))
                })?;
                Ok(RawEventData {
                    timestamps: occurrences
                        .iter()
                        .copied()
                        .filter(|&tick| in_range(tick))
                        .collect(),
                    durations: None,
                    codes: vec![],
                })
            }
            ChannelKind::Continuous => Err(AdapterError::unsupported_channel_kind(
                kind.as_str(),
                [
                    ChannelKind::DiscretizedEvent.as_str(),
                    ChannelKind::TimestampedEvent.as_str(),
                ],
            )),
        }
    }

    fn rescale_timestamps(
        &self,
        _kind: ChannelKind,
        _channel_index: usize,
        timestamps: &[i64],
    ) -> Result<Vec<f64>> {
        Ok(timestamps
            .iter()
            .map(|&tick| tick as f64 / TICKS_PER_SECOND)
            .collect())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Registrable fixture format.
pub struct FixtureFormat {
    name: &'static str,
    extensions: Vec<&'static str>,
    mode: FileMode,
}

impl FixtureFormat {
    pub fn new(name: &'static str, extensions: Vec<&'static str>, mode: FileMode) -> Self {
        Self {
            name,
            extensions,
            mode,
        }
    }

    pub fn standard() -> Self {
        Self::new("fixture", vec!["fix"], FileMode::SingleFile)
    }
}

impl RawFormat for FixtureFormat {
    fn name(&self) -> &str {
        self.name
    }

    fn extensions(&self) -> &[&str] {
        &self.extensions
    }

    fn file_mode(&self) -> FileMode {
        self.mode
    }

    fn open(&self, _path: &Path) -> Result<Box<dyn RawReader>> {
        Ok(Box::new(FixtureReader::standard()))
    }
}
