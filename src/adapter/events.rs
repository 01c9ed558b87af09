// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Event and marker extraction.
//!
//! Converts a (channel-set, time-range) request for the two discretized
//! channel kinds into per-channel timestamp/value sequences. Results
//! are channel-major parallel sequences; merging and sorting across
//! channels is deliberately left to the caller.

use serde::{Deserialize, Serialize};

use crate::core::{AdapterError, ChannelKind};
use crate::io::traits::RawReader;
use crate::Result;

use super::catalog::ChannelSelector;
use super::segment::check_selector;

/// Extracted occurrences of one event or marker channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelEvents {
    /// Channel label
    pub name: String,
    /// Occurrence times in seconds, within `[t0, t1)`
    pub times: Vec<f64>,
    /// One value per occurrence: the marker code for timestamped-event
    /// channels, the constant `1` for discretized-event channels
    pub values: Vec<i32>,
}

/// Read event/marker occurrences for a channel set, bounded `[t0, t1)`.
///
/// `kind` selects the header partition the identifiers are matched in:
/// `TimestampedEvent` channels yield their per-occurrence codes,
/// `DiscretizedEvent` channels yield the constant `1` per occurrence
/// (waveform-carrying channels have no intrinsic code; only occurrence
/// presence matters downstream). Any other kind fails with
/// `UnsupportedChannelKind`.
pub fn read_events(
    reader: &mut dyn RawReader,
    kind: ChannelKind,
    selector: &ChannelSelector,
    block: usize,
    segment: usize,
    t0: f64,
    t1: f64,
) -> Result<Vec<ChannelEvents>> {
    if !matches!(
        kind,
        ChannelKind::DiscretizedEvent | ChannelKind::TimestampedEvent
    ) {
        return Err(AdapterError::unsupported_channel_kind(
            kind.as_str(),
            [
                ChannelKind::DiscretizedEvent.as_str(),
                ChannelKind::TimestampedEvent.as_str(),
            ],
        ));
    }
    check_selector(reader, block, segment)?;
    reader.parse_header()?;

    let mut results = Vec::with_capacity(selector.identifiers().len());
    for identifier in selector.identifiers() {
        let (index, name) = partition_index(reader, kind, selector, identifier)?;
        let raw = reader.event_timestamps(kind, index, block, segment, t0, t1)?;
        let times = reader.rescale_timestamps(kind, index, &raw.timestamps)?;
        let values = match kind {
            ChannelKind::TimestampedEvent => raw.codes,
            _ => vec![1; times.len()],
        };
        results.push(ChannelEvents {
            name,
            times,
            values,
        });
    }
    Ok(results)
}

/// Locate one identifier within the kind-specific header partition.
///
/// Exact match on name or id depending on the selector shape; returns
/// the partition index and the channel's label.
fn partition_index(
    reader: &dyn RawReader,
    kind: ChannelKind,
    selector: &ChannelSelector,
    identifier: &str,
) -> Result<(usize, String)> {
    let header = reader.header()?;
    let by_id = matches!(selector, ChannelSelector::ByIds(_));

    let entries: Vec<(&str, &str)> = match kind {
        ChannelKind::DiscretizedEvent => header
            .discretized
            .iter()
            .map(|c| (c.id.as_str(), c.name.as_str()))
            .collect(),
        ChannelKind::TimestampedEvent => header
            .timestamped
            .iter()
            .map(|c| (c.id.as_str(), c.name.as_str()))
            .collect(),
        ChannelKind::Continuous => Vec::new(),
    };

    let mut matches = entries
        .iter()
        .enumerate()
        .filter(|(_, (id, name))| if by_id { *id == identifier } else { *name == identifier });

    let first = matches.next().ok_or_else(|| {
        AdapterError::channel_not_found(
            identifier,
            entries.iter().map(|(_, name)| name.to_string()),
        )
    })?;
    let extra = matches.count();
    if extra > 0 {
        return Err(AdapterError::ambiguous_channel(identifier, extra + 1));
    }
    Ok((first.0, first.1 .1.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::header::{
        DiscretizedEventChannelDef, Header, RawChunk, SampleMatrix, TimestampedEventChannelDef,
    };
    use crate::io::traits::RawEventData;
    use std::any::Any;

    /// Reader with fixed event tables: timestamps are stored in
    /// millisecond ticks, rescaled by /1000.
    struct EventReader {
        header: Header,
        // (kind, channel index) -> (tick timestamps, codes)
        marks: Vec<(Vec<i64>, Vec<i32>)>,
        spikes: Vec<Vec<i64>>,
    }

    impl RawReader for EventReader {
        fn parse_header(&mut self) -> Result<&Header> {
            Ok(&self.header)
        }
        fn header(&self) -> Result<&Header> {
            Ok(&self.header)
        }
        fn block_count(&self) -> usize {
            1
        }
        fn segment_count(&self, _block: usize) -> Result<usize> {
            Ok(1)
        }
        fn segment_bounds(&self, _block: usize, _segment: usize) -> Result<(f64, f64)> {
            Ok((0.0, 10.0))
        }
        fn segment_channel_names(&self, _block: usize, _segment: usize) -> Result<Vec<String>> {
            Ok(vec![])
        }
        fn segment_sample_count(
            &self,
            _block: usize,
            _segment: usize,
            _stream: usize,
        ) -> Result<u64> {
            Ok(0)
        }
        fn read_chunk(
            &self,
            _block: usize,
            _segment: usize,
            _stream: usize,
            _channel_indices: &[usize],
            _start: u64,
            _stop: u64,
        ) -> Result<RawChunk> {
            Ok(RawChunk::from_rows(vec![], 0, 0))
        }
        fn rescale_chunk(
            &self,
            _chunk: &RawChunk,
            _stream: usize,
            _channel_indices: &[usize],
        ) -> Result<SampleMatrix> {
            Ok(SampleMatrix::from_rows(vec![], 0, 0))
        }
        fn event_timestamps(
            &self,
            kind: ChannelKind,
            channel_index: usize,
            _block: usize,
            _segment: usize,
            t0: f64,
            t1: f64,
        ) -> Result<RawEventData> {
            let in_range = |tick: i64| {
                let seconds = tick as f64 / 1000.0;
                seconds >= t0 && seconds < t1
            };
            match kind {
                ChannelKind::TimestampedEvent => {
                    let (ticks, codes) = &self.marks[channel_index];
                    let mut timestamps = Vec::new();
                    let mut kept_codes = Vec::new();
                    for (tick, code) in ticks.iter().zip(codes) {
                        if in_range(*tick) {
                            timestamps.push(*tick);
                            kept_codes.push(*code);
                        }
                    }
                    Ok(RawEventData {
                        timestamps,
                        durations: None,
                        codes: kept_codes,
                    })
                }
                ChannelKind::DiscretizedEvent => Ok(RawEventData {
                    timestamps: self.spikes[channel_index]
                        .iter()
                        .copied()
                        .filter(|&tick| in_range(tick))
                        .collect(),
                    durations: None,
                    codes: vec![],
                }),
                ChannelKind::Continuous => Ok(RawEventData::default()),
            }
        }
        fn rescale_timestamps(
            &self,
            _kind: ChannelKind,
            _channel_index: usize,
            timestamps: &[i64],
        ) -> Result<Vec<f64>> {
            Ok(timestamps.iter().map(|&t| t as f64 / 1000.0).collect())
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn reader() -> EventReader {
        EventReader {
            header: Header {
                discretized: vec![
                    DiscretizedEventChannelDef::new("10", "unit1", 30000.0),
                    DiscretizedEventChannelDef::new("11", "unit2", 30000.0),
                ],
                timestamped: vec![TimestampedEventChannelDef::new("20", "marks")],
                ..Default::default()
            },
            marks: vec![(vec![100, 2500, 7000], vec![3, 5, 7])],
            spikes: vec![vec![250, 300, 8000], vec![400]],
        }
    }

    fn names(names: &[&str]) -> ChannelSelector {
        ChannelSelector::ByNames(names.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_marker_events_carry_codes() {
        let mut r = reader();
        let events = read_events(
            &mut r,
            ChannelKind::TimestampedEvent,
            &names(&["marks"]),
            0,
            0,
            0.0,
            10.0,
        )
        .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "marks");
        assert_eq!(events[0].times, vec![0.1, 2.5, 7.0]);
        assert_eq!(events[0].values, vec![3, 5, 7]);
    }

    #[test]
    fn test_time_range_is_half_open() {
        let mut r = reader();
        let events = read_events(
            &mut r,
            ChannelKind::TimestampedEvent,
            &names(&["marks"]),
            0,
            0,
            0.1,
            7.0,
        )
        .unwrap();
        // 0.1 is included, 7.0 is excluded.
        assert_eq!(events[0].times, vec![0.1, 2.5]);
        assert_eq!(events[0].values, vec![3, 5]);
    }

    #[test]
    fn test_discretized_events_are_all_ones() {
        let mut r = reader();
        let events = read_events(
            &mut r,
            ChannelKind::DiscretizedEvent,
            &names(&["unit1", "unit2"]),
            0,
            0,
            0.0,
            10.0,
        )
        .unwrap();

        assert_eq!(events.len(), 2);
        for channel in &events {
            assert_eq!(channel.values.len(), channel.times.len());
            assert!(channel.values.iter().all(|&v| v == 1));
        }
        assert_eq!(events[0].times, vec![0.25, 0.3, 8.0]);
        assert_eq!(events[1].times, vec![0.4]);
    }

    #[test]
    fn test_results_are_channel_major_in_request_order() {
        let mut r = reader();
        let events = read_events(
            &mut r,
            ChannelKind::DiscretizedEvent,
            &names(&["unit2", "unit1"]),
            0,
            0,
            0.0,
            10.0,
        )
        .unwrap();
        assert_eq!(events[0].name, "unit2");
        assert_eq!(events[1].name, "unit1");
    }

    #[test]
    fn test_continuous_kind_is_unsupported() {
        let mut r = reader();
        let err = read_events(
            &mut r,
            ChannelKind::Continuous,
            &names(&["marks"]),
            0,
            0,
            0.0,
            10.0,
        )
        .unwrap_err();
        match err {
            AdapterError::UnsupportedChannelKind { received, .. } => {
                assert_eq!(received, "continuous");
            }
            other => panic!("expected UnsupportedChannelKind, got {other}"),
        }
    }

    #[test]
    fn test_name_must_be_in_the_kind_partition() {
        let mut r = reader();
        // "marks" exists, but not among discretized channels.
        let err = read_events(
            &mut r,
            ChannelKind::DiscretizedEvent,
            &names(&["marks"]),
            0,
            0,
            0.0,
            10.0,
        )
        .unwrap_err();
        match err {
            AdapterError::ChannelNotFound { available, .. } => {
                assert_eq!(available, vec!["unit1", "unit2"]);
            }
            other => panic!("expected ChannelNotFound, got {other}"),
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let mut r = reader();
        let events = read_events(
            &mut r,
            ChannelKind::TimestampedEvent,
            &ChannelSelector::ByIds(vec!["20".to_string()]),
            0,
            0,
            0.0,
            10.0,
        )
        .unwrap();
        assert_eq!(events[0].name, "marks");
    }
}
