// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Sample extraction.
//!
//! Converts a (channel-set, sample-range) request into a raw chunk read
//! plus rescaling to physical units, or into a synthesized time vector
//! for the `time` pseudo-kind.
//!
//! # Index convention
//!
//! The caller-facing convention is 1-based inclusive: `start..=end`.
//! The raw decoder boundary is 0-based half-open: `[start-1, end)`.
//! That conversion happens exactly once, in [`read_samples`], and
//! nowhere else in the crate. An inclusive request `1..=10` therefore
//! covers 10 samples.

use crate::core::{AdapterError, ChannelKind, SampleKind};
use crate::io::header::SampleMatrix;
use crate::io::traits::RawReader;
use crate::Result;

use super::catalog::{list_channels, ChannelSelector};
use super::segment::check_selector;
use super::stream::resolve_stream;

/// Read a sample range for a channel set, or synthesize a time vector.
///
/// `start_sample` and `end_sample` follow the caller convention
/// (1-based inclusive). Real channel kinds first check that the
/// declared kind matches every resolved channel (a mismatch fails with
/// `UnsupportedChannelKind`), then resolve their stream,
/// so a cross-stream request fails before any read is attempted; the
/// converted range is then bounds-checked against the segment, read as
/// one raw chunk, and rescaled to physical units. The result is a
/// `[samples × channels]` matrix with channels in request order.
pub fn read_samples(
    reader: &mut dyn RawReader,
    kind: SampleKind,
    selector: &ChannelSelector,
    block: usize,
    segment: usize,
    start_sample: i64,
    end_sample: i64,
) -> Result<SampleMatrix> {
    check_selector(reader, block, segment)?;
    if start_sample < 1 || end_sample < start_sample {
        return Err(AdapterError::sample_range_out_of_bounds(
            start_sample,
            end_sample,
            0,
        ));
    }

    // The one 1-based inclusive -> 0-based half-open conversion.
    let start = (start_sample - 1) as u64;
    let stop = end_sample as u64;

    reader.parse_header()?;

    match kind {
        SampleKind::Time => synthesize_time(reader, selector, start, stop),
        SampleKind::Data(data_kind) => {
            let catalog = list_channels(reader.header()?);
            let resolved = selector.resolve(&catalog)?;
            if let Some(channel) = resolved.iter().find(|c| c.kind() != data_kind) {
                return Err(AdapterError::unsupported_channel_kind(
                    data_kind.as_str(),
                    [channel.kind().as_str()],
                ));
            }

            let stream = resolve_stream(reader.header()?, selector)?;

            let available = reader.segment_sample_count(block, segment, stream)?;
            if stop > available {
                return Err(AdapterError::sample_range_out_of_bounds(
                    start_sample,
                    end_sample,
                    available,
                ));
            }

            let channel_indices = continuous_indices(reader, selector)?;
            let chunk =
                reader.read_chunk(block, segment, stream, &channel_indices, start, stop)?;
            reader.rescale_chunk(&chunk, stream, &channel_indices)
        }
    }
}

/// Synthesize the time vector for a converted half-open range.
///
/// Derived from the sample rate of the first requested channel:
/// `times[i] = (start + i) / rate`. Never reads from storage.
fn synthesize_time(
    reader: &dyn RawReader,
    selector: &ChannelSelector,
    start: u64,
    stop: u64,
) -> Result<SampleMatrix> {
    let catalog = list_channels(reader.header()?);
    let resolved = selector.resolve(&catalog)?;
    let first = resolved.first().ok_or_else(|| {
        AdapterError::Other("time synthesis requires at least one channel".to_string())
    })?;

    let rate = first.sample_rate();
    if rate <= 0.0 {
        return Err(AdapterError::unsupported_channel_kind(
            first.kind().as_str(),
            [
                ChannelKind::Continuous.as_str(),
                ChannelKind::DiscretizedEvent.as_str(),
            ],
        ));
    }

    let sample_interval = 1.0 / rate;
    let times = (start..stop)
        .map(|sample| sample as f64 * sample_interval)
        .collect();
    Ok(SampleMatrix::from_column(times))
}

/// Map resolved channels to their indices in the continuous partition.
fn continuous_indices(reader: &dyn RawReader, selector: &ChannelSelector) -> Result<Vec<usize>> {
    let header = reader.header()?;
    let catalog = list_channels(header);
    selector
        .resolve(&catalog)?
        .iter()
        .map(|channel| {
            header
                .continuous
                .iter()
                .position(|def| def.id == channel.id())
                .ok_or_else(|| {
                    AdapterError::header(
                        "chunk read",
                        format!(
                            "channel '{}' is not in the continuous partition",
                            channel.name()
                        ),
                    )
                })
        })
        .collect()
}
