// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Segment-scoped channel discovery.
//!
//! The header enumerates every channel ever possible for a file-set; a
//! given segment may realize only a subset (zero-length signals are
//! sometimes omitted at the segment level). Any channel listing scoped
//! to one segment must intersect the segment's materialized channel
//! names against the header catalog, not return the raw header list.

use tracing::warn;

use crate::core::AdapterError;
use crate::io::traits::RawReader;
use crate::Result;

use super::catalog::{list_channels, Channel};

/// List the catalog channels actually present in one segment.
///
/// The segment's materialized channel names (continuous signal series,
/// spike trains, and other timestamped series) are intersected against
/// the full header catalog, preserving catalog order. A segment name
/// absent from the header is inconsistent metadata: the header is
/// authoritative for channel identity, so the name is dropped with a
/// warning rather than surfaced as a new channel.
pub fn channels_in_segment(
    reader: &mut dyn RawReader,
    block: usize,
    segment: usize,
) -> Result<Vec<Channel>> {
    check_selector(reader, block, segment)?;

    reader.parse_header()?;
    let names = reader.segment_channel_names(block, segment)?;
    let catalog = list_channels(reader.header()?);

    for name in &names {
        if !catalog.iter().any(|channel| channel.name() == name) {
            warn!(
                channel = name.as_str(),
                block, segment, "segment names a channel absent from the header; dropping"
            );
        }
    }

    Ok(catalog
        .into_iter()
        .filter(|channel| names.iter().any(|name| name == channel.name()))
        .collect())
}

/// Validate a block/segment selector against the recording's structure.
pub(crate) fn check_selector(
    reader: &dyn RawReader,
    block: usize,
    segment: usize,
) -> Result<()> {
    let blocks = reader.block_count();
    if block >= blocks {
        return Err(AdapterError::selector_out_of_range("block", block, blocks));
    }
    let segments = reader.segment_count(block)?;
    if segment >= segments {
        return Err(AdapterError::selector_out_of_range(
            "segment", segment, segments,
        ));
    }
    Ok(())
}
