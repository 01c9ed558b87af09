// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Stream resolution for multi-channel reads.
//!
//! A chunked multi-channel read is only physically meaningful within
//! one acquisition stream (shared clock and sample grid). This module
//! validates that constraint before any read is attempted: violating it
//! after the fact would mean a read against the wrong channel's
//! timebase, returned silently as garbage.

use crate::core::AdapterError;
use crate::io::header::Header;
use crate::Result;

use super::catalog::{list_channels, Channel, ChannelSelector};

/// Placeholder stream id used in diagnostics for channels that belong
/// to no stream (the two event kinds).
const NO_STREAM: &str = "<none>";

/// Non-throwing verdict on whether a channel set is one-chunk readable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadCompatibility {
    /// True when every channel resolves to the same stream
    pub ok: bool,
    /// One diagnostic line per channel when not ok; empty otherwise
    pub detail: String,
}

/// Resolve the requested channels to the single stream index they share.
///
/// Each identifier is looked up in the unified catalog (absent →
/// `ChannelNotFound`, ambiguous → `AmbiguousChannel`). The distinct
/// stream ids of the matched channels must have size 1; otherwise the
/// request fails with `MultiStreamViolation` carrying every offending
/// (channel id, stream id) pair. The surviving stream id is mapped to
/// its position in the header's ordered stream list, which is the index
/// chunk reads use.
pub fn resolve_stream(header: &Header, selector: &ChannelSelector) -> Result<usize> {
    if selector.is_empty() {
        return Err(AdapterError::Other(
            "stream resolution requires at least one channel".to_string(),
        ));
    }

    let catalog = list_channels(header);
    let resolved = selector.resolve(&catalog)?;

    let mut stream_ids: Vec<&str> = Vec::new();
    let mut streamless = false;
    for channel in &resolved {
        match channel.stream_id() {
            Some(id) => {
                if !stream_ids.contains(&id) {
                    stream_ids.push(id);
                }
            }
            None => streamless = true,
        }
    }

    if streamless || stream_ids.len() != 1 {
        let assignments = resolved
            .iter()
            .map(|channel| {
                (
                    channel.id().to_string(),
                    channel.stream_id().unwrap_or(NO_STREAM).to_string(),
                )
            })
            .collect();
        return Err(AdapterError::multi_stream_violation(assignments));
    }

    let stream_id = stream_ids[0];
    header.stream_index(stream_id).ok_or_else(|| {
        AdapterError::header(
            "stream resolution",
            format!("stream '{stream_id}' not in the header's stream list"),
        )
    })
}

/// Check whether a channel set can be read as one chunk.
///
/// The grouping check of [`resolve_stream`], without committing to a
/// read. On failure, `detail` carries one line per channel in the shape
/// `Channel_id: '<id>', stream_id: '<stream>'.` so the caller can see
/// the whole assignment at a glance.
pub fn can_be_read_together<C: AsRef<Channel>>(channels: &[C]) -> ReadCompatibility {
    let mut stream_ids: Vec<&str> = Vec::new();
    let mut homogeneous = true;
    for channel in channels {
        match channel.as_ref().stream_id() {
            Some(id) => {
                if !stream_ids.contains(&id) {
                    stream_ids.push(id);
                }
            }
            None => homogeneous = false,
        }
    }

    if homogeneous && stream_ids.len() <= 1 {
        return ReadCompatibility {
            ok: true,
            detail: String::new(),
        };
    }

    let mut detail =
        String::from("All requested channels must belong to a single signal stream.\n");
    for channel in channels {
        let channel = channel.as_ref();
        detail.push_str(&format!(
            "Channel_id: '{}', stream_id: '{}'.\n",
            channel.id(),
            channel.stream_id().unwrap_or(NO_STREAM)
        ));
    }
    ReadCompatibility { ok: false, detail }
}
