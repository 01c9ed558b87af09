// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Unified channel catalog.
//!
//! Flattens the header's three channel-kind partitions into one ordered
//! list of canonical [`Channel`] values. Kind order is fixed (continuous,
//! discretized-event, timestamped-event); within a kind, the header's
//! native order is preserved. No deduplication is performed: if the
//! header contains duplicate names, all are returned, and name-based
//! lookups reject the ambiguity explicitly.

use serde::{Deserialize, Serialize};

use crate::core::{AdapterError, ChannelKind};
use crate::io::header::Header;
use crate::Result;

/// One channel of the unified catalog.
///
/// Kind-specific fields live only on the matching variant; shared
/// attributes are reached through the accessor methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Channel {
    /// Analog/voltage trace belonging to an acquisition stream
    Continuous {
        /// Stable identifier assigned by the raw format
        id: String,
        /// Human-readable label
        name: String,
        /// Sampling rate in Hz
        sample_rate: f64,
        /// Physical unit of rescaled samples
        units: String,
        /// Stream this channel belongs to
        stream_id: String,
    },
    /// Spike-like channel with an associated waveform sampling rate
    DiscretizedEvent {
        /// Stable identifier assigned by the raw format
        id: String,
        /// Human-readable label
        name: String,
        /// Waveform sampling rate in Hz
        wf_sample_rate: f64,
    },
    /// Marker/event channel carrying a code per occurrence
    TimestampedEvent {
        /// Stable identifier assigned by the raw format
        id: String,
        /// Human-readable label
        name: String,
    },
}

impl Channel {
    /// Stable identifier assigned by the raw format.
    pub fn id(&self) -> &str {
        match self {
            Channel::Continuous { id, .. }
            | Channel::DiscretizedEvent { id, .. }
            | Channel::TimestampedEvent { id, .. } => id,
        }
    }

    /// Human-readable label.
    pub fn name(&self) -> &str {
        match self {
            Channel::Continuous { name, .. }
            | Channel::DiscretizedEvent { name, .. }
            | Channel::TimestampedEvent { name, .. } => name,
        }
    }

    /// Channel kind tag.
    pub fn kind(&self) -> ChannelKind {
        match self {
            Channel::Continuous { .. } => ChannelKind::Continuous,
            Channel::DiscretizedEvent { .. } => ChannelKind::DiscretizedEvent,
            Channel::TimestampedEvent { .. } => ChannelKind::TimestampedEvent,
        }
    }

    /// Stream identifier; only continuous channels belong to a stream.
    pub fn stream_id(&self) -> Option<&str> {
        match self {
            Channel::Continuous { stream_id, .. } => Some(stream_id),
            _ => None,
        }
    }

    /// Sampling rate; 0.0 for timestamped-event channels, which have none.
    pub fn sample_rate(&self) -> f64 {
        match self {
            Channel::Continuous { sample_rate, .. } => *sample_rate,
            Channel::DiscretizedEvent { wf_sample_rate, .. } => *wf_sample_rate,
            Channel::TimestampedEvent { .. } => 0.0,
        }
    }
}

impl AsRef<Channel> for Channel {
    fn as_ref(&self) -> &Channel {
        self
    }
}

/// Build the unified catalog from a parsed header.
pub fn list_channels(header: &Header) -> Vec<Channel> {
    let mut channels = Vec::with_capacity(header.channel_count());
    for def in &header.continuous {
        channels.push(Channel::Continuous {
            id: def.id.clone(),
            name: def.name.clone(),
            sample_rate: def.sample_rate,
            units: def.units.clone(),
            stream_id: def.stream_id.clone(),
        });
    }
    for def in &header.discretized {
        channels.push(Channel::DiscretizedEvent {
            id: def.id.clone(),
            name: def.name.clone(),
            wf_sample_rate: def.wf_sample_rate,
        });
    }
    for def in &header.timestamped {
        channels.push(Channel::TimestampedEvent {
            id: def.id.clone(),
            name: def.name.clone(),
        });
    }
    channels
}

/// How a request names its channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChannelSelector {
    /// Match channels by stable id
    ByIds(Vec<String>),
    /// Match channels by label
    ByNames(Vec<String>),
}

impl ChannelSelector {
    /// The raw identifiers, in request order.
    pub fn identifiers(&self) -> &[String] {
        match self {
            ChannelSelector::ByIds(ids) => ids,
            ChannelSelector::ByNames(names) => names,
        }
    }

    /// Check if the selector names no channels.
    pub fn is_empty(&self) -> bool {
        self.identifiers().is_empty()
    }

    /// Resolve each identifier against a catalog, in request order.
    ///
    /// An identifier matching zero channels fails with `ChannelNotFound`
    /// listing the catalog's names; one matching more than one channel
    /// fails with `AmbiguousChannel`. Duplicate names in the catalog are
    /// tolerated up to the point a request actually names them.
    pub fn resolve<'a>(&self, catalog: &'a [Channel]) -> Result<Vec<&'a Channel>> {
        let by_id = matches!(self, ChannelSelector::ByIds(_));
        self.identifiers()
            .iter()
            .map(|identifier| {
                let mut matches = catalog.iter().filter(|channel| {
                    if by_id {
                        channel.id() == identifier
                    } else {
                        channel.name() == identifier
                    }
                });
                let first = matches.next().ok_or_else(|| {
                    AdapterError::channel_not_found(
                        identifier,
                        catalog.iter().map(|c| c.name().to_string()),
                    )
                })?;
                let extra = matches.count();
                if extra > 0 {
                    return Err(AdapterError::ambiguous_channel(identifier, extra + 1));
                }
                Ok(first)
            })
            .collect()
    }
}
