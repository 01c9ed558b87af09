// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! I/O layer for electrophysiology recording formats.
//!
//! This module provides the foundational types and traits at the raw
//! decoder boundary: the parsed [`Header`](header::Header) shape, the
//! [`RawReader`](traits::RawReader) capability trait, and reader
//! construction via the [`FormatRegistry`](factory::FormatRegistry).

pub mod factory;
pub mod header;
pub mod traits;

// Re-exports
pub use factory::{FormatRegistry, EXTENSION_OVERRIDES};
pub use header::{
    ContinuousChannelDef, DiscretizedEventChannelDef, Header, RawChunk, SampleMatrix, StreamDef,
    TimestampedEventChannelDef,
};
pub use traits::{FileMode, RawEventData, RawFormat, RawReader};
