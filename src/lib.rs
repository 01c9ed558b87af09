// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # ephysio
//!
//! Uniform read adapter for heterogeneous electrophysiology recordings.
//!
//! Acquisition hardware families each ship their own on-disk layout.
//! This library lets consumers request data using abstract notions -
//! channel, segment, sample range, time range - while format-specific
//! decoders plug in behind the [`RawReader`](io::traits::RawReader)
//! capability trait.
//!
//! ## Architecture
//!
//! The library is organized into three layers:
//! - `core/` - channel kinds and the error taxonomy
//! - `io/` - the decoder boundary: header shape, `RawReader` trait,
//!   format classification and reader construction
//! - `adapter/` - the format-independent logic: unified channel catalog,
//!   stream resolution, segment-scoped discovery, sample and event
//!   extraction
//!
//! ## The single-stream invariant
//!
//! Every continuous channel belongs to exactly one acquisition stream
//! (shared clock and sample grid). A multi-channel chunk read is valid
//! only within one stream; the adapter validates this *before* any read
//! is attempted, because a cross-stream read would silently return data
//! on the wrong timebase.
//!
//! ## Example: reading a sample range
//!
//! ```rust,no_run
//! # fn main() -> Result<(), ephysio::AdapterError> {
//! use std::path::PathBuf;
//! use ephysio::{ChannelKind, RecordingAdapter, SampleKind};
//! use ephysio::adapter::ChannelSelector;
//! use ephysio::io::factory::FormatRegistry;
//!
//! let registry = FormatRegistry::new();
//! // registry.register(Box::new(MyFormat));
//!
//! let mut adapter = RecordingAdapter::open(&registry, &[PathBuf::from("session.smr")])?;
//! let selector = ChannelSelector::ByNames(vec!["ch0".into(), "ch1".into()]);
//! let samples = adapter.read_samples(
//!     SampleKind::Data(ChannelKind::Continuous),
//!     &selector,
//!     0,
//!     0,
//!     1,
//!     1000,
//! )?;
//! println!("{} samples x {} channels", samples.rows(), samples.cols());
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use crate::core::{AdapterError, ChannelKind, Result, SampleKind};

// Decoder boundary (header shape, RawReader trait, format registry)
pub mod io;

// Re-export key I/O types
pub use io::factory::FormatRegistry;
pub use io::header::{Header, RawChunk, SampleMatrix};
pub use io::traits::{FileMode, RawFormat, RawReader};

// Format-independent adapter logic
pub mod adapter;

pub use adapter::{
    Channel, ChannelBinding, ChannelEvents, ChannelSelector, ReadCompatibility, RecordingAdapter,
};
