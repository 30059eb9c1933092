// Copyright 2026 the Scrollfade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and recording for scrollfade diagnostics.
//!
//! This crate provides [`TraceSink`](scrollfade_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`] — in-memory event log with JSON export.
//!
//! It also offers [`replay`], which drives a topology through a scripted
//! sequence of entries without a browser.

pub mod pretty;
pub mod recorder;
pub mod replay;
