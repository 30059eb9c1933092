// Copyright 2026 the Scrollfade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-driven background crossfade engine.
//!
//! `scrollfade_core` holds the state machine that decides which full-page
//! background image is shown as the reader scrolls through a sequence of
//! content segments. It is `no_std` compatible (with `alloc`) and has no DOM
//! dependency, so every decision can be unit-tested on the host.
//!
//! # Architecture
//!
//! One pipeline runs per page topology (global markers, pinned chapters):
//!
//! ```text
//!   SegmentRegistry ──► VisibilityTracker (host) ──► SegmentId
//!                                                       │
//!                 ┌─────────────────────────────────────┘
//!                 ▼
//!   CrossfadeController::on_segment_entered() ──► Changes
//!                                                   │
//!                 ┌─────────────────────────────────┘
//!                 ▼
//!   Preloader::preload()  then  Presenter::apply()
//! ```
//!
//! **[`segment`]** — Immutable segments and the [`SegmentRegistry`] that
//! hands out [`SegmentId`] handles.
//!
//! **[`visibility`]** — Trigger-band geometry and outside→inside entry
//! detection.
//!
//! **[`layer`]** — The two-slot [`DualLayerBuffer`] and the [`TintOverlay`].
//!
//! **[`panel`]** — Current-panel tracking for the pinned topology.
//!
//! **[`controller`]** — The [`CrossfadeController`] that consumes entry
//! events and records [`Changes`].
//!
//! **[`topology`]** — Capability-checked [`TopologyConfig`] construction and
//! marker synthesis.
//!
//! **[`config`]** — [`EngineConfig`] and the injectable section mapping.
//!
//! **[`backend`]** — The [`Presenter`](backend::Presenter) and
//! [`Preloader`](backend::Preloader) traits that host backends implement.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and zero-overhead
//! [`Tracer`](trace::Tracer) wrapper for engine diagnostics.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//!
//! [`SegmentRegistry`]: segment::SegmentRegistry
//! [`SegmentId`]: segment::SegmentId
//! [`DualLayerBuffer`]: layer::DualLayerBuffer
//! [`TintOverlay`]: layer::TintOverlay
//! [`CrossfadeController`]: controller::CrossfadeController
//! [`Changes`]: controller::Changes
//! [`TopologyConfig`]: topology::TopologyConfig
//! [`EngineConfig`]: config::EngineConfig

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod layer;
pub mod panel;
pub mod segment;
pub mod topology;
pub mod trace;
pub mod visibility;
