// Copyright 2026 the Scrollfade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser console trace output.
//!
//! [`ConsoleSink`] implements [`TraceSink`] and writes one `console.debug`
//! line per event. Enable the `trace` feature for events to reach it.

use alloc::format;
use alloc::string::String;

use scrollfade_core::trace::{
    EnteredEvent, HoldEvent, PanelEvent, PreloadEvent, SetupEvent, SkippedEvent, SwapEvent,
    TintEvent, TraceSink,
};
use wasm_bindgen::JsValue;

/// Writes human-readable trace lines to the browser console.
#[derive(Clone, Debug)]
pub struct ConsoleSink {
    prefix: &'static str,
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new("scrollfade")
    }
}

impl ConsoleSink {
    /// Creates a sink whose lines start with `[prefix]`.
    #[must_use]
    pub const fn new(prefix: &'static str) -> Self {
        Self { prefix }
    }

    fn line(&self, body: String) {
        web_sys::console::debug_1(&JsValue::from_str(&format!("[{}] {body}", self.prefix)));
    }
}

impl TraceSink for ConsoleSink {
    fn on_setup(&mut self, e: &SetupEvent) {
        self.line(format!(
            "setup {} source={:?} segments={} panels={}",
            e.topology.as_str(),
            e.source,
            e.segments,
            e.panels,
        ));
    }

    fn on_skipped(&mut self, e: &SkippedEvent) {
        self.line(format!("skip {}: {}", e.topology.as_str(), e.reason));
    }

    fn on_segment_entered(&mut self, e: &EnteredEvent<'_>) {
        self.line(format!(
            "enter {} segment={} image={}",
            e.topology.as_str(),
            e.segment.0,
            e.image_url.unwrap_or("-"),
        ));
    }

    fn on_swap(&mut self, e: &SwapEvent<'_>) {
        self.line(format!(
            "swap {} slot={} image={}",
            e.topology.as_str(),
            e.slot.as_str(),
            e.image_url,
        ));
    }

    fn on_hold(&mut self, e: &HoldEvent) {
        let why = if e.inert { "inert" } else { "shown" };
        self.line(format!(
            "hold {} segment={} ({why})",
            e.topology.as_str(),
            e.segment.0,
        ));
    }

    fn on_tint(&mut self, e: &TintEvent<'_>) {
        self.line(format!("tint {} {}", e.topology.as_str(), e.tint));
    }

    fn on_panel(&mut self, e: &PanelEvent<'_>) {
        self.line(format!("panel {} current={}", e.topology.as_str(), e.index));
    }

    fn on_preload(&mut self, e: &PreloadEvent<'_>) {
        self.line(format!("preload {} {}", e.topology.as_str(), e.image_url));
    }
}
