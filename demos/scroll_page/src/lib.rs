// Copyright 2026 the Scrollfade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: scroll-driven background crossfade.
//!
//! Installs the engine on `index.html`, which carries both topologies: a
//! handful of `main > section[id]` blocks without authored markers (mapped
//! through [`SECTIONS`]) and a `.chapters` block whose panels get synthesized
//! markers. Trace lines go to the browser console.
//!
//! Build with: `wasm-pack build --target web demos/scroll_page`
//!
//! Then serve `demos/scroll_page/` and open `index.html` in a browser.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::boxed::Box;

use scrollfade_backend_web::ConsoleSink;
use scrollfade_core::config::{EngineConfig, SectionMapping, SectionRule};
use wasm_bindgen::prelude::*;

/// Section backgrounds for the demo page.
const SECTIONS: &[SectionRule] = &[
    SectionRule {
        section: "intro",
        image_url: "img/black.jpeg",
        tint: Some("rgba(0, 0, 0, 0.35)"),
    },
    SectionRule {
        section: "studio",
        image_url: "img/white.jpeg",
        tint: Some("rgba(255, 255, 255, 0.1)"),
    },
    SectionRule {
        section: "process",
        image_url: "img/white.jpeg",
        tint: Some("rgba(20, 30, 60, 0.25)"),
    },
    SectionRule {
        section: "contact",
        image_url: "img/dusk.jpeg",
        tint: None,
    },
];

const CONFIG: EngineConfig = EngineConfig::DEFAULT
    .with_section_mapping(SectionMapping { rules: SECTIONS })
    .with_pinned_defaults(["img/chapter-dark.jpeg", "img/chapter-light.jpeg"]);

/// Entry point for the scroll-page demo.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let engine = scrollfade_backend_web::start_with(CONFIG, Box::new(ConsoleSink::default()))?;
    // Keep the observers alive for the lifetime of the page.
    core::mem::forget(engine);
    Ok(())
}
