// Copyright 2026 the Scrollfade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM output.
//!
//! Writes [`CrossfadeController`] state to the page: the background image and
//! active class of both layer slots, the tint custom property on the overlay,
//! and (pinned topology) the current-panel attribute and class.
//!
//! [`CrossfadeController`]: scrollfade_core::controller::CrossfadeController

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use scrollfade_core::backend::Presenter;
use scrollfade_core::config::Hooks;
use scrollfade_core::controller::{Changes, CrossfadeController};
use scrollfade_core::layer::LayerSlot;
use scrollfade_core::segment::SegmentIndex;
use web_sys::{Element, HtmlElement};

/// Panel elements of a pinned topology, with the container that receives the
/// current-panel attribute.
pub struct PanelElements {
    /// The pinned container.
    pub container: Element,
    /// `(label, element)` pairs in document order.
    pub panels: Vec<(SegmentIndex, Element)>,
}

impl core::fmt::Debug for PanelElements {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PanelElements")
            .field("container", &"Element")
            .field("panels_len", &self.panels.len())
            .finish()
    }
}

/// Maps a controller's layer slots, tint, and panels to live DOM elements.
pub struct DomPresenter {
    layers: [HtmlElement; 2],
    overlay: HtmlElement,
    panels: Option<PanelElements>,
    hooks: Hooks,
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("layers", &"[HtmlElement; 2]")
            .field("overlay", &"HtmlElement")
            .field("panels", &self.panels)
            .field("hooks", &self.hooks)
            .finish()
    }
}

impl DomPresenter {
    /// Creates a presenter writing to the given slots and overlay.
    #[must_use]
    pub fn new(
        layers: [HtmlElement; 2],
        overlay: HtmlElement,
        panels: Option<PanelElements>,
        hooks: Hooks,
    ) -> Self {
        Self {
            layers,
            overlay,
            panels,
            hooks,
        }
    }

    /// Returns the element backing `slot`.
    #[must_use]
    pub fn layer_element(&self, slot: LayerSlot) -> &HtmlElement {
        match slot {
            LayerSlot::Primary => &self.layers[0],
            LayerSlot::Secondary => &self.layers[1],
        }
    }

    fn apply_layer(&self, controller: &CrossfadeController, slot: LayerSlot) {
        let layer = controller.buffer().layer(slot);
        let el = self.layer_element(slot);
        if let Some(url) = layer.image_url() {
            let _ = el
                .style()
                .set_property("background-image", &css_url(url));
        }
        let _ = el
            .class_list()
            .toggle_with_force(self.hooks.active_class, layer.is_active());
    }

    fn apply_panels(&self, controller: &CrossfadeController) {
        let (Some(elements), Some(state)) = (&self.panels, controller.panels()) else {
            return;
        };
        let current = state.current();
        let _ = elements
            .container
            .set_attribute(self.hooks.current_panel_attr, current.as_str());
        for (label, el) in &elements.panels {
            let _ = el
                .class_list()
                .toggle_with_force(self.hooks.current_class, label == current);
        }
    }
}

impl Presenter for DomPresenter {
    fn apply(&mut self, controller: &CrossfadeController, changes: &Changes) {
        // 1. Layer slots: the newly active slot is listed first, so its image
        // is in place before the old slot starts fading out.
        for &slot in &changes.layers {
            self.apply_layer(controller, slot);
        }

        // 2. Tint
        if changes.tint
            && let Some(tint) = controller.tint().value()
        {
            let _ = self
                .overlay
                .style()
                .set_property(self.hooks.tint_property, tint);
        }

        // 3. Panels
        if changes.panel {
            self.apply_panels(controller);
        }
    }
}

/// Formats `url` as a CSS `url("...")` value.
pub(crate) fn css_url(url: &str) -> String {
    let mut escaped = String::with_capacity(url.len());
    for ch in url.chars() {
        if matches!(ch, '"' | '\\') {
            escaped.push('\\');
        }
        if ch == '\n' {
            escaped.push_str("\\a ");
            continue;
        }
        escaped.push(ch);
    }
    format!("url(\"{escaped}\")")
}
