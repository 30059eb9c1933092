// Copyright 2026 the Scrollfade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-slot background buffer and tint overlay.
//!
//! A crossfade is implemented by stacking two full-page image layers and
//! toggling which one is visible. The next image is always written into the
//! hidden slot before it is revealed, so the slot the viewer is looking at is
//! never repainted in place.

use alloc::string::String;

/// One of the two background slots of a topology instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerSlot {
    /// The first slot; seeded with the initial image when one is known.
    Primary,
    /// The second slot.
    Secondary,
}

impl LayerSlot {
    /// Both slots, in storage order.
    pub const ALL: [Self; 2] = [Self::Primary, Self::Secondary];

    /// Returns the opposite slot.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Primary,
        }
    }

    /// Returns a short label for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }

    const fn idx(self) -> usize {
        match self {
            Self::Primary => 0,
            Self::Secondary => 1,
        }
    }
}

/// Contents and visibility of one slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layer {
    image_url: Option<String>,
    active: bool,
}

impl Layer {
    /// Returns the image painted into this slot, if any.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Returns `true` if this slot is the visible one.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// The two stacked background slots.
///
/// At most one slot is active at any time. Before the first swap neither slot
/// needs to be active; after any swap exactly one is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DualLayerBuffer {
    layers: [Layer; 2],
    front: Option<LayerSlot>,
}

impl DualLayerBuffer {
    /// Creates a buffer with both slots empty and hidden.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the layer in `slot`.
    #[must_use]
    pub fn layer(&self, slot: LayerSlot) -> &Layer {
        &self.layers[slot.idx()]
    }

    /// Returns the visible slot, if any slot has been shown yet.
    #[must_use]
    pub fn active_slot(&self) -> Option<LayerSlot> {
        self.front
    }

    /// Returns the slot the next image will be written into.
    ///
    /// Before anything has been shown this is [`LayerSlot::Secondary`], so the
    /// first swap lands on the slot opposite the seed slot.
    #[must_use]
    pub fn back_slot(&self) -> LayerSlot {
        self.front.unwrap_or(LayerSlot::Primary).other()
    }

    /// Returns the image on the visible slot.
    #[must_use]
    pub fn shown_url(&self) -> Option<&str> {
        self.front.and_then(|slot| self.layer(slot).image_url())
    }

    /// Paints `url` into the primary slot and makes it active.
    ///
    /// Only valid before the first swap; later calls are ignored and return
    /// `false`.
    pub fn seed(&mut self, url: &str) -> bool {
        if self.front.is_some() {
            return false;
        }
        let primary = &mut self.layers[LayerSlot::Primary.idx()];
        primary.image_url = Some(String::from(url));
        primary.active = true;
        self.front = Some(LayerSlot::Primary);
        true
    }

    /// Writes `url` into the hidden slot, then reveals it and hides the other.
    ///
    /// Returns the slot that became active.
    pub fn swap_in(&mut self, url: &str) -> LayerSlot {
        let back = self.back_slot();
        {
            let target = &mut self.layers[back.idx()];
            target.image_url = Some(String::from(url));
            target.active = true;
        }
        self.layers[back.other().idx()].active = false;
        self.front = Some(back);
        back
    }
}

/// Single color layer composited above the background images.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TintOverlay {
    value: Option<String>,
}

impl TintOverlay {
    /// Creates an overlay with no tint applied.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current tint value.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Sets the tint. Returns `true` if the stored value changed.
    pub fn set(&mut self, tint: &str) -> bool {
        if self.value.as_deref() == Some(tint) {
            return false;
        }
        self.value = Some(String::from(tint));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_count(buf: &DualLayerBuffer) -> usize {
        LayerSlot::ALL
            .iter()
            .filter(|&&slot| buf.layer(slot).is_active())
            .count()
    }

    #[test]
    fn new_buffer_has_no_active_slot() {
        let buf = DualLayerBuffer::new();
        assert_eq!(buf.active_slot(), None);
        assert_eq!(active_count(&buf), 0);
        assert_eq!(buf.back_slot(), LayerSlot::Secondary);
    }

    #[test]
    fn seed_paints_primary() {
        let mut buf = DualLayerBuffer::new();
        assert!(buf.seed("black.jpeg"));
        assert_eq!(buf.active_slot(), Some(LayerSlot::Primary));
        assert_eq!(buf.shown_url(), Some("black.jpeg"));
        assert!(!buf.seed("white.jpeg"), "seed after first paint is ignored");
        assert_eq!(buf.shown_url(), Some("black.jpeg"));
    }

    #[test]
    fn swap_writes_back_slot_and_flips() {
        let mut buf = DualLayerBuffer::new();
        buf.seed("black.jpeg");
        let shown = buf.swap_in("white.jpeg");
        assert_eq!(shown, LayerSlot::Secondary);
        assert_eq!(buf.layer(LayerSlot::Secondary).image_url(), Some("white.jpeg"));
        assert_eq!(
            buf.layer(LayerSlot::Primary).image_url(),
            Some("black.jpeg"),
            "the previously visible slot keeps its image for the fade-out"
        );
        assert!(!buf.layer(LayerSlot::Primary).is_active());
        assert_eq!(active_count(&buf), 1);

        let shown = buf.swap_in("grey.jpeg");
        assert_eq!(shown, LayerSlot::Primary);
        assert_eq!(buf.shown_url(), Some("grey.jpeg"));
        assert_eq!(active_count(&buf), 1);
    }

    #[test]
    fn first_swap_without_seed_uses_secondary() {
        let mut buf = DualLayerBuffer::new();
        assert_eq!(buf.swap_in("a.jpg"), LayerSlot::Secondary);
        assert_eq!(active_count(&buf), 1);
        assert_eq!(buf.layer(LayerSlot::Primary).image_url(), None);
    }

    #[test]
    fn tint_reports_changes_only() {
        let mut tint = TintOverlay::new();
        assert!(tint.set("rgba(1,2,3,.1)"));
        assert!(!tint.set("rgba(1,2,3,.1)"));
        assert!(tint.set("rgba(0,0,0,.4)"));
        assert_eq!(tint.value(), Some("rgba(0,0,0,.4)"));
    }
}
