// Copyright 2026 the Scrollfade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.
//!
//! [`EngineConfig`] gathers everything a host needs to find the page hooks of
//! both topologies and to tune the trigger band. All values are `'static`, so
//! a configuration is `Copy` and can be built in a `const`.

use alloc::vec::Vec;

use crate::segment::Segment;
use crate::visibility::TriggerBand;

/// DOM hooks for the global (flat markers) topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlobalSelectors {
    /// Selector matching the scroll markers, in document order.
    pub markers: &'static str,
    /// Selector matching the page sections used by [`SectionMapping`] when
    /// no markers are authored.
    pub sections: &'static str,
    /// Selectors of the primary and secondary background slots.
    pub layers: [&'static str; 2],
    /// Selector of the tint overlay.
    pub overlay: &'static str,
}

/// DOM hooks for the pinned-chapters topology.
///
/// Every selector except [`container`](Self::container) is resolved inside
/// the container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinnedSelectors {
    /// Selector of the pinned chapter container.
    pub container: &'static str,
    /// Selector matching authored chapter markers.
    pub markers: &'static str,
    /// Selector matching the content panels.
    pub panels: &'static str,
    /// Selectors of the primary and secondary background slots.
    pub layers: [&'static str; 2],
    /// Selector of the tint overlay.
    pub overlay: &'static str,
}

/// Attribute and class names shared by both topologies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hooks {
    /// Attribute carrying a marker's or panel's image URL.
    pub image_attr: &'static str,
    /// Attribute carrying a marker's tint color.
    pub tint_attr: &'static str,
    /// Attribute carrying a marker's or panel's ordinal index.
    pub index_attr: &'static str,
    /// Attribute written on the pinned container with the current panel index.
    pub current_panel_attr: &'static str,
    /// Class toggled on the visible layer slot.
    pub active_class: &'static str,
    /// Class toggled on the current panel.
    pub current_class: &'static str,
    /// Custom property receiving the tint value.
    pub tint_property: &'static str,
}

/// Static mapping from a page section to its background.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionRule {
    /// Section identifier (the element's `id`).
    pub section: &'static str,
    /// Background image for the section.
    pub image_url: &'static str,
    /// Optional tint for the section.
    pub tint: Option<&'static str>,
}

/// Content policy used to synthesize global segments when the page has no
/// authored markers.
///
/// The mapping is presentation content, not engine behavior, so it is empty
/// by default and injected by the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SectionMapping {
    /// Rules, looked up by section identifier.
    pub rules: &'static [SectionRule],
}

impl SectionMapping {
    /// Maps section identifiers (in document order) to segments.
    ///
    /// Returns `(position, segment)` pairs, where `position` is the section's
    /// offset in `sections`. Unmapped sections are skipped.
    #[must_use]
    pub fn segments_for<'a>(
        &self,
        sections: impl IntoIterator<Item = &'a str>,
    ) -> Vec<(usize, Segment)> {
        sections
            .into_iter()
            .enumerate()
            .filter_map(|(pos, id)| {
                let rule = self.rules.iter().find(|r| r.section == id)?;
                let mut segment = Segment::new(rule.image_url);
                if let Some(tint) = rule.tint {
                    segment = segment.with_tint(tint);
                }
                Some((pos, segment))
            })
            .collect()
    }
}

/// Configuration for the crossfade engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Centered band that decides when a segment counts as entered.
    pub trigger_band: TriggerBand,
    /// Height, in CSS pixels, given to observed markers that have none.
    pub min_marker_height_px: f64,
    /// Images alternated between synthesized pinned markers whose panel
    /// names none.
    pub pinned_defaults: [&'static str; 2],
    /// Section mapping for pages without global markers.
    pub section_mapping: SectionMapping,
    /// Global topology hooks.
    pub global: GlobalSelectors,
    /// Pinned topology hooks.
    pub pinned: PinnedSelectors,
    /// Shared attribute and class names.
    pub hooks: Hooks,
    /// Skip the engine entirely when the reader prefers reduced motion.
    pub respect_reduced_motion: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl EngineConfig {
    /// The default page contract.
    pub const DEFAULT: Self = Self {
        trigger_band: TriggerBand::centered(0.4),
        min_marker_height_px: 120.0,
        pinned_defaults: ["/img/chapter-dark.jpg", "/img/chapter-light.jpg"],
        section_mapping: SectionMapping { rules: &[] },
        global: GlobalSelectors {
            markers: ".bg-marker",
            sections: "main > section[id]",
            layers: ["#bg-layer-a", "#bg-layer-b"],
            overlay: "#bg-tint",
        },
        pinned: PinnedSelectors {
            container: ".chapters",
            markers: ".chapter-marker",
            panels: ".chapter-panel",
            layers: [".chapter-bg-a", ".chapter-bg-b"],
            overlay: ".chapter-tint",
        },
        hooks: Hooks {
            image_attr: "data-bg",
            tint_attr: "data-tint",
            index_attr: "data-index",
            current_panel_attr: "data-current-panel",
            active_class: "is-active",
            current_class: "is-current",
            tint_property: "--bg-tint",
        },
        respect_reduced_motion: true,
    };

    /// Returns `true` if the engine may run for a reader with the given
    /// reduced-motion preference.
    ///
    /// A disabled engine attaches no observer and never writes a layer.
    #[must_use]
    pub const fn engine_enabled(&self, prefers_reduced_motion: bool) -> bool {
        !(self.respect_reduced_motion && prefers_reduced_motion)
    }

    /// Returns this configuration with a section mapping installed.
    #[must_use]
    pub const fn with_section_mapping(mut self, mapping: SectionMapping) -> Self {
        self.section_mapping = mapping;
        self
    }

    /// Returns this configuration with different pinned default images.
    #[must_use]
    pub const fn with_pinned_defaults(mut self, defaults: [&'static str; 2]) -> Self {
        self.pinned_defaults = defaults;
        self
    }
}
