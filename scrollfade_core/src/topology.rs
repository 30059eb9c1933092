// Copyright 2026 the Scrollfade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Topology resolution and marker synthesis.
//!
//! A page may carry a *global* topology (flat markers spread across
//! unrelated sections), a *pinned* topology (a sticky chapter sequence with
//! content panels), or both. Each is resolved once at setup into a
//! [`TopologyConfig`]. A config only exists when every prerequisite is
//! present, so the controller built from it never has to check for missing
//! hooks on the event path.

use alloc::string::String;
use alloc::vec::Vec;

use crate::controller::CrossfadeController;
use crate::error::SetupError;
use crate::panel::PanelState;
use crate::segment::{Segment, SegmentIndex, SegmentRegistry};

/// Which page topology a pipeline drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TopologyKind {
    /// Flat markers spanning independent sections.
    Global,
    /// Sticky visuals with a sequence of content panels.
    Pinned,
}

impl TopologyKind {
    /// Returns a short label for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Pinned => "pinned",
        }
    }
}

/// Where a topology's segments came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerSource {
    /// Authored marker elements; segment `i` is marker element `i`.
    Markers,
    /// Synthesized from page sections; segment `i` is the `i`-th mapped
    /// section.
    Sections,
    /// Synthesized from content panels; segment `i` is panel element `i`.
    Panels,
}

/// Presence of the output hooks a topology writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Surfaces {
    /// Number of background layer slots found (two are required).
    pub layers: usize,
    /// Whether the tint overlay was found.
    pub overlay: bool,
}

impl Surfaces {
    fn check(self) -> Result<(), SetupError> {
        if self.layers < 2 {
            return Err(SetupError::MissingLayers);
        }
        if !self.overlay {
            return Err(SetupError::MissingOverlay);
        }
        Ok(())
    }
}

/// A content panel as read from the page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PanelSpec {
    /// The panel's own index, if authored.
    pub index: Option<SegmentIndex>,
    /// The panel's own image, if authored.
    pub image_url: Option<String>,
}

impl PanelSpec {
    /// Returns the panel's label: its authored index or its 1-based ordinal.
    #[must_use]
    pub fn label(&self, position: usize) -> SegmentIndex {
        self.index.clone().unwrap_or_else(|| ordinal(position))
    }
}

fn ordinal(position: usize) -> SegmentIndex {
    let n = u32::try_from(position + 1).unwrap_or(u32::MAX);
    SegmentIndex::from(n)
}

/// Synthesizes one pinned segment per panel, in panel order.
///
/// Each segment takes the panel's own image, or alternates between the two
/// `defaults` when the panel names none. The segment index is the panel's
/// label, so entering a segment makes its panel current.
#[must_use]
pub fn synthesize_pinned_segments(panels: &[PanelSpec], defaults: [&str; 2]) -> Vec<Segment> {
    panels
        .iter()
        .enumerate()
        .map(|(pos, panel)| {
            let url = panel
                .image_url
                .as_deref()
                .filter(|u| !u.is_empty())
                .unwrap_or(defaults[pos % 2]);
            Segment::new(url).with_index(panel.label(pos))
        })
        .collect()
}

fn label_markers(markers: Vec<Segment>) -> Vec<Segment> {
    markers
        .into_iter()
        .enumerate()
        .map(|(pos, marker)| {
            if marker.index().is_some() {
                marker
            } else {
                marker.with_index(ordinal(pos))
            }
        })
        .collect()
}

/// A fully resolved topology instance, ready to drive a controller.
#[derive(Clone, Debug)]
pub struct TopologyConfig {
    kind: TopologyKind,
    source: MarkerSource,
    registry: SegmentRegistry,
    panels: Vec<SegmentIndex>,
}

impl TopologyConfig {
    /// Resolves the global topology.
    ///
    /// Authored `markers` win; otherwise `sections` (already mapped to
    /// segments) are used.
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] if an output hook is missing or there is
    /// nothing to observe.
    pub fn global(
        markers: Vec<Segment>,
        sections: Vec<Segment>,
        surfaces: Surfaces,
    ) -> Result<Self, SetupError> {
        surfaces.check()?;
        let (source, segments) = if !markers.is_empty() {
            (MarkerSource::Markers, markers)
        } else if !sections.is_empty() {
            (MarkerSource::Sections, sections)
        } else {
            return Err(SetupError::NoMarkers);
        };
        Ok(Self {
            kind: TopologyKind::Global,
            source,
            registry: segments.into_iter().collect(),
            panels: Vec::new(),
        })
    }

    /// Resolves the pinned topology.
    ///
    /// Authored chapter `markers` win; a marker without an index takes its
    /// 1-based ordinal, matching the default panel labels. Otherwise one
    /// marker is synthesized per panel with [`synthesize_pinned_segments`].
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] if an output hook is missing or the
    /// container has neither markers nor panels.
    pub fn pinned(
        markers: Vec<Segment>,
        panels: &[PanelSpec],
        defaults: [&str; 2],
        surfaces: Surfaces,
    ) -> Result<Self, SetupError> {
        surfaces.check()?;
        let (source, segments) = if !markers.is_empty() {
            (MarkerSource::Markers, label_markers(markers))
        } else if !panels.is_empty() {
            (
                MarkerSource::Panels,
                synthesize_pinned_segments(panels, defaults),
            )
        } else {
            return Err(SetupError::NoPanels);
        };
        Ok(Self {
            kind: TopologyKind::Pinned,
            source,
            registry: segments.into_iter().collect(),
            panels: panels
                .iter()
                .enumerate()
                .map(|(pos, p)| p.label(pos))
                .collect(),
        })
    }

    /// Returns the topology kind.
    #[must_use]
    pub fn kind(&self) -> TopologyKind {
        self.kind
    }

    /// Returns where the segments came from.
    #[must_use]
    pub fn source(&self) -> MarkerSource {
        self.source
    }

    /// Returns the segment registry.
    #[must_use]
    pub fn registry(&self) -> &SegmentRegistry {
        &self.registry
    }

    /// Returns the panel labels, in document order (pinned only).
    #[must_use]
    pub fn panels(&self) -> &[SegmentIndex] {
        &self.panels
    }

    /// Builds the controller for this topology.
    ///
    /// The pinned topology pre-seeds its primary slot with the first visual
    /// segment so the sticky view is never blank; the global topology starts
    /// with both slots hidden until the first entry.
    #[must_use]
    pub fn controller(&self) -> CrossfadeController {
        match self.kind {
            TopologyKind::Global => CrossfadeController::new(None),
            TopologyKind::Pinned => {
                let panels = PanelState::new(self.panels.clone());
                match self.registry.first_visual() {
                    Some(first) => CrossfadeController::with_initial_segment(panels, first),
                    None => CrossfadeController::new(panels),
                }
            }
        }
    }

    /// Splits the config into its registry, consuming it.
    #[must_use]
    pub fn into_registry(self) -> SegmentRegistry {
        self.registry
    }
}
