// Copyright 2026 the Scrollfade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Current-panel tracking for the pinned-chapters topology.

use alloc::vec::Vec;

use crate::segment::SegmentIndex;

/// Which content panel is current in a pinned chapter sequence.
///
/// Exactly one panel is current at all times. Before any segment event the
/// first panel in document order is current, so the pinned view is never
/// blank on load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelState {
    panels: Vec<SegmentIndex>,
    current: usize,
}

impl PanelState {
    /// Creates panel state over `panels`, in document order.
    ///
    /// Returns `None` if `panels` is empty.
    #[must_use]
    pub fn new(panels: Vec<SegmentIndex>) -> Option<Self> {
        if panels.is_empty() {
            return None;
        }
        Some(Self { panels, current: 0 })
    }

    /// Returns the index label of the current panel.
    #[must_use]
    pub fn current(&self) -> &SegmentIndex {
        &self.panels[self.current]
    }

    /// Returns the document-order position of the current panel.
    #[must_use]
    pub fn current_position(&self) -> usize {
        self.current
    }

    /// Returns the panel labels in document order.
    #[must_use]
    pub fn panels(&self) -> &[SegmentIndex] {
        &self.panels
    }

    /// Returns `true` if `index` labels the current panel.
    #[must_use]
    pub fn is_current(&self, index: &SegmentIndex) -> bool {
        self.current() == index
    }

    /// Makes the panel labelled `index` current.
    ///
    /// Returns `true` if the current panel changed. Setting the already
    /// current panel, or a label no panel carries, changes nothing.
    pub fn set_active_panel(&mut self, index: &SegmentIndex) -> bool {
        match self.panels.iter().position(|p| p == index) {
            Some(pos) if pos != self.current => {
                self.current = pos;
                true
            }
            _ => false,
        }
    }
}
