// Copyright 2026 the Scrollfade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Setup errors.

use core::fmt;

/// Reason a topology instance was not created.
///
/// None of these are fatal to the page: the affected topology simply does
/// not run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetupError {
    /// No markers were found and none could be synthesized.
    NoMarkers,
    /// Fewer than two background layer slots were found.
    MissingLayers,
    /// The tint overlay element was not found.
    MissingOverlay,
    /// A pinned container has neither chapter markers nor content panels.
    NoPanels,
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMarkers => write!(f, "no scroll markers found"),
            Self::MissingLayers => write!(f, "two background layer slots are required"),
            Self::MissingOverlay => write!(f, "tint overlay element not found"),
            Self::NoPanels => write!(f, "pinned container has no chapters or panels"),
        }
    }
}

impl core::error::Error for SetupError {}
