// Copyright 2026 the Scrollfade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Media-query probes.

use web_sys::Window;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Returns `true` if the reader asked the system to minimize motion.
///
/// Browsers without `matchMedia` report `false`.
#[must_use]
pub fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .is_some_and(|list| list.matches())
}
