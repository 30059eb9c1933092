// Copyright 2026 the Scrollfade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `IntersectionObserver` visibility source.
//!
//! [`VisibilityTracker`] observes one element per segment against the trigger
//! band (expressed as a negative `rootMargin`) and forwards every report as
//! `(SegmentId, intersecting)`. Filtering reports down to entries is the
//! caller's job, via [`EntryDetector`].
//!
//! [`EntryDetector`]: scrollfade_core::visibility::EntryDetector

use alloc::boxed::Box;
use alloc::vec::Vec;

use js_sys::Array;
use scrollfade_core::segment::SegmentId;
use scrollfade_core::visibility::TriggerBand;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

type ObserverClosure = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Watches segment elements and reports their band overlap.
///
/// Element `i` of `targets` reports as `SegmentId(i)`. The observer is
/// disconnected when the tracker is dropped.
pub struct VisibilityTracker {
    observer: IntersectionObserver,
    /// Kept alive for as long as the observer may call it.
    _closure: ObserverClosure,
    len: usize,
}

impl VisibilityTracker {
    /// Starts observing `targets`.
    ///
    /// `on_report` runs synchronously on the main thread, once per observer
    /// entry, in the order the browser delivers them.
    ///
    /// # Errors
    ///
    /// Returns the JS exception if the observer cannot be constructed (for
    /// example, a malformed `rootMargin`).
    pub fn new(
        band: &TriggerBand,
        targets: Vec<Element>,
        on_report: impl FnMut(SegmentId, bool) + 'static,
    ) -> Result<Self, JsValue> {
        let len = targets.len();
        let observed = targets.clone();
        let mut on_report = on_report;

        let closure = Closure::wrap(Box::new(move |entries: Array, _: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                if let Some(pos) = targets.iter().position(|el| *el == target) {
                    let id = SegmentId(u32::try_from(pos).unwrap_or(u32::MAX));
                    on_report(id, entry.is_intersecting());
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&band.root_margin());
        init.set_threshold(&JsValue::from_f64(0.0));

        let observer =
            IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init)?;
        for el in &observed {
            observer.observe(el);
        }

        Ok(Self {
            observer,
            _closure: closure,
            len,
        })
    }

    /// Returns the number of observed elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing is observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Drop for VisibilityTracker {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

impl core::fmt::Debug for VisibilityTracker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VisibilityTracker")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}
