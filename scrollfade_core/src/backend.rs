// Copyright 2026 the Scrollfade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for host integrations.
//!
//! The engine splits host-specific work into *backend* crates. Each backend
//! provides the following pieces:
//!
//! - **Visibility source** — Reports when a segment's region overlaps the
//!   trigger band (e.g. `IntersectionObserver` on the web). This is not
//!   abstracted by a trait because setup and lifecycle differ across hosts;
//!   reports are funneled through
//!   [`EntryDetector`](crate::visibility::EntryDetector).
//!
//! - **Preloader** — Implements [`Preloader`] to warm an image before it is
//!   revealed.
//!
//! - **Presenter** — Implements [`Presenter`] to write controller state to
//!   the host's layer slots, tint overlay, and panels.
//!
//! # Crate boundaries
//!
//! `scrollfade_core` owns the data model, the controller, and this contract
//! module. Backend crates depend on `scrollfade_core` and provide host glue.

use crate::controller::{Changes, CrossfadeController};

/// Fire-and-forget image fetch.
///
/// Implementations must not block and must not report failure: a failed
/// preload only makes the fade rougher, and the real layer write fetches the
/// image again anyway.
pub trait Preloader {
    /// Starts fetching `url`.
    fn preload(&mut self, url: &str);
}

/// Applies drained controller [`Changes`] to a host presentation tree.
///
/// Both the DOM presenter and test doubles implement this trait.
///
/// # Event loop pseudocode
///
/// ```rust,ignore
/// fn on_visibility(id: SegmentId, intersecting: bool) {
///     let Some(id) = detector.report(id, intersecting) else { return };
///     let Some(segment) = registry.get(id) else { return };
///
///     controller.on_segment_entered(segment);
///     let changes = controller.take_changes();
///
///     for url in &changes.preloads {
///         preloader.preload(url);
///     }
///     presenter.apply(&controller, &changes);
/// }
/// ```
pub trait Presenter {
    /// Writes the layer slots, tint, and panel state named by `changes`,
    /// reading current values from `controller`.
    fn apply(&mut self, controller: &CrossfadeController, changes: &Changes);
}

/// Dispatches preloads, then applies `changes`.
///
/// This is the output order every host must follow.
pub fn present(
    controller: &CrossfadeController,
    changes: &Changes,
    preloader: &mut dyn Preloader,
    presenter: &mut dyn Presenter,
) {
    for url in &changes.preloads {
        preloader.preload(url);
    }
    presenter.apply(controller, changes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::LayerSlot;
    use crate::segment::Segment;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    /// Records every output write in order.
    struct Recorder<'a>(&'a RefCell<Vec<String>>);

    impl Preloader for Recorder<'_> {
        fn preload(&mut self, url: &str) {
            self.0.borrow_mut().push(format!("preload {url}"));
        }
    }

    impl Presenter for Recorder<'_> {
        fn apply(&mut self, controller: &CrossfadeController, changes: &Changes) {
            let mut log = self.0.borrow_mut();
            for &slot in &changes.layers {
                let layer = controller.buffer().layer(slot);
                log.push(format!(
                    "layer {} {} active={}",
                    slot.as_str(),
                    layer.image_url().unwrap_or("-"),
                    layer.is_active()
                ));
            }
            if changes.tint {
                log.push(format!("tint {}", controller.tint().value().unwrap_or("-")));
            }
            if changes.panel
                && let Some(panels) = controller.panels()
            {
                log.push(format!("panel {}", panels.current()));
            }
        }
    }

    #[test]
    fn preload_precedes_layer_writes() {
        let log = RefCell::new(Vec::new());
        let mut preloader = Recorder(&log);
        let mut presenter = Recorder(&log);

        let mut c = CrossfadeController::with_initial_segment(None, &Segment::new("black.jpeg"));
        let changes = c.take_changes();
        present(&c, &changes, &mut preloader, &mut presenter);

        c.on_segment_entered(&Segment::new("white.jpeg").with_tint("rgba(1,2,3,.1)"));
        let changes = c.take_changes();
        present(&c, &changes, &mut preloader, &mut presenter);

        assert_eq!(
            *log.borrow(),
            [
                "preload black.jpeg",
                "layer primary black.jpeg active=true",
                "preload white.jpeg",
                "layer secondary white.jpeg active=true",
                "layer primary black.jpeg active=false",
                "tint rgba(1,2,3,.1)",
            ]
        );
        assert_eq!(c.active_slot(), Some(LayerSlot::Secondary));
    }

    #[test]
    fn no_writes_without_changes() {
        let log = RefCell::new(Vec::new());
        let mut c = CrossfadeController::new(None);
        c.on_segment_entered(&Segment::inert());
        let changes = c.take_changes();
        present(&c, &changes, &mut Recorder(&log), &mut Recorder(&log));
        assert!(log.borrow().is_empty());
    }
}
