// Copyright 2026 the Scrollfade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for scrollfade.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`VisibilityTracker`]: `IntersectionObserver` visibility source
//! - [`DomPresenter`]: DOM layer, tint, and panel writes
//! - [`ImagePreloader`]: fire-and-forget `<img>` preloading
//! - [`ConsoleSink`]: `console.debug` trace output
//!
//! [`start`] wires them into one pipeline per topology found on the page.

#![no_std]

extern crate alloc;

mod console;
mod media;
mod observer;
mod page;
mod preload;
mod presenter;

pub use console::ConsoleSink;
pub use media::prefers_reduced_motion;
pub use observer::VisibilityTracker;
pub use preload::ImagePreloader;
pub use presenter::{DomPresenter, PanelElements};
pub use scrollfade_core::backend::{Preloader, Presenter};

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use scrollfade_core::backend::present;
use scrollfade_core::config::EngineConfig;
use scrollfade_core::controller::CrossfadeController;
use scrollfade_core::error::SetupError;
use scrollfade_core::segment::{SegmentId, SegmentRegistry};
use scrollfade_core::topology::TopologyKind;
use scrollfade_core::trace::{NoopSink, PreloadEvent, SetupEvent, SkippedEvent, TraceSink, Tracer};
use scrollfade_core::visibility::EntryDetector;
use wasm_bindgen::JsValue;

use page::Discovered;

type SharedSink = Rc<RefCell<Box<dyn TraceSink>>>;

/// State of one topology instance, owned by its observer callback.
struct Pipeline {
    kind: TopologyKind,
    registry: SegmentRegistry,
    controller: CrossfadeController,
    detector: EntryDetector,
    preloader: ImagePreloader,
    presenter: DomPresenter,
    sink: SharedSink,
}

impl Pipeline {
    /// Handles one observer report: entry filtering, decision, output.
    fn on_report(&mut self, id: SegmentId, intersecting: bool) {
        let Some(id) = self.detector.report(id, intersecting) else {
            return;
        };
        let Some(segment) = self.registry.get(id) else {
            return;
        };
        let outcome = self.controller.on_segment_entered(segment);

        let sink = Rc::clone(&self.sink);
        let mut sink = sink.borrow_mut();
        let mut tracer = Tracer::new(&mut **sink);
        tracer.outcome(self.kind, id, segment, &outcome, &self.controller);
        self.flush(&mut tracer);
    }

    /// Drains controller changes and writes them to the page.
    fn flush(&mut self, tracer: &mut Tracer<'_>) {
        let changes = self.controller.take_changes();
        if changes.is_empty() {
            return;
        }
        for url in &changes.preloads {
            tracer.preload(&PreloadEvent {
                topology: self.kind,
                image_url: url,
            });
        }
        present(
            &self.controller,
            &changes,
            &mut self.preloader,
            &mut self.presenter,
        );
    }
}

/// A running topology: the shared pipeline and the observer feeding it.
struct Instance {
    kind: TopologyKind,
    _tracker: VisibilityTracker,
    pipeline: Rc<RefCell<Pipeline>>,
}

/// Handle to the running engine.
///
/// Dropping the engine disconnects every observer; the page keeps whatever
/// background was last shown.
pub struct Engine {
    instances: Vec<Instance>,
}

impl core::fmt::Debug for Engine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let kinds: Vec<TopologyKind> = self.instances.iter().map(|i| i.kind).collect();
        f.debug_struct("Engine")
            .field("instances", &kinds)
            .finish()
    }
}

impl Engine {
    /// An engine that does nothing (reduced motion, or nothing to drive).
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            instances: Vec::new(),
        }
    }

    /// Returns `true` if at least one topology is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.instances.is_empty()
    }

    /// Returns the number of running topologies.
    #[must_use]
    pub fn pipeline_count(&self) -> usize {
        self.instances.len()
    }

    /// Returns `true` if a pipeline for `kind` is running.
    #[must_use]
    pub fn runs(&self, kind: TopologyKind) -> bool {
        self.instances.iter().any(|i| i.kind == kind)
    }

    /// Returns the URL currently shown by the `kind` pipeline.
    #[must_use]
    pub fn shown_url(&self, kind: TopologyKind) -> Option<String> {
        let instance = self.instances.iter().find(|i| i.kind == kind)?;
        let pipeline = instance.pipeline.borrow();
        pipeline.controller.last_shown_url().map(String::from)
    }
}

/// Starts the engine with the default configuration and no tracing.
///
/// # Errors
///
/// See [`start_with`].
pub fn start() -> Result<Engine, JsValue> {
    start_with(EngineConfig::default(), Box::new(NoopSink))
}

/// Starts one pipeline per topology found on the page.
///
/// When the reader prefers reduced motion (and `config` respects it) this
/// returns a disabled engine without touching the page. A topology whose
/// hooks are incomplete is skipped and reported to `sink`.
///
/// # Errors
///
/// Returns a JS exception if there is no `window`/`document`, or if an
/// `IntersectionObserver` cannot be created.
pub fn start_with(config: EngineConfig, sink: Box<dyn TraceSink>) -> Result<Engine, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    if !config.engine_enabled(prefers_reduced_motion(&window)) {
        return Ok(Engine::disabled());
    }
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let sink: SharedSink = Rc::new(RefCell::new(sink));

    let found = [
        (TopologyKind::Global, Some(page::discover_global(&document, &config))),
        (
            TopologyKind::Pinned,
            page::discover_pinned(&document, &config),
        ),
    ];

    let mut instances = Vec::new();
    for (kind, result) in found {
        match result {
            None => {}
            Some(Err(reason)) => report_skipped(&sink, kind, reason),
            Some(Ok(discovered)) => instances.push(launch(&config, discovered, &sink)?),
        }
    }
    Ok(Engine { instances })
}

fn report_skipped(sink: &SharedSink, topology: TopologyKind, reason: SetupError) {
    let mut sink = sink.borrow_mut();
    Tracer::new(&mut **sink).skipped(&SkippedEvent { topology, reason });
}

/// Builds the controller for a discovered topology, paints its initial
/// state, and attaches the observer.
fn launch(
    config: &EngineConfig,
    discovered: Discovered,
    sink: &SharedSink,
) -> Result<Instance, JsValue> {
    let Discovered {
        config: topology,
        targets,
        layers,
        overlay,
        panels,
    } = discovered;
    let kind = topology.kind();

    {
        let mut sink = sink.borrow_mut();
        Tracer::new(&mut **sink).setup(&SetupEvent {
            topology: kind,
            source: topology.source(),
            segments: topology.registry().len(),
            panels: topology.panels().len(),
        });
    }

    let controller = topology.controller();
    let registry = topology.into_registry();
    let pipeline = Rc::new(RefCell::new(Pipeline {
        kind,
        detector: EntryDetector::new(registry.len()),
        registry,
        controller,
        preloader: ImagePreloader,
        presenter: DomPresenter::new(layers, overlay, panels, config.hooks),
        sink: Rc::clone(sink),
    }));

    // Initial paint: the seeded slot and the default panel.
    {
        let mut p = pipeline.borrow_mut();
        let sink = Rc::clone(&p.sink);
        let mut sink = sink.borrow_mut();
        let mut tracer = Tracer::new(&mut **sink);
        p.flush(&mut tracer);
    }

    let handler = Rc::clone(&pipeline);
    let tracker = VisibilityTracker::new(&config.trigger_band, targets, move |id, hit| {
        handler.borrow_mut().on_report(id, hit);
    })?;

    Ok(Instance {
        kind,
        _tracker: tracker,
        pipeline,
    })
}
