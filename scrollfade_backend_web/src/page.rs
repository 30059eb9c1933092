// Copyright 2026 the Scrollfade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page discovery.
//!
//! Reads both topologies' hooks from the document once at startup and turns
//! them into a [`TopologyConfig`] plus the elements the pipeline observes and
//! writes. Missing hooks surface as a [`SetupError`]; malformed selectors are
//! treated as matching nothing.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use scrollfade_core::config::{EngineConfig, Hooks};
use scrollfade_core::error::SetupError;
use scrollfade_core::segment::Segment;
use scrollfade_core::topology::{MarkerSource, PanelSpec, Surfaces, TopologyConfig};
use scrollfade_core::visibility::min_height;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlElement, NodeList};

use crate::presenter::PanelElements;

/// One resolved topology with its DOM hooks.
pub(crate) struct Discovered {
    pub(crate) config: TopologyConfig,
    /// Element observed for each segment, indexed by `SegmentId`.
    pub(crate) targets: Vec<Element>,
    pub(crate) layers: [HtmlElement; 2],
    pub(crate) overlay: HtmlElement,
    pub(crate) panels: Option<PanelElements>,
}

/// Returns the elements matching `selector` under `root`, in document order.
fn select_all(root: &impl ParentNodeExt, selector: &str) -> Vec<Element> {
    let Ok(list) = root.select_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn select_html(root: &impl ParentNodeExt, selector: &str) -> Option<HtmlElement> {
    root.select(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// `querySelector`/`querySelectorAll` over both `Document` and `Element`.
trait ParentNodeExt {
    fn select(&self, selector: &str) -> Result<Option<Element>, JsValue>;
    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue>;
}

impl ParentNodeExt for Document {
    fn select(&self, selector: &str) -> Result<Option<Element>, JsValue> {
        self.query_selector(selector)
    }

    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue> {
        self.query_selector_all(selector)
    }
}

impl ParentNodeExt for Element {
    fn select(&self, selector: &str) -> Result<Option<Element>, JsValue> {
        self.query_selector(selector)
    }

    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue> {
        self.query_selector_all(selector)
    }
}

fn non_empty_attr(el: &Element, name: &str) -> Option<String> {
    el.get_attribute(name).filter(|v| !v.trim().is_empty())
}

/// Builds a segment from a marker element's attributes.
fn read_marker(el: &Element, hooks: &Hooks) -> Segment {
    let mut segment = match non_empty_attr(el, hooks.image_attr) {
        Some(url) => Segment::new(url),
        None => Segment::inert(),
    };
    if let Some(tint) = non_empty_attr(el, hooks.tint_attr) {
        segment = segment.with_tint(tint);
    }
    if let Some(index) = non_empty_attr(el, hooks.index_attr) {
        segment = segment.with_index(index.as_str());
    }
    segment
}

fn read_panel(el: &Element, hooks: &Hooks) -> PanelSpec {
    PanelSpec {
        index: non_empty_attr(el, hooks.index_attr).map(|i| i.as_str().into()),
        image_url: non_empty_attr(el, hooks.image_attr),
    }
}

fn layer_pair(root: &impl ParentNodeExt, selectors: [&str; 2]) -> Option<[HtmlElement; 2]> {
    Some([select_html(root, selectors[0])?, select_html(root, selectors[1])?])
}

fn surfaces(layers: Option<&[HtmlElement; 2]>, overlay: Option<&HtmlElement>) -> Surfaces {
    Surfaces {
        layers: if layers.is_some() { 2 } else { 0 },
        overlay: overlay.is_some(),
    }
}

/// Gives every collapsed observed element the configured dwell height.
fn enforce_min_height(targets: &[Element], min_px: f64) {
    for el in targets {
        let Some(html) = el.dyn_ref::<HtmlElement>() else {
            continue;
        };
        if let Some(h) = min_height(f64::from(html.offset_height()), min_px) {
            let _ = html.style().set_property("min-height", &format!("{h}px"));
        }
    }
}

/// Pairs each mapped section segment with the element it was read from.
///
/// Positions in `mapped` index into `elements`; out-of-range positions are
/// dropped together with their segment, so both outputs stay aligned.
fn align_sections<E: Clone>(
    elements: &[E],
    mapped: Vec<(usize, Segment)>,
) -> (Vec<E>, Vec<Segment>) {
    mapped
        .into_iter()
        .filter_map(|(pos, segment)| Some((elements.get(pos)?.clone(), segment)))
        .unzip()
}

/// Resolves the global topology.
pub(crate) fn discover_global(
    document: &Document,
    config: &EngineConfig,
) -> Result<Discovered, SetupError> {
    let sel = &config.global;
    let layers = layer_pair(document, sel.layers);
    let overlay = select_html(document, sel.overlay);

    let marker_els = select_all(document, sel.markers);
    let markers: Vec<Segment> = marker_els
        .iter()
        .map(|el| read_marker(el, &config.hooks))
        .collect();

    let (section_els, sections) = if markers.is_empty() {
        let all = select_all(document, sel.sections);
        let ids: Vec<String> = all.iter().map(Element::id).collect();
        let mapped = config
            .section_mapping
            .segments_for(ids.iter().map(String::as_str));
        align_sections(&all, mapped)
    } else {
        (Vec::new(), Vec::new())
    };

    let config_out = TopologyConfig::global(
        markers,
        sections,
        surfaces(layers.as_ref(), overlay.as_ref()),
    )?;
    let targets = match config_out.source() {
        MarkerSource::Sections => section_els,
        MarkerSource::Markers | MarkerSource::Panels => marker_els,
    };
    let (Some(layers), Some(overlay)) = (layers, overlay) else {
        return Err(SetupError::MissingLayers);
    };
    enforce_min_height(&targets, config.min_marker_height_px);

    Ok(Discovered {
        config: config_out,
        targets,
        layers,
        overlay,
        panels: None,
    })
}

/// Resolves the pinned topology.
///
/// Returns `None` if the page has no pinned container.
pub(crate) fn discover_pinned(
    document: &Document,
    config: &EngineConfig,
) -> Option<Result<Discovered, SetupError>> {
    let sel = &config.pinned;
    let container = document.select(sel.container).ok().flatten()?;
    Some(discover_in_container(container, config))
}

fn discover_in_container(
    container: Element,
    config: &EngineConfig,
) -> Result<Discovered, SetupError> {
    let sel = &config.pinned;
    let hooks = &config.hooks;
    let layers = layer_pair(&container, sel.layers);
    let overlay = select_html(&container, sel.overlay);

    let marker_els = select_all(&container, sel.markers);
    let markers: Vec<Segment> = marker_els.iter().map(|el| read_marker(el, hooks)).collect();
    let panel_els = select_all(&container, sel.panels);
    let panel_specs: Vec<PanelSpec> = panel_els.iter().map(|el| read_panel(el, hooks)).collect();

    let config_out = TopologyConfig::pinned(
        markers,
        &panel_specs,
        config.pinned_defaults,
        surfaces(layers.as_ref(), overlay.as_ref()),
    )?;
    let targets = match config_out.source() {
        MarkerSource::Panels => panel_els.clone(),
        MarkerSource::Markers | MarkerSource::Sections => marker_els,
    };
    let (Some(layers), Some(overlay)) = (layers, overlay) else {
        return Err(SetupError::MissingLayers);
    };
    enforce_min_height(&targets, config.min_marker_height_px);

    let panels = (!panel_els.is_empty()).then(|| PanelElements {
        container,
        panels: config_out
            .panels()
            .iter()
            .cloned()
            .zip(panel_els)
            .collect(),
    });

    Ok(Discovered {
        config: config_out,
        targets,
        layers,
        overlay,
        panels,
    })
}
