// Copyright 2026 the Scrollfade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Content segments and the ordered registry that owns them.

use alloc::string::{String, ToString as _};
use alloc::vec::Vec;
use core::fmt;

/// Ordinal label of a segment or panel.
///
/// Pages may author indices as numbers or free-form strings; both are kept in
/// their textual form and compared exactly. The label is only used for panel
/// matching and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentIndex(String);

impl SegmentIndex {
    /// Creates an index from its textual form.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the textual form of the index.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u32> for SegmentIndex {
    fn from(n: u32) -> Self {
        Self(n.to_string())
    }
}

impl From<&str> for SegmentIndex {
    fn from(s: &str) -> Self {
        Self(String::from(s))
    }
}

impl fmt::Display for SegmentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A region of the page tied to one target background image.
///
/// Segments are immutable once built. A segment without an image is inert: it
/// is observed like any other but never changes what the controller shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Segment {
    index: Option<SegmentIndex>,
    image_url: Option<String>,
    tint: Option<String>,
}

impl Segment {
    /// Creates a segment showing `image_url`.
    ///
    /// An empty URL produces an inert segment.
    #[must_use]
    pub fn new(image_url: impl Into<String>) -> Self {
        let url: String = image_url.into();
        Self {
            index: None,
            image_url: (!url.is_empty()).then_some(url),
            tint: None,
        }
    }

    /// Creates a segment with no image.
    #[must_use]
    pub fn inert() -> Self {
        Self::default()
    }

    /// Attaches a tint color value. Empty values are dropped.
    #[must_use]
    pub fn with_tint(mut self, tint: impl Into<String>) -> Self {
        let tint: String = tint.into();
        self.tint = (!tint.is_empty()).then_some(tint);
        self
    }

    /// Attaches an ordinal index.
    #[must_use]
    pub fn with_index(mut self, index: impl Into<SegmentIndex>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Returns the image URL, if any.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Returns the tint color value, if any.
    #[must_use]
    pub fn tint(&self) -> Option<&str> {
        self.tint.as_deref()
    }

    /// Returns the ordinal index, if any.
    #[must_use]
    pub fn index(&self) -> Option<&SegmentIndex> {
        self.index.as_ref()
    }

    /// Returns `true` if the segment never triggers a swap.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.image_url.is_none()
    }
}

/// Handle to a segment in a [`SegmentRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(pub u32);

impl SegmentId {
    /// Returns the slot position of this handle.
    #[must_use]
    pub const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// The ordered set of segments for one topology instance.
///
/// Order is document order; [`SegmentId`]s are assigned sequentially and are
/// never reused.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SegmentRegistry {
    segments: Vec<Segment>,
}

impl SegmentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a segment and returns its handle.
    pub fn push(&mut self, segment: Segment) -> SegmentId {
        let id = u32::try_from(self.segments.len()).unwrap_or(u32::MAX);
        self.segments.push(segment);
        SegmentId(id)
    }

    /// Returns the segment behind `id`, if it exists.
    #[must_use]
    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(id.idx())
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the registry holds no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the first segment that carries an image.
    #[must_use]
    pub fn first_visual(&self) -> Option<&Segment> {
        self.segments.iter().find(|s| !s.is_inert())
    }

    /// Iterates over `(id, segment)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, &Segment)> + '_ {
        self.segments
            .iter()
            .enumerate()
            .map(|(i, s)| (SegmentId(u32::try_from(i).unwrap_or(u32::MAX)), s))
    }
}

impl FromIterator<Segment> for SegmentRegistry {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_url_is_inert() {
        assert!(Segment::new("").is_inert());
        assert!(Segment::inert().is_inert());
        assert!(!Segment::new("a.jpg").is_inert());
    }

    #[test]
    fn empty_tint_is_dropped() {
        let s = Segment::new("a.jpg").with_tint("");
        assert_eq!(s.tint(), None);
        let s = Segment::new("a.jpg").with_tint("rgba(0,0,0,.2)");
        assert_eq!(s.tint(), Some("rgba(0,0,0,.2)"));
    }

    #[test]
    fn numeric_and_string_indices_compare_textually() {
        assert_eq!(SegmentIndex::from(3_u32), SegmentIndex::from("3"));
        assert_ne!(SegmentIndex::from(3_u32), SegmentIndex::from("03"));
    }

    #[test]
    fn registry_assigns_sequential_ids() {
        let mut reg = SegmentRegistry::new();
        let a = reg.push(Segment::new("a.jpg"));
        let b = reg.push(Segment::inert());
        assert_eq!(a, SegmentId(0));
        assert_eq!(b, SegmentId(1));
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get(a).and_then(Segment::image_url), Some("a.jpg"));
        assert!(reg.get(SegmentId(7)).is_none());
    }

    #[test]
    fn iter_pairs_ids_with_segments_in_order() {
        let reg: SegmentRegistry = [Segment::new("a.jpg"), Segment::inert()]
            .into_iter()
            .collect();
        let ids: Vec<(SegmentId, bool)> = reg.iter().map(|(id, s)| (id, s.is_inert())).collect();
        assert_eq!(ids, [(SegmentId(0), false), (SegmentId(1), true)]);
    }

    #[test]
    fn first_visual_skips_inert_segments() {
        let reg: SegmentRegistry = [Segment::inert(), Segment::new("b.jpg")]
            .into_iter()
            .collect();
        assert_eq!(reg.first_visual().and_then(Segment::image_url), Some("b.jpg"));
    }
}
