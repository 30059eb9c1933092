// Copyright 2026 the Scrollfade Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fire-and-forget image preloading.

use scrollfade_core::backend::Preloader;
use web_sys::HtmlImageElement;

/// Warms the browser image cache by assigning the URL to a detached `<img>`.
///
/// No load or error listener is attached: the result is never observed, and
/// the element is dropped immediately. The browser keeps the fetch alive on
/// its own.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImagePreloader;

impl Preloader for ImagePreloader {
    fn preload(&mut self, url: &str) {
        if let Ok(img) = HtmlImageElement::new() {
            img.set_decoding("async");
            img.set_src(url);
        }
    }
}
