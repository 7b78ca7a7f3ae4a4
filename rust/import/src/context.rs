// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-import state threaded through the recursive walks.

use citygml_scene_graph::TextureHandle;
use citygml_scene_model::TextureRef;

use crate::appearance::TextureCache;
use crate::reader::FileLocator;
use crate::settings::ImportSettings;

/// Mutable state for one import call: configuration, the resolved theme and
/// the texture cache. Never shared between concurrent imports.
pub(crate) struct ImportContext<'a> {
    pub settings: &'a ImportSettings,
    theme: String,
    pub cache: TextureCache,
    pub locator: &'a FileLocator,
}

impl<'a> ImportContext<'a> {
    pub fn new(settings: &'a ImportSettings, theme: String, locator: &'a FileLocator) -> Self {
        Self {
            settings,
            theme,
            cache: TextureCache::new(),
            locator,
        }
    }

    /// Active appearance theme for this import.
    #[inline]
    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn resolve_texture(&mut self, texture: &TextureRef) -> Option<TextureHandle> {
        self.cache.resolve(texture, self.locator)
    }
}
