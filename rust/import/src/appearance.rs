// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Appearance resolution: texture cache and material mapping.
//!
//! The texture cache is scoped to one import call and guarantees each
//! distinct URL is located and decoded at most once — including failed
//! attempts, which are cached as explicit failure entries so a broken
//! reference does not hit the filesystem once per polygon.

use std::sync::Arc;

use citygml_scene_graph::{MaterialState, Texture, TextureHandle};
use citygml_scene_model::{SurfaceMaterial, TextureRef};
use rustc_hash::FxHashMap;
use tracing::{info, warn};

use crate::reader::FileLocator;

/// Outcome of one resolution attempt, remembered for the rest of the import.
#[derive(Debug, Clone)]
enum CacheEntry {
    Resolved(TextureHandle),
    Failed,
}

/// Session-scoped texture cache keyed by texture URL.
#[derive(Debug, Default)]
pub struct TextureCache {
    entries: FxHashMap<String, CacheEntry>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a texture reference to a shared handle.
    ///
    /// Cache hits return the same handle instance (`Arc::ptr_eq` holds).
    /// A URL that cannot be located or decoded logs a warning, is cached as
    /// failed, and resolves to `None` — the polygon renders untextured.
    pub fn resolve(&mut self, texture: &TextureRef, locator: &FileLocator) -> Option<TextureHandle> {
        let url = texture.url();

        if let Some(entry) = self.entries.get(url) {
            return match entry {
                CacheEntry::Resolved(handle) => Some(Arc::clone(handle)),
                CacheEntry::Failed => None,
            };
        }

        let Some(path) = locator.locate(url) else {
            warn!("texture file {url} not found");
            self.entries.insert(url.to_string(), CacheEntry::Failed);
            return None;
        };

        info!("loading texture {}", path.display());
        match image::open(&path) {
            Ok(img) => {
                let handle: TextureHandle = Arc::new(Texture::with_default_sampling(url, img));
                self.entries
                    .insert(url.to_string(), CacheEntry::Resolved(Arc::clone(&handle)));
                Some(handle)
            }
            Err(err) => {
                warn!("failed to read texture {}: {err}", path.display());
                self.entries.insert(url.to_string(), CacheEntry::Failed);
                None
            }
        }
    }

    /// Number of cached entries (resolved and failed).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if the URL was attempted and failed.
    pub fn is_failed(&self, url: &str) -> bool {
        matches!(self.entries.get(url), Some(CacheEntry::Failed))
    }

    /// True if the URL resolved to a texture.
    pub fn is_resolved(&self, url: &str) -> bool {
        matches!(self.entries.get(url), Some(CacheEntry::Resolved(_)))
    }
}

/// Map a CityGML surface material record to renderer material parameters.
///
/// Shininess is rescaled to the 0–128 specular exponent range; the ambient
/// intensity scalar is replicated across RGB.
pub fn material_state(material: &SurfaceMaterial) -> MaterialState {
    let [dr, dg, db] = material.diffuse;
    let [sr, sg, sb] = material.specular;
    let [er, eg, eb] = material.emissive;
    let a = material.ambient_intensity;
    MaterialState {
        diffuse: [dr, dg, db, 0.0],
        specular: [sr, sg, sb, 0.0],
        emission: [er, eg, eb, 0.0],
        ambient: [a, a, a, 1.0],
        shininess: 128.0 * material.shininess,
        transparency: material.transparency,
        lighting: true,
    }
}
