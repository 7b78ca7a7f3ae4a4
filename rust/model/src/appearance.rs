// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-theme appearance records attached to polygons.

/// Reference to a texture image, as declared in a CityGML appearance.
///
/// The URL is relative to the model file unless absolute; resolving it
/// against the import search paths is the importer's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureRef {
    url: String,
}

impl TextureRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Image URL as written in the source file.
    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// X3D-style surface material record from a CityGML appearance.
///
/// Colors are linear RGB in `[0, 1]`; `shininess`, `ambient_intensity` and
/// `transparency` are scalars in `[0, 1]` per the CityGML schema.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMaterial {
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub emissive: [f32; 3],
    pub shininess: f32,
    pub ambient_intensity: f32,
    pub transparency: f32,
}

impl Default for SurfaceMaterial {
    fn default() -> Self {
        // Schema defaults for an X3D material
        Self {
            diffuse: [0.8, 0.8, 0.8],
            specular: [1.0, 1.0, 1.0],
            emissive: [0.0, 0.0, 0.0],
            shininess: 0.2,
            ambient_intensity: 0.2,
            transparency: 0.0,
        }
    }
}
