// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tessellated polygon with per-theme appearance lookups.

use nalgebra::Point3;
use rustc_hash::FxHashMap;

use crate::appearance::{SurfaceMaterial, TextureRef};

/// One tessellated polygon of a geometry.
///
/// Vertices are f64 world coordinates; `indices` triangulate them (produced
/// by the upstream tessellator, three entries per triangle). An empty index
/// list marks a degenerate polygon that importers skip.
///
/// Texture, material and texture-coordinate lookups are keyed by appearance
/// theme; a polygon may carry any subset of them for any theme.
#[derive(Debug, Clone, Default)]
pub struct Polygon {
    id: String,
    vertices: Vec<Point3<f64>>,
    indices: Vec<u32>,
    textures: FxHashMap<String, TextureRef>,
    materials: FxHashMap<String, SurfaceMaterial>,
    tex_coords: FxHashMap<String, Vec<[f32; 2]>>,
}

impl Polygon {
    pub fn new(id: impl Into<String>, vertices: Vec<Point3<f64>>, indices: Vec<u32>) -> Self {
        Self {
            id: id.into(),
            vertices,
            indices,
            textures: FxHashMap::default(),
            materials: FxHashMap::default(),
            tex_coords: FxHashMap::default(),
        }
    }

    /// Stable identifier from the source file.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// Triangle indices into [`vertices`](Self::vertices). Empty for a
    /// degenerate polygon.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Texture reference for the given theme, if any.
    #[inline]
    pub fn texture_for(&self, theme: &str) -> Option<&TextureRef> {
        self.textures.get(theme)
    }

    /// Material record for the given theme, if any.
    #[inline]
    pub fn material_for(&self, theme: &str) -> Option<&SurfaceMaterial> {
        self.materials.get(theme)
    }

    /// Texture coordinates for the given theme, parallel to the vertex list.
    #[inline]
    pub fn tex_coords_for(&self, theme: &str) -> Option<&[[f32; 2]]> {
        self.tex_coords.get(theme).map(|c| c.as_slice())
    }

    /// Attach a texture reference for a theme (parser front-end API).
    pub fn set_texture(&mut self, theme: impl Into<String>, texture: TextureRef) {
        self.textures.insert(theme.into(), texture);
    }

    /// Attach a material record for a theme (parser front-end API).
    pub fn set_material(&mut self, theme: impl Into<String>, material: SurfaceMaterial) {
        self.materials.insert(theme.into(), material);
    }

    /// Attach texture coordinates for a theme (parser front-end API).
    pub fn set_tex_coords(&mut self, theme: impl Into<String>, coords: Vec<[f32; 2]>) {
        self.tex_coords.insert(theme.into(), coords);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Polygon {
        Polygon::new(
            "poly-1",
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
    }

    #[test]
    fn test_theme_lookups_miss_by_default() {
        let p = quad();
        assert!(p.texture_for("summer").is_none());
        assert!(p.material_for("summer").is_none());
        assert!(p.tex_coords_for("summer").is_none());
    }

    #[test]
    fn test_theme_lookups_are_per_theme() {
        let mut p = quad();
        p.set_texture("summer", TextureRef::new("facade.png"));
        p.set_tex_coords("summer", vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);

        assert_eq!(p.texture_for("summer").map(TextureRef::url), Some("facade.png"));
        assert!(p.texture_for("winter").is_none());
        assert_eq!(p.tex_coords_for("summer").map(<[_]>::len), Some(4));
    }
}
