// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Growable per-batch buffers shared by the geometry batcher and the
//! single-object aggregator.

use citygml_scene_graph::{MeshDrawable, TextureHandle};
use citygml_scene_model::Polygon;
use nalgebra::Vector3;

/// Accumulates vertices, texture coordinates and rebased triangle indices
/// for one batch key (texture URL or coarse material bucket).
///
/// Created lazily when a key is first seen during one traversal scope and
/// consumed into exactly one drawable at the end of it. Indices are always
/// relative to this accumulator's own vertex buffer.
#[derive(Debug, Default)]
pub(crate) struct MaterialArrays {
    pub positions: Vec<f32>,
    pub tex_coords: Vec<f32>,
    pub indices: Vec<u32>,
    pub texture: Option<TextureHandle>,
}

impl MaterialArrays {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Append one polygon: indices rebased by the running vertex count,
    /// vertices shifted by the global offset, texture coordinates for the
    /// active theme when requested and present.
    ///
    /// The shift is subtracted in f64 *before* narrowing to f32; large
    /// georeferenced coordinates would otherwise lose meters of precision.
    pub fn append_polygon(
        &mut self,
        polygon: &Polygon,
        theme: &str,
        offset: &Vector3<f64>,
        with_tex_coords: bool,
    ) {
        let base = self.vertex_count() as u32;

        self.indices.reserve(polygon.indices().len());
        self.indices
            .extend(polygon.indices().iter().map(|&i| i + base));

        self.positions.reserve(polygon.vertices().len() * 3);
        for v in polygon.vertices() {
            self.positions.push((v.x - offset.x) as f32);
            self.positions.push((v.y - offset.y) as f32);
            self.positions.push((v.z - offset.z) as f32);
        }

        if with_tex_coords {
            if let Some(coords) = polygon.tex_coords_for(theme) {
                self.tex_coords.reserve(coords.len() * 2);
                for uv in coords {
                    self.tex_coords.push(uv[0]);
                    self.tex_coords.push(uv[1]);
                }
            }
        }
    }

    /// Consume the buffers into a drawable. The accumulator must not be
    /// reused afterwards.
    pub fn into_drawable(self, name: impl Into<String>) -> MeshDrawable {
        let mut drawable = MeshDrawable::new(name);
        drawable.positions = self.positions;
        drawable.tex_coords = self.tex_coords;
        drawable.indices = self.indices;
        drawable.texture = self.texture;
        drawable
    }
}
