// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Drawable leaves: batched triangle meshes and screen-aligned labels.

use nalgebra::Point3;

use crate::material::MaterialState;
use crate::texture::TextureHandle;

/// A batched triangle mesh with its resolved appearance.
///
/// Buffers are flat: `positions` holds `x, y, z` triples (offset-adjusted
/// f32), `tex_coords` holds `u, v` pairs (may be empty), `indices` holds
/// three entries per triangle and always indexes into this drawable's own
/// vertex buffer. No normals — the host computes them in its smoothing
/// pass.
#[derive(Debug, Clone)]
pub struct MeshDrawable {
    /// Name of the drawable, usually the source polygon id.
    pub name: String,
    /// Semantic tag (`cot_type`) of the geometry this batch came from.
    pub tag: Option<String>,
    /// Debug description, e.g. the source polygon id when requested.
    pub description: Option<String>,
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Texture coordinates (u, v); empty when untextured
    pub tex_coords: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
    pub material: MaterialState,
    pub texture: Option<TextureHandle>,
    /// Back-face culling enabled.
    pub cull_backface: bool,
}

impl MeshDrawable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: None,
            description: None,
            positions: Vec::new(),
            tex_coords: Vec::new(),
            indices: Vec::new(),
            material: MaterialState::default(),
            texture: None,
            cull_backface: true,
        }
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if the drawable carries no vertices
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Calculate bounds (min, max) over the position buffer.
    pub fn bounds(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        if self.is_empty() {
            return None;
        }

        let mut min = Point3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Point3::new(f32::MIN, f32::MIN, f32::MIN);

        self.positions.chunks_exact(3).for_each(|chunk| {
            let (x, y, z) = (chunk[0], chunk[1], chunk[2]);
            min.x = min.x.min(x);
            min.y = min.y.min(y);
            min.z = min.z.min(z);
            max.x = max.x.max(x);
            max.y = max.y.max(y);
            max.z = max.z.max(z);
        });

        Some((min, max))
    }
}

/// A screen-aligned text label, used for per-object id overlays.
#[derive(Debug, Clone)]
pub struct LabelDrawable {
    pub text: String,
    /// Anchor position in the drawable's local frame.
    pub position: Point3<f32>,
    pub character_size: f32,
    /// Billboard the text towards the viewer.
    pub screen_aligned: bool,
    /// Labels render unlit.
    pub lighting: bool,
}

impl LabelDrawable {
    pub fn new(text: impl Into<String>, position: Point3<f32>) -> Self {
        Self {
            text: text.into(),
            position,
            character_size: 2.0,
            screen_aligned: true,
            lighting: false,
        }
    }
}

/// A leaf attached to a group node.
#[derive(Debug, Clone)]
pub enum Drawable {
    Mesh(MeshDrawable),
    Label(LabelDrawable),
}

impl Drawable {
    pub fn as_mesh(&self) -> Option<&MeshDrawable> {
        match self {
            Drawable::Mesh(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_label(&self) -> Option<&LabelDrawable> {
        match self {
            Drawable::Label(l) => Some(l),
            _ => None,
        }
    }
}
