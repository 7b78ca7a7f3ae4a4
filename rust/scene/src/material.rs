// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Material and render-state records attached to drawables and groups.

/// Fixed-function style material parameters for one drawable.
///
/// Colors are RGBA. `shininess` is the specular exponent (0–128 range, as
/// hosts expect), not the normalized CityGML scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialState {
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub emission: [f32; 4],
    pub ambient: [f32; 4],
    pub shininess: f32,
    pub transparency: f32,
    /// Lighting enabled for this drawable.
    pub lighting: bool,
}

impl Default for MaterialState {
    fn default() -> Self {
        // Fixed-function pipeline defaults
        Self {
            diffuse: [0.8, 0.8, 0.8, 1.0],
            specular: [0.0, 0.0, 0.0, 1.0],
            emission: [0.0, 0.0, 0.0, 1.0],
            ambient: [0.2, 0.2, 0.2, 1.0],
            shininess: 0.0,
            transparency: 0.0,
            lighting: true,
        }
    }
}

impl MaterialState {
    /// Flat diffuse color, everything else at defaults.
    pub fn from_diffuse(diffuse: [f32; 4]) -> Self {
        Self {
            diffuse,
            ..Self::default()
        }
    }
}

/// Render state applied to a group of drawables (blending, depth, bin).
///
/// The importer uses this for window surfaces, which must draw after opaque
/// geometry without writing depth.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    /// Constant-alpha blending factor, `None` for opaque.
    pub blend_constant_alpha: Option<f32>,
    pub depth_write: bool,
    /// Sort into the transparent render bin after opaque geometry.
    pub transparent_bin: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            blend_constant_alpha: None,
            depth_write: true,
            transparent_bin: false,
        }
    }
}

impl RenderState {
    /// The semi-transparent state for window surfaces: constant-alpha
    /// blending at 0.4, depth writes off, transparent bin.
    pub fn window_transparency() -> Self {
        Self {
            blend_constant_alpha: Some(0.4),
            depth_write: false,
            transparent_bin: true,
        }
    }
}
