// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Renderer-neutral scene graph
//!
//! Output data structures of the CityGML importer: a node hierarchy
//! (groups, matrix transforms, proxy references) carrying batched mesh
//! drawables with flat `Vec<f32>` position/texcoord buffers, `Vec<u32>`
//! triangle indices, resolved materials and decoded textures.
//!
//! A rendering host walks this structure and uploads buffers to its own
//! backend; nothing here draws. Normals are deliberately absent — the host
//! runs its normal-smoothing pass over the finished graph.

pub mod drawable;
pub mod material;
pub mod node;
pub mod texture;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, Vector3};

pub use drawable::{Drawable, LabelDrawable, MeshDrawable};
pub use material::{MaterialState, RenderState};
pub use node::{GroupNode, Node, ProxyNode, TransformNode};
pub use texture::{MagFilter, MinFilter, Texture, TextureHandle, WrapMode};
