// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene hierarchy nodes.

use nalgebra::{Matrix4, Vector3};

use crate::drawable::Drawable;
use crate::material::RenderState;

/// A named group holding drawables and child nodes.
#[derive(Debug, Clone, Default)]
pub struct GroupNode {
    pub name: String,
    /// Semantic tag (`cot_type`) of the city object this group represents.
    pub tag: Option<String>,
    /// Render state applied to every drawable in the group, e.g. window
    /// transparency.
    pub render_state: Option<RenderState>,
    pub drawables: Vec<Drawable>,
    pub children: Vec<Node>,
}

impl GroupNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style semantic tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// A transform node applying a matrix to its subtree.
#[derive(Debug, Clone)]
pub struct TransformNode {
    pub name: String,
    pub matrix: Matrix4<f64>,
    pub children: Vec<Node>,
}

impl TransformNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            matrix: Matrix4::identity(),
            children: Vec::new(),
        }
    }

    /// Pure translation transform.
    pub fn translation(name: impl Into<String>, t: Vector3<f64>) -> Self {
        Self {
            name: name.into(),
            matrix: Matrix4::new_translation(&t),
            children: Vec::new(),
        }
    }

    /// Translation component of the matrix.
    #[inline]
    pub fn translation_part(&self) -> Vector3<f64> {
        Vector3::new(
            self.matrix[(0, 3)],
            self.matrix[(1, 3)],
            self.matrix[(2, 3)],
        )
    }
}

/// Reference to an externally authored model file, loaded by the host on
/// demand (proxy substitution).
#[derive(Debug, Clone)]
pub struct ProxyNode {
    pub file_name: String,
}

impl ProxyNode {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

/// A node of the output scene graph.
#[derive(Debug, Clone)]
pub enum Node {
    Group(GroupNode),
    Transform(TransformNode),
    Proxy(ProxyNode),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Group(g) => &g.name,
            Node::Transform(t) => &t.name,
            Node::Proxy(p) => &p.file_name,
        }
    }

    pub fn as_group(&self) -> Option<&GroupNode> {
        match self {
            Node::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_transform(&self) -> Option<&TransformNode> {
        match self {
            Node::Transform(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_proxy(&self) -> Option<&ProxyNode> {
        match self {
            Node::Proxy(p) => Some(p),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Group(g) => &g.children,
            Node::Transform(t) => &t.children,
            Node::Proxy(_) => &[],
        }
    }

    /// Count mesh drawables in this subtree.
    pub fn mesh_drawable_count(&self) -> usize {
        let own = match self {
            Node::Group(g) => g.drawables.iter().filter(|d| d.as_mesh().is_some()).count(),
            _ => 0,
        };
        own + self
            .children()
            .iter()
            .map(Node::mesh_drawable_count)
            .sum::<usize>()
    }
}
