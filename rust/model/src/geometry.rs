// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry node: an LOD-tagged collection of polygons with nested children.

use crate::polygon::Polygon;

/// Surface classification of a geometry, used as a drawable tag and for
/// default-material fallbacks downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Unknown,
    Wall,
    Roof,
    Ground,
    Closure,
    Floor,
    Ceiling,
    OuterWall,
    OuterFloor,
    OuterCeiling,
}

impl GeometryKind {
    /// Human-readable name, matching the CityGML surface type spelling.
    pub fn type_name(&self) -> &'static str {
        match self {
            GeometryKind::Unknown => "Unknown",
            GeometryKind::Wall => "Wall",
            GeometryKind::Roof => "Roof",
            GeometryKind::Ground => "Ground",
            GeometryKind::Closure => "Closure",
            GeometryKind::Floor => "Floor",
            GeometryKind::Ceiling => "Ceiling",
            GeometryKind::OuterWall => "OuterWall",
            GeometryKind::OuterFloor => "OuterFloor",
            GeometryKind::OuterCeiling => "OuterCeiling",
        }
    }
}

/// A geometry of a city object: polygons at one LOD plus nested child
/// geometries. Sibling order is preserved from the source document; the
/// importer's batching runs depend on it.
#[derive(Debug, Clone)]
pub struct Geometry {
    kind: GeometryKind,
    lod: u32,
    polygons: Vec<Polygon>,
    children: Vec<Geometry>,
}

impl Geometry {
    pub fn new(kind: GeometryKind, lod: u32) -> Self {
        Self {
            kind,
            lod,
            polygons: Vec::new(),
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    /// Level of detail; higher means more detailed.
    #[inline]
    pub fn lod(&self) -> u32 {
        self.lod
    }

    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    #[inline]
    pub fn children(&self) -> &[Geometry] {
        &self.children
    }

    pub fn push_polygon(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    pub fn push_child(&mut self, child: Geometry) {
        self.children.push(child);
    }

    /// Builder-style polygon append.
    pub fn with_polygon(mut self, polygon: Polygon) -> Self {
        self.polygons.push(polygon);
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: Geometry) -> Self {
        self.children.push(child);
        self
    }
}
