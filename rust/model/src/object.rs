// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Semantic city object tree.

use rustc_hash::FxHashMap;

use crate::envelope::Envelope;
use crate::geometry::Geometry;

/// Semantic type of a city object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CityObjectType {
    Building,
    BuildingPart,
    BuildingInstallation,
    RoofSurface,
    WallSurface,
    GroundSurface,
    ClosureSurface,
    FloorSurface,
    CeilingSurface,
    Window,
    Door,
    Room,
    SolitaryVegetationObject,
    PlantCover,
    CityFurniture,
    Road,
    Railway,
    WaterBody,
    LandUse,
    ReliefFeature,
    GenericCityObject,
}

impl CityObjectType {
    /// CityGML feature name, used to tag output nodes.
    pub fn type_name(&self) -> &'static str {
        match self {
            CityObjectType::Building => "Building",
            CityObjectType::BuildingPart => "BuildingPart",
            CityObjectType::BuildingInstallation => "BuildingInstallation",
            CityObjectType::RoofSurface => "RoofSurface",
            CityObjectType::WallSurface => "WallSurface",
            CityObjectType::GroundSurface => "GroundSurface",
            CityObjectType::ClosureSurface => "ClosureSurface",
            CityObjectType::FloorSurface => "FloorSurface",
            CityObjectType::CeilingSurface => "CeilingSurface",
            CityObjectType::Window => "Window",
            CityObjectType::Door => "Door",
            CityObjectType::Room => "Room",
            CityObjectType::SolitaryVegetationObject => "SolitaryVegetationObject",
            CityObjectType::PlantCover => "PlantCover",
            CityObjectType::CityFurniture => "CityFurniture",
            CityObjectType::Road => "Road",
            CityObjectType::Railway => "Railway",
            CityObjectType::WaterBody => "WaterBody",
            CityObjectType::LandUse => "LandUse",
            CityObjectType::ReliefFeature => "ReliefFeature",
            CityObjectType::GenericCityObject => "GenericCityObject",
        }
    }
}

/// One node of the semantic city object tree.
///
/// A parent owns its children; the tree has no cycles. Attributes are the
/// raw string key/value pairs from the source document (function codes,
/// measured heights, ...).
#[derive(Debug, Clone)]
pub struct CityObject {
    id: String,
    object_type: CityObjectType,
    attributes: FxHashMap<String, String>,
    geometries: Vec<Geometry>,
    children: Vec<CityObject>,
    envelope: Envelope,
}

impl CityObject {
    pub fn new(id: impl Into<String>, object_type: CityObjectType) -> Self {
        Self {
            id: id.into(),
            object_type,
            attributes: FxHashMap::default(),
            geometries: Vec::new(),
            children: Vec::new(),
            envelope: Envelope::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn object_type(&self) -> CityObjectType {
        self.object_type
    }

    /// Raw attribute value, e.g. `attribute("bldg:measuredheight")`.
    #[inline]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    #[inline]
    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    #[inline]
    pub fn children(&self) -> &[CityObject] {
        &self.children
    }

    /// Bounding envelope; may be invalid when the source declared none.
    #[inline]
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn set_envelope(&mut self, envelope: Envelope) {
        self.envelope = envelope;
    }

    pub fn push_geometry(&mut self, geometry: Geometry) {
        self.geometries.push(geometry);
    }

    pub fn push_child(&mut self, child: CityObject) {
        self.children.push(child);
    }

    /// Builder-style attribute set.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Builder-style geometry append.
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometries.push(geometry);
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: CityObject) -> Self {
        self.children.push(child);
        self
    }

    /// Builder-style envelope set.
    pub fn with_envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = envelope;
        self
    }
}
