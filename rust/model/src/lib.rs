// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # CityGML city model
//!
//! Data structures for a fully parsed CityGML city model: the tree of
//! semantic city objects, their nested geometries, tessellated polygons and
//! per-theme appearance records.
//!
//! This crate is the *input contract* of the importer. Parsing the XML and
//! tessellating polygon rings happen upstream; everything here is plain,
//! read-only data with accessor methods. Constructors take fully-built
//! values so a parser front end (or a test) can assemble a model directly.

pub mod appearance;
pub mod envelope;
pub mod geometry;
pub mod model;
pub mod object;
pub mod polygon;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use appearance::{SurfaceMaterial, TextureRef};
pub use envelope::Envelope;
pub use geometry::{Geometry, GeometryKind};
pub use model::CityModel;
pub use object::{CityObject, CityObjectType};
pub use polygon::Polygon;
