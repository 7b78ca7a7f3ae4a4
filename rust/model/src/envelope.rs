// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned bounding envelope in f64 precision.
//!
//! CityGML models carry georeferenced coordinates (UTM meters, often
//! millions of units from the origin), so bounds are kept in f64 and the
//! importer derives its global offset from the lower bound.

use nalgebra::Point3;

/// Axis-aligned bounding volume of a model or city object.
///
/// An envelope is invalid until at least one point has been added; parsed
/// models may legitimately carry objects without one.
#[derive(Debug, Clone)]
pub struct Envelope {
    min_x: f64,
    min_y: f64,
    min_z: f64,
    max_x: f64,
    max_y: f64,
    max_z: f64,
    sample_count: usize,
}

impl Envelope {
    /// Create a new envelope initialized to the invalid state.
    pub fn new() -> Self {
        Self {
            min_x: f64::MAX,
            min_y: f64::MAX,
            min_z: f64::MAX,
            max_x: f64::MIN,
            max_y: f64::MIN,
            max_z: f64::MIN,
            sample_count: 0,
        }
    }

    /// Create an envelope from explicit lower and upper corners.
    pub fn from_bounds(lower: Point3<f64>, upper: Point3<f64>) -> Self {
        let mut env = Self::new();
        env.expand(&lower);
        env.expand(&upper);
        env
    }

    /// Check if the envelope has valid bounds (at least one point added).
    #[inline]
    pub fn has_valid_bounds(&self) -> bool {
        self.sample_count > 0
    }

    /// Expand the envelope to include a point.
    #[inline]
    pub fn expand(&mut self, p: &Point3<f64>) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.min_z = self.min_z.min(p.z);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
        self.max_z = self.max_z.max(p.z);
        self.sample_count += 1;
    }

    /// Lower corner. Only meaningful when [`has_valid_bounds`](Self::has_valid_bounds) is true.
    #[inline]
    pub fn lower_bound(&self) -> Point3<f64> {
        Point3::new(self.min_x, self.min_y, self.min_z)
    }

    /// Upper corner. Only meaningful when [`has_valid_bounds`](Self::has_valid_bounds) is true.
    #[inline]
    pub fn upper_bound(&self) -> Point3<f64> {
        Point3::new(self.max_x, self.max_y, self.max_z)
    }

    /// Center of the bounding box, or the origin for an invalid envelope.
    #[inline]
    pub fn centroid(&self) -> Point3<f64> {
        if !self.has_valid_bounds() {
            return Point3::origin();
        }
        Point3::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new()
    }
}
