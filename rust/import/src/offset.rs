// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Global offset resolution and ground-point heuristics.
//!
//! Georeferenced models carry coordinates in the millions of meters; all
//! vertex data is rebased to a model-local frame and the offset is restored
//! as a translation on the root node.

use citygml_scene_model::{CityModel, CityObject, Geometry, Point3, Vector3};

/// Resolve the global offset for a model.
///
/// Preference order: the model envelope's lower bound, then the first root
/// object's envelope, then the first vertex of the first polygon found under
/// a root. The vertex fallback scans depth-first past polygon-less
/// geometries instead of stopping at each root's first geometry, so a model
/// whose leading geometry is empty still gets a vertex-derived offset. A
/// model with no envelope and no geometry gets a zero offset.
pub fn compute_offset(model: &CityModel) -> Vector3<f64> {
    if model.envelope().has_valid_bounds() {
        return model.envelope().lower_bound().coords;
    }

    for object in model.root_objects() {
        if object.envelope().has_valid_bounds() {
            return object.envelope().lower_bound().coords;
        }
        if let Some(vertex) = first_vertex(object) {
            return vertex.coords;
        }
    }

    Vector3::zeros()
}

fn first_vertex(object: &CityObject) -> Option<Point3<f64>> {
    for geometry in object.geometries() {
        if let Some(vertex) = first_geometry_vertex(geometry) {
            return Some(vertex);
        }
    }
    for child in object.children() {
        if let Some(vertex) = first_vertex(child) {
            return Some(vertex);
        }
    }
    None
}

fn first_geometry_vertex(geometry: &Geometry) -> Option<Point3<f64>> {
    for polygon in geometry.polygons() {
        if let Some(vertex) = polygon.vertices().first() {
            return Some(*vertex);
        }
    }
    for child in geometry.children() {
        if let Some(vertex) = first_geometry_vertex(child) {
            return Some(vertex);
        }
    }
    None
}

/// Ground anchor and facade direction of an object, used to place proxy
/// models.
///
/// Scans the object's own geometries and its direct children's, recursing
/// through geometry subtrees, and keeps the geometry containing the lowest
/// vertex. The anchor is the mean of that geometry's per-polygon vertex
/// centroids with z forced to the overall minimum; the direction is the
/// first edge of its first polygon with at least two vertices. Returns
/// `None` when no polygon with indices exists.
pub(crate) fn center_and_direction(object: &CityObject) -> Option<(Point3<f64>, Vector3<f64>)> {
    let mut min_z = f64::INFINITY;
    let mut lowest: Option<&Geometry> = None;

    for geometry in object.geometries() {
        scan_lowest(geometry, &mut min_z, &mut lowest);
    }
    for child in object.children() {
        for geometry in child.geometries() {
            scan_lowest(geometry, &mut min_z, &mut lowest);
        }
    }

    let geometry = lowest?;

    let mut direction = Vector3::new(1.0, 0.0, 0.0);
    for polygon in geometry.polygons() {
        if polygon.vertices().len() >= 2 {
            direction = polygon.vertices()[1] - polygon.vertices()[0];
            break;
        }
    }

    let mut sum = Vector3::zeros();
    let mut counted = 0usize;
    for polygon in geometry.polygons() {
        if polygon.indices().is_empty() || polygon.vertices().is_empty() {
            continue;
        }
        let mut centroid = Vector3::zeros();
        for v in polygon.vertices() {
            centroid += v.coords;
        }
        sum += centroid / polygon.vertices().len() as f64;
        counted += 1;
    }
    if counted == 0 {
        return None;
    }

    let mut position = Point3::from(sum / counted as f64);
    position.z = min_z;
    Some((position, direction))
}

/// Track the geometry holding the lowest vertex seen so far.
fn scan_lowest<'a>(geometry: &'a Geometry, min_z: &mut f64, lowest: &mut Option<&'a Geometry>) {
    for polygon in geometry.polygons() {
        if polygon.indices().is_empty() {
            continue;
        }
        for v in polygon.vertices() {
            if v.z < *min_z {
                *min_z = v.z;
                *lowest = Some(geometry);
            }
        }
    }
    for child in geometry.children() {
        scan_lowest(child, min_z, lowest);
    }
}
