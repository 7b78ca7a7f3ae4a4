// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Single-object aggregation: merge the whole city into coarse material
//! buckets, minimizing drawable count at the cost of semantic granularity.
//!
//! Textured polygons bucket by texture URL; untextured ones fall back to a
//! "wall" or "roof" bucket chosen by the owning object's semantic type.
//! Untextured polygons of other types have no coarse bucket and are dropped.

use citygml_scene_graph::{Drawable, GroupNode, MaterialState, Node};
use citygml_scene_model::{CityObject, CityObjectType, Geometry, TextureRef};
use nalgebra::Vector3;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

use crate::arrays::MaterialArrays;
use crate::builder::highest_lod_for_object;
use crate::context::ImportContext;
use crate::proxy;

pub(crate) const WALL_BUCKET: &str = "wall";
pub(crate) const ROOF_BUCKET: &str = "roof";

/// Per-traversal bucket map, pre-seeded with the two untextured fallback
/// buckets. Creation order is kept so output is deterministic.
pub(crate) struct BucketMap {
    buckets: FxHashMap<String, MaterialArrays>,
    order: Vec<String>,
}

impl BucketMap {
    pub fn new() -> Self {
        let mut map = Self {
            buckets: FxHashMap::default(),
            order: Vec::new(),
        };
        map.seed(WALL_BUCKET);
        map.seed(ROOF_BUCKET);
        map
    }

    fn seed(&mut self, key: &str) {
        self.order.push(key.to_string());
        self.buckets.insert(key.to_string(), MaterialArrays::new());
    }

    /// Bucket for a textured polygon, created lazily; the texture is
    /// resolved exactly once per URL, when the bucket is created. A failed
    /// resolve leaves the bucket untextured but still accumulating.
    fn bucket_for_texture(
        &mut self,
        texture: &TextureRef,
        ctx: &mut ImportContext<'_>,
    ) -> &mut MaterialArrays {
        match self.buckets.entry(texture.url().to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.order.push(texture.url().to_string());
                let mut arrays = MaterialArrays::new();
                arrays.texture = ctx.resolve_texture(texture);
                entry.insert(arrays)
            }
        }
    }

    /// Fallback bucket for an untextured polygon, chosen by the owning
    /// object's semantic type. `None` means the polygon is dropped.
    fn fallback_bucket(&mut self, object_type: CityObjectType) -> Option<&mut MaterialArrays> {
        let key = match object_type {
            CityObjectType::RoofSurface => ROOF_BUCKET,
            CityObjectType::Building
            | CityObjectType::BuildingPart
            | CityObjectType::WallSurface => WALL_BUCKET,
            _ => return None,
        };
        self.buckets.get_mut(key)
    }

    /// Consume the map in creation order.
    fn into_ordered(mut self) -> Vec<(String, MaterialArrays)> {
        let buckets = &mut self.buckets;
        self.order
            .into_iter()
            .filter_map(|key| buckets.remove(&key).map(|arrays| (key, arrays)))
            .collect()
    }
}

/// Build the whole city as one merged node: every root object's polygons
/// fold into the shared bucket map, proxy-substituted buildings become
/// sibling transform nodes, and the buckets flush into one group.
pub(crate) fn build_city_as_single_object(
    roots: &[CityObject],
    ctx: &mut ImportContext<'_>,
    offset: &Vector3<f64>,
    out: &mut Vec<Node>,
) {
    let mut buckets = BucketMap::new();

    for object in roots {
        collect_object(object, ctx, &mut buckets, offset, out, 0);
    }

    let mut merged = GroupNode::new("");
    flush_buckets(buckets, &mut merged.drawables);
    out.push(Node::Group(merged));
}

fn collect_object(
    object: &CityObject,
    ctx: &mut ImportContext<'_>,
    buckets: &mut BucketMap,
    offset: &Vector3<f64>,
    out: &mut Vec<Node>,
    minimum_lod: u32,
) {
    if let Some(node) = proxy::try_substitute(object, offset) {
        out.push(node);
        return;
    }

    let highest = highest_lod_for_object(object);

    for geometry in object.geometries() {
        if ctx.settings.use_max_lod_only
            && (geometry.lod() < highest || geometry.lod() < minimum_lod)
        {
            continue;
        }
        collect_geometry(object, geometry, ctx, buckets, offset);
    }

    // Children inherit this subtree's highest LOD as their floor.
    for child in object.children() {
        collect_object(child, ctx, buckets, offset, out, highest);
    }
}

fn collect_geometry(
    object: &CityObject,
    geometry: &Geometry,
    ctx: &mut ImportContext<'_>,
    buckets: &mut BucketMap,
    offset: &Vector3<f64>,
) {
    let theme = ctx.theme().to_string();

    for polygon in geometry.polygons() {
        if polygon.indices().is_empty() {
            continue;
        }

        if let Some(texture) = polygon.texture_for(&theme) {
            let texture = texture.clone();
            let arrays = buckets.bucket_for_texture(&texture, ctx);
            arrays.append_polygon(polygon, &theme, offset, true);
        } else if let Some(arrays) = buckets.fallback_bucket(object.object_type()) {
            arrays.append_polygon(polygon, &theme, offset, false);
        } else {
            debug!(
                "dropping untextured polygon {} on {} (no coarse bucket)",
                polygon.id(),
                object.object_type().type_name()
            );
        }
    }

    for child in geometry.children() {
        collect_geometry(object, child, ctx, buckets, offset);
    }
}

/// Emit one drawable per non-empty bucket. Untextured fallback buckets get
/// their literal default colors; texture buckets get flat white diffuse and
/// the bound texture when texcoords were accumulated.
fn flush_buckets(buckets: BucketMap, out: &mut Vec<Drawable>) {
    for (key, arrays) in buckets.into_ordered() {
        if arrays.is_empty() {
            continue;
        }

        let has_tex_coords = !arrays.tex_coords.is_empty();
        let mut drawable = arrays.into_drawable(&key);

        let diffuse = match key.as_str() {
            WALL_BUCKET => [0.9, 0.9, 0.9, 1.0],
            ROOF_BUCKET => [0.5, 0.1, 0.1, 1.0],
            _ => [1.0, 1.0, 1.0, 1.0],
        };
        drawable.material = MaterialState {
            diffuse,
            specular: [1.0, 1.0, 1.0, 1.0],
            emission: [0.0, 0.0, 0.0, 1.0],
            ambient: [0.1, 0.1, 0.1, 1.0],
            shininess: 64.0,
            transparency: 0.0,
            lighting: true,
        };

        match key.as_str() {
            WALL_BUCKET | ROOF_BUCKET => drawable.texture = None,
            _ if !has_tex_coords => drawable.texture = None,
            _ => {}
        }

        out.push(Drawable::Mesh(drawable));
    }
}
