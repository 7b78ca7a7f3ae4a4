// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! City object tree builder: one group node per semantic object.

use citygml_scene_graph::{
    Drawable, GroupNode, LabelDrawable, Node, Point3 as ScenePoint, RenderState,
};
use citygml_scene_model::{CityObject, CityObjectType, Vector3};
use smallvec::SmallVec;

use crate::batch::batch_geometry;
use crate::context::ImportContext;

/// Highest LOD present anywhere in the object's subtree, own geometries and
/// descendants alike.
pub(crate) fn highest_lod_for_object(object: &CityObject) -> u32 {
    let own = object
        .geometries()
        .iter()
        .map(|g| g.lod())
        .max()
        .unwrap_or(0);
    object
        .children()
        .iter()
        .map(highest_lod_for_object)
        .fold(own, u32::max)
}

/// Convert one city object subtree into nodes appended to `parent`.
///
/// Each object becomes a tagged group holding its batched drawables.
/// Children are visited only when the object's own geometries yield
/// nothing: boundary-surface children describe the same faces as a
/// parent's block geometry, so converting both would render them twice.
/// Groups that end up with neither drawables nor children are dropped.
/// Returns whether the subtree contributed any geometry.
pub(crate) fn build_city_object(
    object: &CityObject,
    parent: &mut Vec<Node>,
    ctx: &mut ImportContext<'_>,
    offset: &Vector3<f64>,
    minimum_lod: u32,
) -> bool {
    let highest = highest_lod_for_object(object);
    let mut group = GroupNode::new(object.id()).with_tag(object.object_type().type_name());

    for geometry in object.geometries() {
        if ctx.settings.use_max_lod_only
            && (geometry.lod() < highest || geometry.lod() < minimum_lod)
        {
            continue;
        }
        batch_geometry(geometry, ctx, offset, &mut group.drawables);
    }
    let mut got_geometry = !group.drawables.is_empty();

    if object.object_type() == CityObjectType::Window {
        group.render_state = Some(RenderState::window_transparency());
    }

    if ctx.settings.print_names {
        attach_name_label(object.id(), &mut group);
    }

    if !got_geometry {
        if ctx.settings.separate_parts && object.object_type() == CityObjectType::Building {
            // Children collapse into one group per semantic type, in
            // first-seen order.
            let mut parts: SmallVec<[(CityObjectType, GroupNode); 4]> = SmallVec::new();
            for child in object.children() {
                let idx = match parts.iter().position(|(t, _)| *t == child.object_type()) {
                    Some(idx) => idx,
                    None => {
                        let name = child.object_type().type_name();
                        parts.push((child.object_type(), GroupNode::new(name).with_tag(name)));
                        parts.len() - 1
                    }
                };
                got_geometry |=
                    build_city_object(child, &mut parts[idx].1.children, ctx, offset, highest);
            }
            for (_, part) in parts {
                if !part.children.is_empty() {
                    group.children.push(Node::Group(part));
                }
            }
        } else {
            for child in object.children() {
                got_geometry |=
                    build_city_object(child, &mut group.children, ctx, offset, highest);
            }
        }
    }

    if group.drawables.is_empty() && group.children.is_empty() {
        return false;
    }

    parent.push(Node::Group(group));
    got_geometry
}

/// Overlay the object id as a screen-facing label floating above the
/// group's drawables.
fn attach_name_label(id: &str, group: &mut GroupNode) {
    let mut bounds: Option<(ScenePoint<f32>, ScenePoint<f32>)> = None;
    for drawable in &group.drawables {
        let Some(mesh) = drawable.as_mesh() else {
            continue;
        };
        let Some((lo, hi)) = mesh.bounds() else {
            continue;
        };
        bounds = Some(match bounds {
            None => (lo, hi),
            Some((min, max)) => (
                ScenePoint::new(min.x.min(lo.x), min.y.min(lo.y), min.z.min(lo.z)),
                ScenePoint::new(max.x.max(hi.x), max.y.max(hi.y), max.z.max(hi.z)),
            ),
        });
    }

    let Some((min, max)) = bounds else {
        return;
    };
    let radius = (max - min).norm() / 2.0;
    let anchor = ScenePoint::new(
        (min.x + max.x) / 2.0,
        (min.y + max.y) / 2.0,
        (min.z + max.z) / 2.0 + radius,
    );
    group
        .drawables
        .push(Drawable::Label(LabelDrawable::new(id, anchor)));
}
