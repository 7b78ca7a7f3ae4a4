// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry batcher: turns one geometry subtree into batched drawables.
//!
//! Consecutive polygons sharing the same texture key (a URL, or untextured)
//! accumulate into one drawable; any change of key closes the run. Sibling
//! order in the source therefore determines batch boundaries.

use citygml_scene_graph::Drawable;
use citygml_scene_model::{Geometry, Polygon};
use nalgebra::Vector3;
use tracing::warn;

use crate::appearance::material_state;
use crate::arrays::MaterialArrays;
use crate::context::ImportContext;

/// Recursively batch a geometry tree into `out`.
///
/// Depth-first: the node's own polygons first, then its children in source
/// order. Degenerate polygons (empty index list) are skipped and never
/// contribute vertices. Every open run is flushed before recursing, and the
/// final run of each node is always flushed.
pub(crate) fn batch_geometry(
    geometry: &Geometry,
    ctx: &mut ImportContext<'_>,
    offset: &Vector3<f64>,
    out: &mut Vec<Drawable>,
) {
    if !geometry.polygons().is_empty() {
        let mut arrays = MaterialArrays::new();
        // None = no run open; Some(None) = untextured run; Some(Some(url))
        let mut run_key: Option<Option<String>> = None;
        let mut representative: Option<&Polygon> = None;

        for polygon in geometry.polygons() {
            if polygon.indices().is_empty() {
                continue;
            }

            let key = polygon
                .texture_for(ctx.theme())
                .map(|t| t.url().to_string());

            if let Some(previous) = &run_key {
                if *previous != key && !arrays.is_empty() {
                    if let Some(rep) = representative {
                        flush_run(arrays, rep, geometry, ctx, out);
                    }
                    arrays = MaterialArrays::new();
                }
            }

            run_key = Some(key);
            // The run's first polygon names the drawable and donates its
            // appearance.
            if arrays.is_empty() {
                representative = Some(polygon);
            }

            let theme = ctx.theme().to_string();
            arrays.append_polygon(polygon, &theme, offset, true);
        }

        if !arrays.is_empty() {
            if let Some(rep) = representative {
                flush_run(arrays, rep, geometry, ctx, out);
            }
        }
    }

    for child in geometry.children() {
        batch_geometry(child, ctx, offset, out);
    }
}

/// Close one run: resolve appearance for its representative polygon and
/// emit a drawable.
fn flush_run(
    arrays: MaterialArrays,
    representative: &Polygon,
    geometry: &Geometry,
    ctx: &mut ImportContext<'_>,
    out: &mut Vec<Drawable>,
) {
    let mut drawable = arrays.into_drawable(representative.id());
    drawable.tag = Some(geometry.kind().type_name().to_string());

    if ctx.settings.store_geom_ids {
        drawable.description = Some(representative.id().to_string());
    }

    if let Some(material) = representative.material_for(ctx.theme()) {
        drawable.material = material_state(material);
    }

    if let Some(texture) = representative.texture_for(ctx.theme()) {
        if representative.tex_coords_for(ctx.theme()).is_none() {
            warn!(
                "texture coordinates not found for polygon {}",
                representative.id()
            );
        }
        let texture = texture.clone();
        drawable.texture = ctx.resolve_texture(&texture);
    }

    out.push(Drawable::Mesh(drawable));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::FileLocator;
    use crate::settings::ImportSettings;
    use citygml_scene_model::{GeometryKind, Point3, TextureRef};

    fn quad(id: &str) -> Polygon {
        Polygon::new(
            id,
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
    }

    fn textured_quad(id: &str, url: &str) -> Polygon {
        let mut p = quad(id);
        p.set_texture("", TextureRef::new(url));
        p.set_tex_coords("", vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        p
    }

    fn run_batcher(geometry: &Geometry) -> Vec<Drawable> {
        let settings = ImportSettings::default();
        let locator = FileLocator::new();
        let mut ctx = ImportContext::new(&settings, String::new(), &locator);
        let mut out = Vec::new();
        batch_geometry(geometry, &mut ctx, &Vector3::zeros(), &mut out);
        out
    }

    #[test]
    fn test_untextured_polygons_share_one_drawable() {
        let geometry = Geometry::new(GeometryKind::Wall, 2)
            .with_polygon(quad("a"))
            .with_polygon(quad("b"));

        let out = run_batcher(&geometry);
        assert_eq!(out.len(), 1);
        let mesh = out[0].as_mesh().unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(mesh.tag.as_deref(), Some("Wall"));
    }

    #[test]
    fn test_texture_change_splits_run() {
        // Textured then untextured: the key change closes the first run.
        let geometry = Geometry::new(GeometryKind::Wall, 2)
            .with_polygon(textured_quad("a", "A.png"))
            .with_polygon(quad("b"));

        let out = run_batcher(&geometry);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].as_mesh().unwrap().vertex_count(), 4);
        assert_eq!(out[1].as_mesh().unwrap().vertex_count(), 4);
    }

    #[test]
    fn test_different_urls_split_runs() {
        let geometry = Geometry::new(GeometryKind::Wall, 2)
            .with_polygon(textured_quad("a", "A.png"))
            .with_polygon(textured_quad("b", "B.png"))
            .with_polygon(textured_quad("c", "B.png"));

        let out = run_batcher(&geometry);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].as_mesh().unwrap().vertex_count(), 8);
    }

    #[test]
    fn test_degenerate_polygons_skipped() {
        let degenerate = Polygon::new("empty", vec![Point3::new(0.0, 0.0, 0.0)], vec![]);
        let geometry = Geometry::new(GeometryKind::Wall, 2)
            .with_polygon(degenerate)
            .with_polygon(quad("a"));

        let out = run_batcher(&geometry);
        assert_eq!(out.len(), 1);
        let mesh = out[0].as_mesh().unwrap();
        // Nothing from the degenerate polygon leaks into the buffers.
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices.len(), 6);
    }

    #[test]
    fn test_indices_stay_within_own_buffer() {
        let geometry = Geometry::new(GeometryKind::Wall, 2)
            .with_polygon(textured_quad("a", "A.png"))
            .with_polygon(quad("b"))
            .with_polygon(quad("c"))
            .with_child(Geometry::new(GeometryKind::Roof, 2).with_polygon(quad("d")));

        for drawable in run_batcher(&geometry) {
            let mesh = drawable.as_mesh().unwrap();
            let count = mesh.vertex_count() as u32;
            assert!(mesh.indices.iter().all(|&i| i < count));
        }
    }

    #[test]
    fn test_child_geometries_batched_after_own_polygons() {
        let child = Geometry::new(GeometryKind::Roof, 2).with_polygon(quad("roof"));
        let geometry = Geometry::new(GeometryKind::Wall, 2)
            .with_polygon(quad("wall"))
            .with_child(child);

        let out = run_batcher(&geometry);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].as_mesh().unwrap().name, "wall");
        assert_eq!(out[1].as_mesh().unwrap().name, "roof");
        assert_eq!(out[1].as_mesh().unwrap().tag.as_deref(), Some("Roof"));
    }

    #[test]
    fn test_store_geom_ids_sets_description() {
        let geometry = Geometry::new(GeometryKind::Wall, 2).with_polygon(quad("poly-7"));

        let settings = ImportSettings {
            store_geom_ids: true,
            ..Default::default()
        };
        let locator = FileLocator::new();
        let mut ctx = ImportContext::new(&settings, String::new(), &locator);
        let mut out = Vec::new();
        batch_geometry(&geometry, &mut ctx, &Vector3::zeros(), &mut out);

        assert_eq!(
            out[0].as_mesh().unwrap().description.as_deref(),
            Some("poly-7")
        );
    }

    #[test]
    fn test_polygon_material_applied_to_run() {
        use citygml_scene_model::SurfaceMaterial;

        let mut p = quad("a");
        p.set_material(
            "",
            SurfaceMaterial {
                diffuse: [0.1, 0.2, 0.3],
                ..Default::default()
            },
        );
        let geometry = Geometry::new(GeometryKind::Wall, 2).with_polygon(p);

        let out = run_batcher(&geometry);
        let mesh = out[0].as_mesh().unwrap();
        assert_eq!(mesh.material.diffuse, [0.1, 0.2, 0.3, 0.0]);
    }
}
