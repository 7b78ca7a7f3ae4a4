// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end import scenarios over assembled city models.

use std::fs;
use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use citygml_scene_graph::Node;
use citygml_scene_import::{
    import_model, CityGmlReader, FileLocator, ImportSettings, ModelLoader, ParserParams,
    ReadOutcome, Result,
};
use citygml_scene_model::{
    CityModel, CityObject, CityObjectType, Envelope, Geometry, GeometryKind, Point3, Polygon,
    TextureRef,
};

fn wall_quad(id: &str, base: Point3<f64>) -> Polygon {
    Polygon::new(
        id,
        vec![
            base,
            Point3::new(base.x + 10.0, base.y, base.z),
            Point3::new(base.x + 10.0, base.y, base.z + 4.0),
            Point3::new(base.x, base.y, base.z + 4.0),
        ],
        vec![0, 1, 2, 0, 2, 3],
    )
}

fn georeferenced_model() -> CityModel {
    let origin = Point3::new(2_679_012.0, 1_247_892.0, 432.0);
    let mut envelope = Envelope::new();
    envelope.expand(&origin);
    envelope.expand(&Point3::new(origin.x + 10.0, origin.y + 10.0, origin.z + 4.0));

    let building = CityObject::new("bldg-1", CityObjectType::Building).with_geometry(
        Geometry::new(GeometryKind::Wall, 2).with_polygon(wall_quad("w", origin)),
    );

    CityModel::new("town")
        .with_envelope(envelope)
        .with_root(building)
}

#[test]
fn test_import_rebases_coordinates_and_restores_offset() {
    let model = georeferenced_model();
    let locator = FileLocator::new();
    let root = import_model(&model, &ImportSettings::default(), &locator).unwrap();

    let transform = root.as_transform().unwrap();
    let offset = transform.translation_part();
    assert_relative_eq!(offset.x, 2_679_012.0);
    assert_relative_eq!(offset.y, 1_247_892.0);
    assert_relative_eq!(offset.z, 432.0);

    let group = transform.children[0].as_group().unwrap();
    assert_eq!(group.name, "bldg-1");
    assert_eq!(group.tag.as_deref(), Some("Building"));

    // Local coordinates are small; the first vertex sits at the origin.
    let mesh = group.drawables[0].as_mesh().unwrap();
    assert_eq!(mesh.vertex_count(), 4);
    assert_relative_eq!(mesh.positions[0], 0.0);
    assert_relative_eq!(mesh.positions[1], 0.0);
    assert_relative_eq!(mesh.positions[2], 0.0);
    assert!(mesh.positions.iter().all(|p| p.abs() <= 10.0));
}

#[test]
fn test_block_geometry_suppresses_surface_children() {
    let origin = Point3::new(0.0, 0.0, 0.0);
    let wall_child = CityObject::new("wall", CityObjectType::WallSurface).with_geometry(
        Geometry::new(GeometryKind::Wall, 2).with_polygon(wall_quad("surface", origin)),
    );
    let building = CityObject::new("b", CityObjectType::Building)
        .with_geometry(Geometry::new(GeometryKind::Unknown, 1).with_polygon(wall_quad("block", origin)))
        .with_child(wall_child);
    let model = CityModel::new("m").with_root(building);

    let locator = FileLocator::new();
    let root = import_model(&model, &ImportSettings::default(), &locator).unwrap();

    // The building's own block stands in for its boundary surfaces; the
    // child subtree must not be converted alongside it.
    assert_eq!(root.mesh_drawable_count(), 1);
    let group = root.as_transform().unwrap().children[0].as_group().unwrap();
    assert_eq!(group.drawables[0].as_mesh().unwrap().name, "block");
    assert!(group.children.is_empty());
}

#[test]
fn test_single_object_merges_into_buckets() {
    let origin = Point3::new(0.0, 0.0, 0.0);
    let roof_child = CityObject::new("roof", CityObjectType::RoofSurface).with_geometry(
        Geometry::new(GeometryKind::Roof, 2).with_polygon(wall_quad("r", origin)),
    );
    let building = CityObject::new("b", CityObjectType::Building)
        .with_geometry(
            Geometry::new(GeometryKind::Wall, 2)
                .with_polygon(wall_quad("w1", origin))
                .with_polygon(wall_quad("w2", origin)),
        )
        .with_child(roof_child);
    let model = CityModel::new("m").with_root(building);

    let settings = ImportSettings {
        single_object: true,
        ..Default::default()
    };
    let locator = FileLocator::new();
    let root = import_model(&model, &settings, &locator).unwrap();

    // One merged group, two coarse buckets, regardless of polygon count.
    assert_eq!(root.mesh_drawable_count(), 2);
    let merged = root.as_transform().unwrap().children[0].as_group().unwrap();
    assert_eq!(merged.drawables[0].as_mesh().unwrap().name, "wall");
    assert_eq!(merged.drawables[1].as_mesh().unwrap().name, "roof");
}

#[test]
fn test_max_lod_only_keeps_finest_representation() {
    let origin = Point3::new(0.0, 0.0, 0.0);
    let building = CityObject::new("b", CityObjectType::Building)
        .with_geometry(Geometry::new(GeometryKind::Unknown, 1).with_polygon(wall_quad("block", origin)))
        .with_geometry(
            Geometry::new(GeometryKind::Wall, 2)
                .with_polygon(wall_quad("facade-a", origin))
                .with_polygon(wall_quad("facade-b", origin)),
        );
    let model = CityModel::new("m").with_root(building);

    let locator = FileLocator::new();
    let all = import_model(&model, &ImportSettings::default(), &locator).unwrap();
    assert_eq!(all.mesh_drawable_count(), 2);

    let settings = ImportSettings {
        use_max_lod_only: true,
        ..Default::default()
    };
    let finest = import_model(&model, &settings, &locator).unwrap();
    assert_eq!(finest.mesh_drawable_count(), 1);
    let group = finest.as_transform().unwrap().children[0].as_group().unwrap();
    assert_eq!(group.drawables[0].as_mesh().unwrap().name, "facade-a");
}

#[test]
fn test_theme_resolution_prefers_declared_theme() {
    let origin = Point3::new(0.0, 0.0, 0.0);
    let mut polygon = wall_quad("w", origin);
    polygon.set_texture("summer", TextureRef::new("facade_summer.png"));
    polygon.set_tex_coords(
        "summer",
        vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
    );

    let building = CityObject::new("b", CityObjectType::Building)
        .with_geometry(Geometry::new(GeometryKind::Wall, 2).with_polygon(polygon));
    let model = CityModel::new("m").with_theme("summer").with_root(building);

    let locator = FileLocator::new();
    let root = import_model(&model, &ImportSettings::default(), &locator).unwrap();

    // The summer theme is active by declaration order, so the polygon's
    // texture coordinates come along even though the texture file itself
    // cannot be resolved here.
    let group = root.as_transform().unwrap().children[0].as_group().unwrap();
    let mesh = group.drawables[0].as_mesh().unwrap();
    assert_eq!(mesh.tex_coords.len(), 8);
    assert!(mesh.texture.is_none());
}

#[test]
fn test_window_subtree_carries_transparency() {
    let origin = Point3::new(0.0, 0.0, 0.0);
    let window = CityObject::new("win", CityObjectType::Window).with_geometry(
        Geometry::new(GeometryKind::Wall, 3).with_polygon(wall_quad("glass", origin)),
    );
    // Neither the building nor the wall carries geometry of its own, so the
    // walk descends to the window leaf.
    let wall = CityObject::new("wall", CityObjectType::WallSurface).with_child(window);
    let model = CityModel::new("m")
        .with_root(CityObject::new("b", CityObjectType::Building).with_child(wall));

    let locator = FileLocator::new();
    let root = import_model(&model, &ImportSettings::default(), &locator).unwrap();

    fn find_group<'a>(node: &'a Node, name: &str) -> Option<&'a citygml_scene_graph::GroupNode> {
        if let Some(group) = node.as_group() {
            if group.name == name {
                return Some(group);
            }
        }
        node.children().iter().find_map(|c| find_group(c, name))
    }

    let win = find_group(&root, "win").unwrap();
    let state = win.render_state.as_ref().unwrap();
    assert_eq!(state.blend_constant_alpha, Some(0.4));
    assert!(!state.depth_write);
    assert!(state.transparent_bin);

    let wall = find_group(&root, "wall").unwrap();
    assert!(wall.render_state.is_none());
}

#[test]
fn test_pylon_substituted_in_merged_city() {
    let origin = Point3::new(500.0, 600.0, 0.0);
    let pylon = CityObject::new("pylon", CityObjectType::Building)
        .with_attribute("bldg:function", "51002_1251")
        .with_attribute("bldg:measuredheight", "22")
        .with_geometry(Geometry::new(GeometryKind::Ground, 1).with_polygon(wall_quad("g", origin)));
    let house = CityObject::new("house", CityObjectType::Building).with_geometry(
        Geometry::new(GeometryKind::Wall, 2).with_polygon(wall_quad("w", origin)),
    );
    let model = CityModel::new("m").with_root(pylon).with_root(house);

    let settings = ImportSettings {
        single_object: true,
        ..Default::default()
    };
    let locator = FileLocator::new();
    let root = import_model(&model, &settings, &locator).unwrap();
    let children = &root.as_transform().unwrap().children;
    assert_eq!(children.len(), 2);

    let substituted = children[0].as_transform().unwrap();
    let proxy = substituted.children[0].as_proxy().unwrap();
    assert_eq!(proxy.file_name, "Freileitung20.ive");

    // Only the house's quad reaches the merged wall bucket; the pylon's
    // geometry was replaced.
    assert_eq!(children[1].mesh_drawable_count(), 1);
    let merged = children[1].as_group().unwrap();
    assert_eq!(merged.drawables[0].as_mesh().unwrap().name, "wall");
    assert_eq!(merged.drawables[0].as_mesh().unwrap().vertex_count(), 4);
}

#[test]
fn test_pylon_keeps_geometry_in_per_object_mode() {
    let origin = Point3::new(500.0, 600.0, 0.0);
    let pylon = CityObject::new("pylon", CityObjectType::Building)
        .with_attribute("bldg:function", "51002_1251")
        .with_attribute("bldg:measuredheight", "22")
        .with_geometry(Geometry::new(GeometryKind::Ground, 1).with_polygon(wall_quad("g", origin)));
    let model = CityModel::new("m").with_root(pylon);

    let locator = FileLocator::new();
    let root = import_model(&model, &ImportSettings::default(), &locator).unwrap();
    let children = &root.as_transform().unwrap().children;

    // No substitution outside merged-city mode: the schematic geometry is
    // batched as-is.
    assert!(children[0].as_group().is_some());
    assert_eq!(children[0].mesh_drawable_count(), 1);
}

struct TexturedTownLoader;

impl ModelLoader for TexturedTownLoader {
    fn load(&self, _path: &Path, _params: &ParserParams) -> Result<Option<CityModel>> {
        let mut polygon = wall_quad("w", Point3::new(0.0, 0.0, 0.0));
        polygon.set_texture("", TextureRef::new("facade.png"));
        polygon.set_tex_coords("", vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);

        let building = CityObject::new("b", CityObjectType::Building)
            .with_geometry(Geometry::new(GeometryKind::Wall, 2).with_polygon(polygon));
        Ok(Some(CityModel::new("town").with_root(building)))
    }
}

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("citygml_it_{}_{tag}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_read_file_resolves_textures_beside_document() {
    let dir = scratch_dir("textures");
    let document = dir.join("town.gml");
    fs::write(&document, b"<CityModel/>").unwrap();
    let png = image::DynamicImage::new_rgba8(2, 2);
    png.save(dir.join("facade.png")).unwrap();

    let reader = CityGmlReader::new(TexturedTownLoader);
    let mut locator = FileLocator::new();
    let outcome = reader
        .read_file(
            document.to_str().unwrap(),
            &ImportSettings::default(),
            &mut locator,
        )
        .unwrap();

    let ReadOutcome::Loaded { root, .. } = outcome else {
        panic!("expected a loaded scene");
    };

    // The texture next to the document was found through the temporary
    // search path and decoded onto the drawable.
    let group = root.as_transform().unwrap().children[0].as_group().unwrap();
    let mesh = group.drawables[0].as_mesh().unwrap();
    let texture = mesh.texture.as_ref().unwrap();
    assert_eq!(texture.url(), "facade.png");

    // The search path was popped again after the read.
    assert!(locator.locate("facade.png").is_none());
}

#[test]
fn test_separate_parts_and_labels_compose() {
    let origin = Point3::new(0.0, 0.0, 0.0);
    let building = CityObject::new("b", CityObjectType::Building)
        .with_child(
            CityObject::new("w1", CityObjectType::WallSurface).with_geometry(
                Geometry::new(GeometryKind::Wall, 2).with_polygon(wall_quad("a", origin)),
            ),
        )
        .with_child(
            CityObject::new("r1", CityObjectType::RoofSurface).with_geometry(
                Geometry::new(GeometryKind::Roof, 2).with_polygon(wall_quad("b", origin)),
            ),
        );
    let model = CityModel::new("m").with_root(building);

    let settings = ImportSettings {
        separate_parts: true,
        print_names: true,
        ..Default::default()
    };
    let locator = FileLocator::new();
    let root = import_model(&model, &settings, &locator).unwrap();

    let group = root.as_transform().unwrap().children[0].as_group().unwrap();
    assert_eq!(group.children.len(), 2);
    assert_eq!(group.children[0].name(), "WallSurface");
    assert_eq!(group.children[1].name(), "RoofSurface");

    // Each leaf surface carries its mesh plus a name label.
    let wall_leaf = group.children[0].children()[0].as_group().unwrap();
    assert_eq!(wall_leaf.drawables.len(), 2);
    let label = wall_leaf.drawables[1].as_label().unwrap();
    assert_eq!(label.text, "w1");
}
