// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reader front door: file resolution, parser dispatch and scene assembly.

use std::path::{Path, PathBuf};

use citygml_scene_graph::{Node, TransformNode};
use citygml_scene_model::CityModel;
use tracing::{info, warn};

use crate::aggregate::build_city_as_single_object;
use crate::builder::build_city_object;
use crate::context::ImportContext;
use crate::error::Result;
use crate::offset::compute_offset;
use crate::settings::{ImportSettings, ParserParams};

/// Ordered search paths for resolving relative file references (documents,
/// textures).
///
/// Resolution tries the name as-is first, then each search path front to
/// back. During one document import the document's own directory sits at
/// the front so its textures resolve relative to it.
#[derive(Debug, Clone, Default)]
pub struct FileLocator {
    search_paths: Vec<PathBuf>,
}

impl FileLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_paths(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    /// Prepend a search path, giving it highest priority.
    pub fn push_front(&mut self, path: PathBuf) {
        self.search_paths.insert(0, path);
    }

    /// Remove the highest-priority search path.
    pub fn pop_front(&mut self) {
        if !self.search_paths.is_empty() {
            self.search_paths.remove(0);
        }
    }

    /// Resolve a file name to an existing path, or `None`.
    pub fn locate(&self, name: &str) -> Option<PathBuf> {
        let direct = Path::new(name);
        if direct.is_file() {
            return Some(direct.to_path_buf());
        }
        for base in &self.search_paths {
            let candidate = base.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }
}

/// External CityGML parse service.
///
/// The import core does not parse XML; the host supplies a loader that
/// turns a located file into a [`CityModel`]. `Ok(None)` means the file was
/// parsed but yielded no model.
pub trait ModelLoader {
    fn load(&self, path: &Path, params: &ParserParams) -> Result<Option<CityModel>>;
}

/// Outcome of a read request, mirroring the host's plugin protocol.
#[derive(Debug)]
pub enum ReadOutcome {
    /// The file was imported; `root` is the assembled scene and
    /// `optimize_root` asks the host to run its generic optimizer over it.
    Loaded { root: Node, optimize_root: bool },
    /// The file extension is not ours; the host should try other plugins.
    NotHandled,
    /// The extension matched but no file could be located.
    NotFound,
    /// The file was parsed but produced nothing to render.
    Nothing,
}

/// File extensions this reader claims.
const EXTENSIONS: &[&str] = &["citygml", "gml"];

/// The CityGML read plugin: claims `.citygml`/`.gml` files, runs the parse
/// service and assembles the scene.
pub struct CityGmlReader<L: ModelLoader> {
    loader: L,
}

impl<L: ModelLoader> CityGmlReader<L> {
    pub fn new(loader: L) -> Self {
        Self { loader }
    }

    /// Whether a file extension (without dot) belongs to this reader.
    pub fn accepts_extension(extension: &str) -> bool {
        EXTENSIONS
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }

    /// Read one CityGML document and assemble its scene.
    ///
    /// The located document's directory is prepended to the locator's search
    /// paths for the duration of the call so relative texture references
    /// resolve next to the document.
    pub fn read_file(
        &self,
        file: &str,
        settings: &ImportSettings,
        locator: &mut FileLocator,
    ) -> Result<ReadOutcome> {
        let path = Path::new(file);
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !Self::accepts_extension(extension) {
            return Ok(ReadOutcome::NotHandled);
        }

        // A pseudo-extension like `model.gml.citygml` selects this reader
        // while the actual file on disk is `model.gml`.
        let located = locator.locate(file).or_else(|| {
            let stripped = path.with_extension("");
            stripped.to_str().and_then(|name| locator.locate(name))
        });
        let Some(located) = located else {
            return Ok(ReadOutcome::NotFound);
        };

        if let Some(parent) = located.parent() {
            locator.push_front(parent.to_path_buf());
        }

        info!("reading CityGML document {}", located.display());
        let outcome = self
            .loader
            .load(&located, &settings.parser_params)
            .map(|model| match model {
                None => ReadOutcome::Nothing,
                Some(model) => match import_model(&model, settings, locator) {
                    None => ReadOutcome::Nothing,
                    Some(mut root) => {
                        // The host indexes loaded scenes by file name.
                        if let Node::Transform(transform) = &mut root {
                            transform.name = file.to_string();
                        }
                        ReadOutcome::Loaded {
                            root,
                            optimize_root: settings.optimize_root,
                        }
                    }
                },
            });

        if located.parent().is_some() {
            locator.pop_front();
        }
        outcome
    }
}

/// Assemble a parsed city model into a scene.
///
/// The root is a translation node carrying the global offset; everything
/// below it lives in offset-local coordinates. Returns `None` for a model
/// with no root objects.
pub fn import_model(
    model: &CityModel,
    settings: &ImportSettings,
    locator: &FileLocator,
) -> Option<Node> {
    info!(
        "importing city model {} with {} root objects",
        model.id(),
        model.root_objects().len()
    );
    if model.root_objects().is_empty() {
        warn!("city model {} has no root objects", model.id());
        return None;
    }

    let theme = settings.resolve_theme(model);
    let offset = compute_offset(model);
    let mut root = TransformNode::translation(model.id(), offset);
    let mut ctx = ImportContext::new(settings, theme, locator);

    if settings.single_object {
        build_city_as_single_object(model.root_objects(), &mut ctx, &offset, &mut root.children);
    } else {
        for object in model.root_objects() {
            build_city_object(object, &mut root.children, &mut ctx, &offset, 0);
        }
    }

    Some(Node::Transform(root))
}
