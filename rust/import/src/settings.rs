// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Import configuration parsed from the host's flat option string.

use std::str::FromStr;

use citygml_scene_model::CityModel;
use tracing::debug;

use crate::error::{Error, Result};

/// Parameters forwarded verbatim to the external CityGML parser.
///
/// The import core never reinterprets these; they are carried so the host
/// can hand them to its parse service in one piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserParams {
    /// Object-type bitmask filter.
    pub objects_mask: u32,
    pub min_lod: u32,
    pub max_lod: u32,
    /// Ask the parser to merge geometries/polygons where it can.
    pub optimize: bool,
    /// Drop objects without supported geometry during parsing.
    pub prune_empty_objects: bool,
}

impl Default for ParserParams {
    fn default() -> Self {
        Self {
            objects_mask: u32::MAX,
            min_lod: 0,
            max_lod: 4,
            optimize: false,
            prune_empty_objects: false,
        }
    }
}

/// Per-import configuration.
///
/// One instance (together with one texture cache) belongs to exactly one
/// import call; concurrent imports need separate instances.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSettings {
    /// Overlay each object's id as a screen-facing label.
    pub print_names: bool,
    /// Only keep geometries at the subtree's highest available LOD.
    pub use_max_lod_only: bool,
    /// Merge the whole city into coarse per-material buckets.
    pub single_object: bool,
    /// Group building children by semantic type instead of one group per
    /// object.
    pub separate_parts: bool,
    /// Store each drawable's source polygon id as a description string.
    pub store_geom_ids: bool,
    /// Ask the host to run its generic scene optimizer over the result.
    pub optimize_root: bool,
    /// Explicit appearance theme; falls back to the model's first declared
    /// theme, else untextured.
    pub theme: Option<String>,
    pub parser_params: ParserParams,
}

impl ImportSettings {
    /// Parse a whitespace-separated option string.
    ///
    /// Option words are case-insensitive; unknown words are ignored so that
    /// options aimed at other plugins pass through harmlessly. Options that
    /// take an argument consume the following word.
    pub fn parse_options(options: &str) -> Result<Self> {
        let mut settings = Self::default();
        let mut words = options.split_whitespace();

        while let Some(word) = words.next() {
            match word.to_ascii_lowercase().as_str() {
                "names" => settings.print_names = true,
                "mask" => settings.parser_params.objects_mask = next_number(&mut words, "mask")?,
                "minlod" => settings.parser_params.min_lod = next_number(&mut words, "minLOD")?,
                "maxlod" => settings.parser_params.max_lod = next_number(&mut words, "maxLOD")?,
                "optimize" => settings.parser_params.optimize = true,
                "pruneemptyobjects" => settings.parser_params.prune_empty_objects = true,
                "usemaxlodonly" => settings.use_max_lod_only = true,
                "singleobject" => settings.single_object = true,
                "separatebuildingparts" => settings.separate_parts = true,
                "storegeomids" => settings.store_geom_ids = true,
                "optimizeroot" => settings.optimize_root = true,
                "usetheme" | "appearancetheme" => {
                    let theme = words.next().ok_or_else(|| Error::MalformedOption {
                        option: word.to_string(),
                        reason: "missing theme name".to_string(),
                    })?;
                    settings.theme = Some(theme.to_string());
                }
                other => debug!("ignoring unknown import option `{other}`"),
            }
        }

        Ok(settings)
    }

    /// Resolve the active appearance theme for one import: explicit option,
    /// else the model's first declared theme, else the untextured default.
    pub fn resolve_theme(&self, model: &CityModel) -> String {
        if let Some(theme) = &self.theme {
            return theme.clone();
        }
        model.themes().first().cloned().unwrap_or_default()
    }
}

fn next_number<T>(words: &mut std::str::SplitWhitespace<'_>, option: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = words.next().ok_or_else(|| Error::MalformedOption {
        option: option.to_string(),
        reason: "missing argument".to_string(),
    })?;
    value.parse().map_err(|e: T::Err| Error::MalformedOption {
        option: option.to_string(),
        reason: e.to_string(),
    })
}
