// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CityGML import core: turns parsed city models into renderable scenes.
//!
//! The pipeline resolves a global coordinate offset, walks the semantic
//! object tree, batches polygons into per-texture drawables, resolves
//! appearances through a session-scoped texture cache and substitutes
//! authored proxy models for schematic structures. Parsing itself is the
//! host's job, supplied through [`ModelLoader`].

pub mod appearance;
pub mod error;
pub mod offset;
pub mod reader;
pub mod settings;

mod aggregate;
mod arrays;
mod batch;
mod builder;
mod context;
mod proxy;

pub use appearance::{material_state, TextureCache};
pub use error::{Error, Result};
pub use offset::compute_offset;
pub use reader::{import_model, CityGmlReader, FileLocator, ModelLoader, ReadOutcome};
pub use settings::{ImportSettings, ParserParams};
