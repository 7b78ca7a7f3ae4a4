// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Top-level parsed city model.

use crate::envelope::Envelope;
use crate::object::CityObject;

/// A fully parsed city model: root objects, global envelope and the
/// appearance themes declared by the document, in declaration order.
#[derive(Debug, Clone)]
pub struct CityModel {
    id: String,
    roots: Vec<CityObject>,
    envelope: Envelope,
    themes: Vec<String>,
}

impl CityModel {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            roots: Vec::new(),
            envelope: Envelope::new(),
            themes: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn root_objects(&self) -> &[CityObject] {
        &self.roots
    }

    /// Global envelope; may be invalid when the source declared none.
    #[inline]
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Appearance theme names in declaration order.
    #[inline]
    pub fn themes(&self) -> &[String] {
        &self.themes
    }

    pub fn set_envelope(&mut self, envelope: Envelope) {
        self.envelope = envelope;
    }

    pub fn push_root(&mut self, object: CityObject) {
        self.roots.push(object);
    }

    pub fn push_theme(&mut self, theme: impl Into<String>) {
        self.themes.push(theme.into());
    }

    /// Builder-style root append.
    pub fn with_root(mut self, object: CityObject) -> Self {
        self.roots.push(object);
        self
    }

    /// Builder-style envelope set.
    pub fn with_envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = envelope;
        self
    }

    /// Builder-style theme append.
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.themes.push(theme.into());
        self
    }
}
