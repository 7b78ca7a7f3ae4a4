// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoded texture with sampling parameters.

use std::sync::Arc;

use image::DynamicImage;

/// Minification filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinFilter {
    Linear,
    LinearMipmapLinear,
    Nearest,
}

/// Magnification filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagFilter {
    Linear,
    Nearest,
}

/// Wrap mode, per texture axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    Repeat,
    ClampToEdge,
    MirroredRepeat,
}

/// A decoded texture image plus the sampling state the host should use.
#[derive(Debug, Clone)]
pub struct Texture {
    url: String,
    image: DynamicImage,
    pub min_filter: MinFilter,
    pub mag_filter: MagFilter,
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    pub wrap_r: WrapMode,
}

/// Shared texture handle. The importer caches one handle per distinct URL;
/// hosts may compare handles by identity (`Arc::ptr_eq`) to share GPU
/// resources between drawables.
pub type TextureHandle = Arc<Texture>;

impl Texture {
    /// Wrap a decoded image with the importer's standard sampling state:
    /// trilinear minification, nearest magnification, repeat on all axes.
    pub fn with_default_sampling(url: impl Into<String>, image: DynamicImage) -> Self {
        Self {
            url: url.into(),
            image,
            min_filter: MinFilter::LinearMipmapLinear,
            mag_filter: MagFilter::Nearest,
            wrap_s: WrapMode::Repeat,
            wrap_t: WrapMode::Repeat,
            wrap_r: WrapMode::Repeat,
        }
    }

    /// Source URL the texture was resolved from.
    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Decoded image data.
    #[inline]
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sampling_state() {
        let img = DynamicImage::new_rgba8(2, 2);
        let tex = Texture::with_default_sampling("facade.png", img);

        assert_eq!(tex.url(), "facade.png");
        assert_eq!(tex.min_filter, MinFilter::LinearMipmapLinear);
        assert_eq!(tex.mag_filter, MagFilter::Nearest);
        assert_eq!(tex.wrap_s, WrapMode::Repeat);
        assert_eq!(tex.wrap_t, WrapMode::Repeat);
        assert_eq!(tex.wrap_r, WrapMode::Repeat);
        assert_eq!(tex.width(), 2);
    }
}
