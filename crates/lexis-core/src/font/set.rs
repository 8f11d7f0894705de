use alloc::vec::Vec;
use core::fmt::{self, Write as _};

use heapless::String;
use log::info;

use super::{Font, FontError};
use crate::store::ByteStore;

/// Pixel sizes of the zoom levels, smallest first.
pub const ZOOM_SIZES: [u8; 5] = [8, 10, 12, 14, 16];
/// Display names; the position is the family index used in file names.
pub const FAMILY_NAMES: [&str; 3] = ["Gentium", "DejaVu", "Cardo"];

/// Capacity of a font file path.
pub const PATH_BYTES: usize = 64;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FontSetConfig {
    /// Directory prefix prepended to every file name, e.g. `"fonts/"`.
    pub dir: &'static str,
    pub families: &'static [&'static str],
    pub sizes: &'static [u8],
    pub default_family: usize,
    pub default_zoom: usize,
}

impl Default for FontSetConfig {
    fn default() -> Self {
        Self {
            dir: "",
            families: &FAMILY_NAMES,
            sizes: &ZOOM_SIZES,
            default_family: 0,
            default_zoom: 1,
        }
    }
}

impl FontSetConfig {
    /// `<dir>font_<family index>_<size>.bin`
    pub fn path(&self, family: usize, size: u8) -> Result<String<PATH_BYTES>, FontError> {
        let mut out = String::new();
        write!(out, "{}font_{}_{}.bin", self.dir, family, size)
            .map_err(|_| FontError::PathTooLong)?;
        Ok(out)
    }
}

/// First font that failed to load.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FontSetError {
    pub family: &'static str,
    pub size: u8,
    pub error: FontError,
}

impl fmt::Display for FontSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}px: {}", self.family, self.size, self.error)
    }
}

/// Every family at every zoom size, with an active selection.
#[derive(Debug)]
pub struct FontSet {
    config: FontSetConfig,
    fonts: Vec<Font>,
    family: usize,
    zoom: usize,
}

impl FontSet {
    pub fn load<S: ByteStore>(store: &S, config: FontSetConfig) -> Result<Self, FontSetError> {
        let mut fonts = Vec::with_capacity(config.families.len() * config.sizes.len());
        for (family_idx, &family) in config.families.iter().enumerate() {
            for &size in config.sizes {
                let font = config
                    .path(family_idx, size)
                    .and_then(|path| Font::load(store, &path))
                    .map_err(|error| FontSetError {
                        family,
                        size,
                        error,
                    })?;
                fonts.push(font);
            }
        }

        info!(
            "font set: {} families x {} sizes loaded",
            config.families.len(),
            config.sizes.len()
        );

        let mut set = Self {
            config,
            fonts,
            family: 0,
            zoom: 0,
        };
        set.select_family(config.default_family);
        set.select_zoom(config.default_zoom);
        Ok(set)
    }

    pub fn config(&self) -> &FontSetConfig {
        &self.config
    }

    pub fn family(&self) -> usize {
        self.family
    }

    pub fn family_name(&self) -> &'static str {
        self.config.families.get(self.family).copied().unwrap_or("")
    }

    pub fn zoom(&self) -> usize {
        self.zoom
    }

    pub fn zoom_size(&self) -> u8 {
        self.config.sizes.get(self.zoom).copied().unwrap_or(0)
    }

    /// Clamps to the last family.
    pub fn select_family(&mut self, family: usize) {
        self.family = family.min(self.config.families.len().saturating_sub(1));
    }

    /// Clamps to the largest size.
    pub fn select_zoom(&mut self, zoom: usize) {
        self.zoom = zoom.min(self.config.sizes.len().saturating_sub(1));
    }

    pub fn zoom_in(&mut self) -> bool {
        let before = self.zoom;
        self.select_zoom(self.zoom + 1);
        self.zoom != before
    }

    pub fn zoom_out(&mut self) -> bool {
        let before = self.zoom;
        self.select_zoom(self.zoom.saturating_sub(1));
        self.zoom != before
    }

    pub fn get(&self, family: usize, zoom: usize) -> Option<&Font> {
        if family >= self.config.families.len() || zoom >= self.config.sizes.len() {
            return None;
        }
        self.fonts.get(family * self.config.sizes.len() + zoom)
    }

    /// Active font, `None` only for an empty configuration.
    pub fn active(&self) -> Option<&Font> {
        self.get(self.family, self.zoom)
    }
}
