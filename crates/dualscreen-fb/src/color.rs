//! 16-bit panel color encoding.

/// Channel bits per component.
pub const CHANNEL_MAX: u8 = 0x1F;

/// 15-bit BGR color with the top bit used as the opaque flag.
///
/// Bit layout: `A BBBBB GGGGG RRRRR`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Rgb15(pub u16);

impl Rgb15 {
    /// Opaque flag bit.
    pub const ALPHA: u16 = 0x8000;

    pub const WHITE: Self = Self(0xFFFF);
    pub const BLACK: Self = Self(0x8000);
    pub const YELLOW: Self = Self(0x83FF);
    pub const CYAN: Self = Self(0xFBE0);
    pub const RED: Self = Self(0x801F);
    pub const GREY: Self = Self(0xAD6B);
    pub const DARK_GREY: Self = Self(0x94A5);
    pub const DARK_NAVY: Self = Self(0x9C00);

    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Builds an opaque color from 5-bit channels, clamping each to `0..=31`.
    pub fn compose(r: i32, g: i32, b: i32) -> Self {
        let r = r.clamp(0, CHANNEL_MAX as i32) as u16;
        let g = g.clamp(0, CHANNEL_MAX as i32) as u16;
        let b = b.clamp(0, CHANNEL_MAX as i32) as u16;
        Self(Self::ALPHA | (b << 10) | (g << 5) | r)
    }

    /// Returns `(r, g, b)` 5-bit channels.
    pub const fn channels(self) -> (u8, u8, u8) {
        (
            (self.0 & 0x1F) as u8,
            ((self.0 >> 5) & 0x1F) as u8,
            ((self.0 >> 10) & 0x1F) as u8,
        )
    }

    /// Expands to 8-bit channels for host-side export.
    pub const fn to_rgb888(self) -> [u8; 3] {
        let (r, g, b) = self.channels();
        [expand5(r), expand5(g), expand5(b)]
    }
}

const fn expand5(c: u8) -> u8 {
    (c << 3) | (c >> 2)
}
