//! Color palettes shared by the reading and lookup views.

use dualscreen_fb::Rgb15;

/// What a piece of ink is for; the palette decides its color.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    Background,
    Text,
    /// Line numbers, rules and secondary labels.
    Number,
    Highlight,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Palette {
    pub bg: Rgb15,
    pub text: Rgb15,
    pub num: Rgb15,
    pub hl: Rgb15,
}

impl Default for Palette {
    fn default() -> Self {
        Self::DARK
    }
}

impl Palette {
    pub const DARK: Self = Self::from_raw(0x8000, 0xFFFF, 0xAD6B, 0xFBE0);
    pub const LIGHT: Self = Self::from_raw(0xFFFF, 0x8000, 0x94A5, 0x801F);
    pub const SEPIA: Self = Self::from_raw(0x9EF7, 0x8842, 0x9109, 0x819F);

    pub const PRESETS: [(&'static str, Self); 3] = [
        ("Dark", Self::DARK),
        ("Light", Self::LIGHT),
        ("Sepia", Self::SEPIA),
    ];

    pub const fn from_raw(bg: u16, text: u16, num: u16, hl: u16) -> Self {
        Self {
            bg: Rgb15::from_raw(bg),
            text: Rgb15::from_raw(text),
            num: Rgb15::from_raw(num),
            hl: Rgb15::from_raw(hl),
        }
    }

    /// Preset by case-insensitive name.
    pub fn named(name: &str) -> Option<Self> {
        Self::PRESETS
            .iter()
            .find(|(preset, _)| preset.eq_ignore_ascii_case(name))
            .map(|(_, palette)| *palette)
    }

    pub fn color(&self, role: Role) -> Rgb15 {
        match role {
            Role::Background => self.bg,
            Role::Text => self.text,
            Role::Number => self.num,
            Role::Highlight => self.hl,
        }
    }

    /// Panel fill: three parts background, one part `num`.
    pub fn panel_bg(&self) -> Rgb15 {
        blend(self.bg, self.num, 3)
    }

    /// Button fill: background and `num` in equal parts.
    pub fn button_bg(&self) -> Rgb15 {
        blend(self.bg, self.num, 1)
    }
}

/// Per-channel `(a * weight + b) / (weight + 1)`.
fn blend(a: Rgb15, b: Rgb15, weight: i32) -> Rgb15 {
    let (ar, ag, ab) = a.channels();
    let (br, bg, bb) = b.channels();
    let mix = |x: u8, y: u8| (x as i32 * weight + y as i32) / (weight + 1);
    Rgb15::compose(mix(ar, br), mix(ag, bg), mix(ab, bb))
}
