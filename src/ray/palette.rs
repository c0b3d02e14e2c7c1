use super::constants::PALETTE_CYCLE;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaletteEntry {
    pub main: Vec3,
    pub alt: Vec3,
    pub accent: Vec3,
}

/// sRGB-encoded channel to linear light.
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// `0xRRGGBB` (CSS hex notation) to linear rgb.
///
/// Scene targets hold linear colour and the swapchain re-encodes on store, so
/// the page shows the hex value unchanged.
#[inline]
pub fn hex_rgb(hex: u32) -> Vec3 {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    Vec3::new(channel(16), channel(8), channel(0))
}

const PALETTE_HEX: [[u32; 3]; 3] = [
    [0x051322, 0x0A3D62, 0x1A4A73], // dark navy
    [0x061526, 0x0D3B5C, 0x164267], // cooler
    [0x07162B, 0x0E2F4D, 0x144368], // warmer
];

pub fn palette() -> [PaletteEntry; 3] {
    PALETTE_HEX.map(|[main, alt, accent]| PaletteEntry {
        main: hex_rgb(main),
        alt: hex_rgb(alt),
        accent: hex_rgb(accent),
    })
}

/// Colours shown at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaletteColors {
    /// Ray shader colour slots.
    pub ray: [Vec3; 3],
    pub glow: Vec3,
}

/// Current/next palette indices and the mix between them at `time`.
pub fn cycle_position(time: f64, len: usize) -> (usize, usize, f32) {
    let cycle = time.rem_euclid(f64::from(PALETTE_CYCLE)) as f32 / PALETTE_CYCLE;
    let scaled = cycle * len as f32;
    let index = scaled.floor() as usize % len;
    let next = (index + 1) % len;
    (index, next, scaled.fract())
}

pub fn colors_at(time: f64) -> PaletteColors {
    let entries = palette();
    let (index, next, mix) = cycle_position(time, entries.len());
    let a = entries[index];
    let b = entries[next];
    PaletteColors {
        ray: [
            a.main.lerp(b.main, mix),
            a.alt.lerp(b.alt, mix),
            a.accent.lerp(b.accent, mix),
        ],
        glow: a.alt.lerp(b.alt, mix),
    }
}
