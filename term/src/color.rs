//! Color model for styled cells.
//!
//! A [`Color`] is a tagged variant rather than a plain RGB triple so that
//! "use whatever the display considers default" stays distinguishable from
//! any concrete color all the way through rendering.

/// A cell foreground or background color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Color {
    /// Use the display's default foreground or background.
    #[default]
    Default,
    /// ANSI 16-color palette index, 0..=15.
    Standard(u8),
    /// 256-color palette index.
    Palette256(u8),
    /// Truecolor RGB.
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    /// Resolves `Default` to an opaque stand-in so blending always has a
    /// concrete RGB triple to work with. Indexed colors are left to the
    /// display driver to resolve against its palette; callers that need a
    /// guaranteed RGB value for indexed colors must resolve them upstream.
    fn as_rgb_or(self, default: (u8, u8, u8)) -> (u8, u8, u8) {
        match self {
            Color::Default => default,
            Color::Rgb { r, g, b } => (r, g, b),
            Color::Standard(i) => standard_rgb(i),
            Color::Palette256(i) => palette256_rgb(i),
        }
    }
}

/// Fixed RGB values for the 16 standard ANSI colors, used only when a blend
/// needs a concrete triple (the core never uses this table for rendering
/// otherwise — that stays the display driver's job).
fn standard_rgb(index: u8) -> (u8, u8, u8) {
    const TABLE: [(u8, u8, u8); 16] = [
        (0, 0, 0),
        (205, 0, 0),
        (0, 205, 0),
        (205, 205, 0),
        (0, 0, 238),
        (205, 0, 205),
        (0, 205, 205),
        (229, 229, 229),
        (127, 127, 127),
        (255, 0, 0),
        (0, 255, 0),
        (255, 255, 0),
        (92, 92, 255),
        (255, 0, 255),
        (0, 255, 255),
        (255, 255, 255),
    ];
    TABLE[(index & 0x0f) as usize]
}

/// 256-color palette: 0..16 standard, 16..232 the 6x6x6 cube, 232..256 grayscale.
fn palette256_rgb(index: u8) -> (u8, u8, u8) {
    match index {
        0..=15 => standard_rgb(index),
        16..=231 => {
            let i = index - 16;
            let r = i / 36;
            let g = (i % 36) / 6;
            let b = i % 6;
            let scale = |c: u8| if c == 0 { 0 } else { 55 + c * 40 };
            (scale(r), scale(g), scale(b))
        }
        232..=255 => {
            let level = 8 + (index - 232) * 10;
            (level, level, level)
        }
    }
}

/// Mixes `base` and `overlay` linearly, `t=0` yielding `base` and `t=1`
/// yielding `overlay`. `Default` resolves to opaque black when used as a
/// background, opaque white when used as a foreground.
pub fn blend(base: Color, overlay: Color, t: f32, as_foreground: bool) -> Color {
    let t = t.clamp(0.0, 1.0);
    let default = if as_foreground {
        (255, 255, 255)
    } else {
        (0, 0, 0)
    };
    let (br, bg, bb) = base.as_rgb_or(default);
    let (or, og, ob) = overlay.as_rgb_or(default);
    let mix = |a: u8, b: u8| -> u8 {
        let a = a as f32;
        let b = b as f32;
        (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
    };
    Color::Rgb {
        r: mix(br, or),
        g: mix(bg, og),
        b: mix(bb, ob),
    }
}

/// Converts an HSV color to RGB using the standard 6-sector decomposition.
///
/// `angle_rad` wraps freely (it is reduced mod 2π); `saturation` and `value`
/// are clamped to `[0,1]`.
pub fn hsv_to_rgb(angle_rad: f32, saturation: f32, value: f32) -> Color {
    use std::f32::consts::TAU;
    let s = saturation.clamp(0.0, 1.0);
    let v = value.clamp(0.0, 1.0);
    let h = angle_rad.rem_euclid(TAU) / TAU * 6.0;
    let sector = h.floor() as i32 % 6;
    let f = h - h.floor();

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    let scale = |c: f32| (c * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::Rgb {
        r: scale(r),
        g: scale(g),
        b: scale(b),
    }
}
