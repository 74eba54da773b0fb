//! Maps cell state to colors.

use crate::config::ColorMode;

pub const SATURATION: f32 = 80.0;
pub const LIGHTNESS: f32 = 60.0;
pub const ALPHA: f32 = 0.9;

/// A color in HSL space. Hue is in degrees, saturation and lightness in
/// percent, alpha in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
}

impl Hsla {
    pub fn new(hue: f32, lightness: f32) -> Self {
        Hsla {
            hue: hue.rem_euclid(360.0),
            saturation: SATURATION,
            lightness,
            alpha: ALPHA,
        }
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Hsla { alpha, ..self }
    }

    /// Converts to 8-bit RGBA.
    pub fn to_rgba(self) -> [u8; 4] {
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);
        let h = self.hue.rem_euclid(360.0) / 60.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let byte = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;

        [
            byte(r),
            byte(g),
            byte(b),
            (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

/// Color of a live 2D cell.
///
/// `neighbors` only matters in [`ColorMode::Density`] and `cycle_hue` only
/// in [`ColorMode::Cycle`].
pub fn color_for(mode: ColorMode, base_hue: f32, age: u8, neighbors: u8, cycle_hue: u16) -> Hsla {
    match mode {
        ColorMode::Classic => Hsla::new(base_hue, LIGHTNESS),
        ColorMode::Age => {
            let lightness = if age == 1 {
                85.0
            } else {
                (70.0 - age as f32).max(40.0)
            };
            Hsla::new(base_hue + age as f32 * 8.0, lightness)
        }
        ColorMode::Density => Hsla::new(
            base_hue - neighbors as f32 * 25.0,
            40.0 + neighbors as f32 * 5.0,
        ),
        ColorMode::Cycle => Hsla::new(cycle_hue as f32, LIGHTNESS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn classic_uses_base_hue() {
        let c = color_for(ColorMode::Classic, 200.0, 17, 4, 90);
        assert_eq!(c.hue, 200.0);
        assert_eq!(c.lightness, 60.0);
        assert_eq!(c.saturation, 80.0);
        assert_eq!(c.alpha, 0.9);
    }

    #[test_log::test]
    fn age_shifts_hue_and_darkens() {
        let newborn = color_for(ColorMode::Age, 100.0, 1, 0, 0);
        assert_eq!(newborn.hue, 108.0);
        assert_eq!(newborn.lightness, 85.0);

        let young = color_for(ColorMode::Age, 100.0, 10, 0, 0);
        assert_eq!(young.hue, 180.0);
        assert_eq!(young.lightness, 60.0);

        let old = color_for(ColorMode::Age, 350.0, 100, 0, 0);
        assert_eq!(old.hue, (350.0 + 800.0) % 360.0);
        assert_eq!(old.lightness, 40.0);
    }

    #[test_log::test]
    fn density_hue_wraps_below_zero() {
        let c = color_for(ColorMode::Density, 10.0, 1, 1, 0);
        assert_eq!(c.hue, 345.0);
        assert_eq!(c.lightness, 45.0);

        let crowded = color_for(ColorMode::Density, 10.0, 1, 8, 0);
        assert_eq!(crowded.hue, 170.0);
        assert_eq!(crowded.lightness, 80.0);
    }

    #[test_log::test]
    fn cycle_ignores_base_hue() {
        let c = color_for(ColorMode::Cycle, 10.0, 5, 5, 273);
        assert_eq!(c.hue, 273.0);
        assert_eq!(c.lightness, 60.0);
    }

    #[test_log::test]
    fn same_inputs_same_color() {
        for mode in [ColorMode::Classic, ColorMode::Age, ColorMode::Density, ColorMode::Cycle] {
            let a = color_for(mode, 123.0, 42, 3, 77);
            let b = color_for(mode, 123.0, 42, 3, 77);
            assert_eq!(a, b);
            assert_eq!(a.to_rgba(), b.to_rgba());
        }
    }

    #[test_log::test]
    fn rgba_conversion() {
        let red = Hsla {
            hue: 0.0,
            saturation: 100.0,
            lightness: 50.0,
            alpha: 1.0,
        };
        assert_eq!(red.to_rgba(), [255, 0, 0, 255]);

        let blue = Hsla { hue: 240.0, ..red };
        assert_eq!(blue.to_rgba(), [0, 0, 255, 255]);

        let muted = Hsla::new(0.0, 60.0);
        assert_eq!(muted.to_rgba()[..3], [235, 71, 71]);
    }
}
