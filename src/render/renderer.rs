use crate::automata::GridStore;
use crate::config::{ColorMode, Config, Mode};
use crate::render::color::{color_for, Hsla, LIGHTNESS};
use crate::render::surface::PixelSurface;

/// Hue drift per 1D history row, in degrees.
const ROW_HUE_STEP: f32 = 0.2;

/// Pixel offset of the cell at `index`, or `None` when it lies past any
/// surface `u32` can address.
fn cell_origin(index: usize, res: u32) -> Option<u32> {
    u32::try_from(index).ok()?.checked_mul(res)
}

/// Paints the store onto `surface`.
///
/// The previous frame is first darkened by a black wash whose opacity is
/// `1 - trails`, which is what leaves fading trails behind moving 2D
/// patterns. Cells are drawn one pixel smaller than the resolution so a
/// grid line stays visible between them. Reads the store, never changes it.
pub fn draw<S: PixelSurface>(surface: &mut S, store: &GridStore, config: &Config) {
    let fade = ((1.0 - config.trails).clamp(0.0, 1.0) * 255.0).round() as u8;
    surface.fill([0, 0, 0, fade]);

    let res = config.resolution;
    let size = res.saturating_sub(1);

    match store.mode() {
        Mode::TwoD => {
            for (y, row) in store.cells().iter().enumerate() {
                for (x, cell) in row.iter().enumerate() {
                    if !cell.is_alive() {
                        continue;
                    }
                    let origin = (cell_origin(x, res), cell_origin(y, res));
                    let (Some(px), Some(py)) = origin else {
                        continue;
                    };
                    let neighbors = match config.color_mode {
                        ColorMode::Density => store.live_neighbors(x, y),
                        _ => 0,
                    };
                    let color = color_for(
                        config.color_mode,
                        config.hue,
                        cell.age(),
                        neighbors,
                        store.cycle_hue(),
                    );
                    surface.fill_rect(px, py, size, size, color.to_rgba());
                }
            }
        }
        Mode::OneD => {
            // Older rows fade out; the newest is the most opaque.
            let len = store.history().len() as f32;
            for (i, row) in store.history().iter().enumerate() {
                let Some(py) = cell_origin(i, res) else {
                    break;
                };
                let color = Hsla::new(config.hue + i as f32 * ROW_HUE_STEP, LIGHTNESS)
                    .with_alpha(i as f32 / len)
                    .to_rgba();
                for (x, &alive) in row.iter().enumerate() {
                    if let (true, Some(px)) = (alive, cell_origin(x, res)) {
                        surface.fill_rect(px, py, size, size, color);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::FrameSurface;

    const BLACK: [u8; 4] = [0, 0, 0, 255];

    fn store_2d(cols: u32, rows: u32, res: u32, live: &[(isize, isize)]) -> GridStore {
        let mut store = GridStore::with_seed((1, 2));
        store.initialize(Mode::TwoD, res, (cols * res, rows * res));
        store.clear();
        for &(x, y) in live {
            store.toggle_cell(Mode::TwoD, (x * res as isize, y * res as isize), res);
        }
        store
    }

    #[test_log::test]
    fn live_cell_leaves_grid_gap() {
        let config = Config {
            resolution: 4,
            trails: 0.0,
            color_mode: ColorMode::Classic,
            ..Config::default()
        };
        let store = store_2d(3, 3, 4, &[(1, 1)]);
        let mut buf = vec![0xff; 4 * 12 * 12];
        let mut surface = FrameSurface::new(&mut buf, 12, 12);
        draw(&mut surface, &store, &config);

        assert_eq!(surface.pixel(0, 0), BLACK);
        assert_ne!(surface.pixel(4, 4), BLACK);
        assert_eq!(surface.pixel(4, 4), surface.pixel(6, 6));
        assert_eq!(surface.pixel(7, 7), BLACK);
        assert_eq!(surface.pixel(7, 4), BLACK);
    }

    #[test_log::test]
    fn cell_color_matches_mapper() {
        let config = Config {
            resolution: 2,
            trails: 0.0,
            color_mode: ColorMode::Classic,
            hue: 120.0,
            ..Config::default()
        };
        let store = store_2d(2, 2, 2, &[(0, 0)]);
        let mut buf = vec![0; 4 * 4 * 4];
        let mut surface = FrameSurface::new(&mut buf, 4, 4);
        draw(&mut surface, &store, &config);

        let [r, g, b, a] = color_for(ColorMode::Classic, 120.0, 1, 0, 0).to_rgba();
        let over_black = |c: u8| ((c as u32 * a as u32 + 127) / 255) as u8;
        assert_eq!(
            surface.pixel(0, 0),
            [over_black(r), over_black(g), over_black(b), 255]
        );
    }

    #[test_log::test]
    fn trails_keep_part_of_previous_frame() {
        let config = Config {
            resolution: 1,
            trails: 0.5,
            ..Config::default()
        };
        let store = store_2d(2, 2, 1, &[]);
        let mut buf = vec![255; 4 * 2 * 2];
        let mut surface = FrameSurface::new(&mut buf, 2, 2);
        draw(&mut surface, &store, &config);
        assert_eq!(surface.pixel(1, 1), [127, 127, 127, 255]);
    }

    #[test_log::test]
    fn density_mode_colors_by_neighbors() {
        let config = Config {
            resolution: 3,
            trails: 0.0,
            color_mode: ColorMode::Density,
            hue: 200.0,
            ..Config::default()
        };
        // Lone cell at (0,0), crowded cell at (4,4).
        let store = store_2d(7, 7, 3, &[(0, 0), (4, 4), (3, 4), (5, 4), (4, 3)]);
        let mut buf = vec![0; 4 * 21 * 21];
        let mut surface = FrameSurface::new(&mut buf, 21, 21);
        draw(&mut surface, &store, &config);
        assert_ne!(surface.pixel(0, 0), surface.pixel(12, 12));
    }

    #[test_log::test]
    fn one_d_rows_fade_with_age() {
        let config = Config {
            mode: Mode::OneD,
            rule: 90,
            resolution: 2,
            trails: 0.0,
            ..Config::default()
        };
        let mut store = GridStore::with_seed((1, 2));
        store.initialize(Mode::OneD, 2, (14, 8));
        for _ in 0..3 {
            store.step(&config);
        }
        assert_eq!(store.history().len(), 4);

        let mut buf = vec![0; 4 * 14 * 8];
        let mut surface = FrameSurface::new(&mut buf, 14, 8);
        draw(&mut surface, &store, &config);

        let over_black = |rgba: [u8; 4]| {
            let a = rgba[3] as u32;
            let mut out = [0, 0, 0, 255];
            for (o, &c) in out.iter_mut().zip(rgba.iter()).take(3) {
                *o = ((c as u32 * a + 127) / 255) as u8;
            }
            out
        };
        let row_color = |i: usize| {
            Hsla::new(config.hue + i as f32 * ROW_HUE_STEP, LIGHTNESS)
                .with_alpha(i as f32 / 4.0)
                .to_rgba()
        };

        // Oldest row is fully transparent.
        assert_eq!(surface.pixel(6, 0), BLACK);
        // Row 1 is live at cells 2 and 4; row 3 at cells 0, 2, 4, 6.
        assert_eq!(surface.pixel(4, 2), over_black(row_color(1)));
        assert_eq!(surface.pixel(4, 6), over_black(row_color(3)));
        assert_eq!(surface.pixel(0, 6), over_black(row_color(3)));
        assert_ne!(surface.pixel(4, 2), surface.pixel(4, 6));
        // Dead cells in a live row stay black.
        assert_eq!(surface.pixel(2, 6), BLACK);
    }

    #[test_log::test]
    fn cells_past_u32_pixels_are_skipped() {
        let config = Config {
            resolution: u32::MAX,
            trails: 0.0,
            color_mode: ColorMode::Classic,
            ..Config::default()
        };
        let store = store_2d(4, 4, 1, &[(0, 0), (3, 3)]);
        let mut buf = vec![0; 4 * 4 * 4];
        let mut surface = FrameSurface::new(&mut buf, 4, 4);
        draw(&mut surface, &store, &config);
        assert_ne!(surface.pixel(3, 3), BLACK);
        assert_ne!(surface.pixel(0, 0), BLACK);
    }
}
