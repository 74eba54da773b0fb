/// A raster the renderer paints onto. Only whole-surface fills and filled
/// rectangles are needed.
pub trait PixelSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Blends `color` over the rectangle, clipped to the surface.
    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: [u8; 4]);

    fn fill(&mut self, color: [u8; 4]) {
        let (w, h) = (self.width(), self.height());
        self.fill_rect(0, 0, w, h, color);
    }

    fn clear(&mut self) {
        self.fill([0, 0, 0, 0xff]);
    }
}

/// An RGBA8 frame buffer, such as the one `pixels` hands out.
pub struct FrameSurface<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> FrameSurface<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        debug_assert_eq!(frame.len(), 4 * width as usize * height as usize);
        Self {
            frame,
            width,
            height,
        }
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = 4 * (y as usize * self.width as usize + x as usize);
        let mut out = [0; 4];
        out.copy_from_slice(&self.frame[i..i + 4]);
        out
    }
}

/// Source-over blend onto an opaque destination.
fn blend(dst: &mut [u8], src: [u8; 4]) {
    let a = src[3] as u32;
    let inv = 255 - a;
    for (d, s) in dst.iter_mut().zip(src.iter()).take(3) {
        *d = ((*s as u32 * a + *d as u32 * inv + 127) / 255) as u8;
    }
    dst[3] = 0xff;
}

impl PixelSurface for FrameSurface<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: [u8; 4]) {
        let x0 = x.min(self.width) as usize;
        let x1 = x.saturating_add(w).min(self.width) as usize;
        let y0 = y.min(self.height) as usize;
        let y1 = y.saturating_add(h).min(self.height) as usize;
        if x0 == x1 || color[3] == 0 {
            return;
        }

        let stride = 4 * self.width as usize;
        for row in self.frame.chunks_exact_mut(stride).take(y1).skip(y0) {
            for pix in row[4 * x0..4 * x1].chunks_exact_mut(4) {
                blend(pix, color);
            }
        }
    }
}
