use crate::font;
use life_grid::Grid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Strictly inside: points on the border are not contained.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x > self.x && x < self.right() && y > self.y && y < self.bottom()
    }

    pub fn inset(&self, amount: u32) -> Rect {
        Rect::new(
            self.x + amount,
            self.y + amount,
            self.width.saturating_sub(2 * amount),
            self.height.saturating_sub(2 * amount),
        )
    }
}

/// An RGBA frame buffer, four bytes per pixel, row-major. Drawing outside the
/// frame is clipped.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        assert_eq!(
            frame.len(),
            4 * width as usize * height as usize,
            "frame does not hold {width}x{height} pixels"
        );
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixel_index(x, y).map(|index| {
            let mut color = [0; 4];
            color.copy_from_slice(&self.frame[index..index + 4]);
            color
        })
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if let Some(index) = self.pixel_index(x, y) {
            self.frame[index..index + 4].copy_from_slice(&color);
        }
    }

    pub fn fill(&mut self, color: [u8; 4]) {
        for pixel in self.frame.chunks_exact_mut(4) {
            pixel.copy_from_slice(&color);
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: [u8; 4]) {
        let right = rect.right().min(self.width);
        let bottom = rect.bottom().min(self.height);
        for y in rect.y..bottom {
            for x in rect.x..right {
                self.put_pixel(x, y, color);
            }
        }
    }

    pub fn draw_text(&mut self, x: u32, y: u32, text: &str, color: [u8; 4]) {
        font::for_lit_pixels(text, |dx, dy| self.put_pixel(x + dx, y + dy, color));
    }

    /// Draws `text` centered in `rect`. Text wider than `rect` starts at its left edge.
    pub fn draw_text_centered(&mut self, rect: Rect, text: &str, color: [u8; 4]) {
        let x = rect.x + rect.width.saturating_sub(font::text_width(text)) / 2;
        let y = rect.y + rect.height.saturating_sub(font::GLYPH_HEIGHT) / 2;
        self.draw_text(x, y, text, color);
    }

    /// Each cell is a `cell_pixel_width` square block with a one-pixel gutter on every
    /// side, so whatever was under the grid shows between cells.
    pub fn paint_grid(
        &mut self,
        grid: &Grid,
        cell_pixel_width: u32,
        alive_color: [u8; 4],
        dead_color: [u8; 4],
    ) {
        for loc in grid.locs() {
            let block = Rect::new(
                loc.col * cell_pixel_width,
                loc.row * cell_pixel_width,
                cell_pixel_width,
                cell_pixel_width,
            );
            let color = if grid[loc] { alive_color } else { dead_color };
            self.fill_rect(block.inset(1), color);
        }
    }

    fn pixel_index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(4 * (y as usize * self.width as usize + x as usize))
        } else {
            None
        }
    }
}
