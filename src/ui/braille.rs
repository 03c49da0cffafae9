/// Braille canvas for high-resolution terminal rendering
/// Each terminal cell contains a 2×4 grid of Braille dots
/// This gives us 2× horizontal and 4× vertical resolution
use super::renderer::Rgb;

pub struct BrailleCanvas {
    width: usize,       // Width in terminal cells
    height: usize,      // Height in terminal cells
    dots: Vec<Vec<u8>>, // Dot pattern per cell (0-255)
    colors: Vec<Vec<Option<Rgb>>>, // Last color drawn into each cell
}

impl BrailleCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            dots: vec![vec![0; width]; height],
            colors: vec![vec![None; width]; height],
        }
    }

    /// Width in terminal cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in terminal cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get width in pixels (2 per cell)
    pub fn pixel_width(&self) -> usize {
        self.width * 2
    }

    /// Get height in pixels (4 per cell)
    pub fn pixel_height(&self) -> usize {
        self.height * 4
    }

    /// Set a dot at pixel coordinates; out-of-range pixels are dropped
    pub fn set_pixel(&mut self, pixel_x: i64, pixel_y: i64, color: Rgb) {
        if pixel_x < 0 || pixel_y < 0 {
            return;
        }
        let (pixel_x, pixel_y) = (pixel_x as usize, pixel_y as usize);
        let cell_x = pixel_x / 2;
        let cell_y = pixel_y / 4;

        if cell_x >= self.width || cell_y >= self.height {
            return;
        }

        // Braille dot numbering:
        // 1 4
        // 2 5
        // 3 6
        // 7 8
        let dot_index = match (pixel_x % 2, pixel_y % 4) {
            (0, 0) => 0,
            (0, 1) => 1,
            (0, 2) => 2,
            (0, 3) => 6,
            (1, 0) => 3,
            (1, 1) => 4,
            (1, 2) => 5,
            (1, 3) => 7,
            _ => unreachable!(),
        };

        self.dots[cell_y][cell_x] |= 1 << dot_index;
        self.colors[cell_y][cell_x] = Some(color);
    }

    /// Fill a rectangle with pixels
    pub fn fill_rect(&mut self, x: i64, y: i64, width: i64, height: i64, color: Rgb) {
        for py in y..(y + height) {
            for px in x..(x + width) {
                self.set_pixel(px, py, color);
            }
        }
    }

    /// Fill the ellipse inscribed in the given pixel rectangle.
    /// Always sets at least the center dot so tiny shapes stay visible.
    pub fn fill_ellipse(&mut self, x: i64, y: i64, width: i64, height: i64, color: Rgb) {
        let rx = width as f32 / 2.0;
        let ry = height as f32 / 2.0;
        let cx = x as f32 + rx;
        let cy = y as f32 + ry;

        self.set_pixel(cx as i64, cy as i64, color);
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }

        for py in y..(y + height) {
            for px in x..(x + width) {
                let dx = (px as f32 + 0.5 - cx) / rx;
                let dy = (py as f32 + 0.5 - cy) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    self.set_pixel(px, py, color);
                }
            }
        }
    }

    /// Bresenham line between two pixels (inclusive)
    pub fn draw_line(&mut self, from: (i64, i64), to: (i64, i64), color: Rgb) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x, y, color);
            if x == to.0 && y == to.1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Convert dot pattern to Braille character
    /// Braille Unicode: U+2800 + dot pattern
    pub fn to_char(&self, cell_x: usize, cell_y: usize) -> char {
        if cell_x >= self.width || cell_y >= self.height {
            return ' ';
        }

        let pattern = self.dots[cell_y][cell_x];
        char::from_u32(0x2800 + pattern as u32).unwrap_or(' ')
    }

    pub fn cell_color(&self, cell_x: usize, cell_y: usize) -> Option<Rgb> {
        self.colors
            .get(cell_y)
            .and_then(|row| row.get(cell_x))
            .copied()
            .flatten()
    }
}
