use crate::color::Rgb;
use crate::math::{
    calculate_light_intensity, calculate_rim, dot, edge_function, normalize, sub, Vec3,
};
use crate::vertex::Vertex;

/// Color and depth buffers for one rendered frame
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
    z_buffer: Vec<f64>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Framebuffer {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
            z_buffer: vec![f64::INFINITY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn clear(&mut self, background: Rgb) {
        self.pixels.fill(background);
        self.z_buffer.fill(f64::INFINITY);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    pub fn depth(&self, x: usize, y: usize) -> f64 {
        self.z_buffer[y * self.width + x]
    }
}

/// Lighting parameters shared by every pixel of a surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shading {
    pub base_color: Rgb,
    pub light_pos: Vec3,
    /// Viewer position in view space
    pub eye: Vec3,
    /// Emissive floor added to the diffuse term
    pub emissive: f64,
    pub rim_color: Rgb,
    pub rim_intensity: f64,
    pub fog_color: Rgb,
    pub fog_density: f64,
}

impl Shading {
    /// Shades one surface point
    pub fn shade(&self, position: &Vec3, normal: &Vec3) -> Rgb {
        let offset = sub(&self.eye, position);
        let distance = dot(&offset, &offset).sqrt();
        let to_eye = normalize(&offset);
        // Two-sided: light whichever side faces the viewer
        let normal = if dot(normal, &to_eye) < 0.0 {
            [-normal[0], -normal[1], -normal[2]]
        } else {
            *normal
        };

        let diffuse = calculate_light_intensity(&normal, position, &self.light_pos, 0.0);
        let rim = calculate_rim(&normal, &to_eye) * self.rim_intensity;
        let lit = self
            .base_color
            .scale(diffuse + self.emissive)
            .add(self.rim_color.scale(rim * 0.5))
            .clamped();

        let fog = 1.0 - (-(self.fog_density * distance).powi(2)).exp();
        lit.lerp(self.fog_color, fog.clamp(0.0, 1.0))
    }
}

/// Draws a triangle with per-pixel lighting, accepting either winding
pub fn draw_triangle(
    v0: &Vertex,
    v1: &Vertex,
    v2: &Vertex,
    frame: &mut Framebuffer,
    shading: &Shading,
) {
    if frame.is_empty() {
        return;
    }
    let (width, height) = (frame.width, frame.height);

    // Compute bounding box of the triangle
    let min_x = v0.screen_position[0]
        .min(v1.screen_position[0])
        .min(v2.screen_position[0])
        .floor()
        .max(0.0) as usize;
    let max_x = v0.screen_position[0]
        .max(v1.screen_position[0])
        .max(v2.screen_position[0])
        .ceil()
        .min(width as f64 - 1.0);
    let min_y = v0.screen_position[1]
        .min(v1.screen_position[1])
        .min(v2.screen_position[1])
        .floor()
        .max(0.0) as usize;
    let max_y = v0.screen_position[1]
        .max(v1.screen_position[1])
        .max(v2.screen_position[1])
        .ceil()
        .min(height as f64 - 1.0);
    if max_x < 0.0 || max_y < 0.0 {
        return;
    }
    let (max_x, max_y) = (max_x as usize, max_y as usize);

    let area = edge_function(&v0.screen_position, &v1.screen_position, &v2.screen_position);
    if area == 0.0 {
        return;
    }

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = [x as f64 + 0.5, y as f64 + 0.5];

            // Dividing by the signed area makes the weights positive inside
            // for both windings
            let w0 = edge_function(&v1.screen_position, &v2.screen_position, &p) / area;
            let w1 = edge_function(&v2.screen_position, &v0.screen_position, &p) / area;
            let w2 = edge_function(&v0.screen_position, &v1.screen_position, &p) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            let interpolate = |axis: usize, a: &Vec3, b: &Vec3, c: &Vec3| {
                a[axis] * w0 + b[axis] * w1 + c[axis] * w2
            };
            let position = [
                interpolate(0, &v0.position, &v1.position, &v2.position),
                interpolate(1, &v0.position, &v1.position, &v2.position),
                interpolate(2, &v0.position, &v1.position, &v2.position),
            ];

            let offset = y * width + x;
            if position[2] < frame.z_buffer[offset] {
                frame.z_buffer[offset] = position[2];
                let normal = normalize(&[
                    interpolate(0, &v0.normal, &v1.normal, &v2.normal),
                    interpolate(1, &v0.normal, &v1.normal, &v2.normal),
                    interpolate(2, &v0.normal, &v1.normal, &v2.normal),
                ]);
                frame.pixels[offset] = shading.shade(&position, &normal);
            }
        }
    }
}

/// Draws a line between two points using Bresenham's algorithm
pub fn draw_line(from: [f64; 2], to: [f64; 2], frame: &mut Framebuffer, color: Rgb) {
    let (width, height) = (frame.width as isize, frame.height as isize);
    let (mut x0, mut y0, x1, y1) = (
        from[0].round() as isize,
        from[1].round() as isize,
        to[0].round() as isize,
        to[1].round() as isize,
    );
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if x0 >= 0 && x0 < width && y0 >= 0 && y0 < height {
            frame.pixels[(y0 * width + x0) as usize] = color;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// A character painted over the rendered image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub color: Rgb,
}

/// Character grid drawn on top of the framebuffer, one slot per terminal cell
#[derive(Debug, Clone)]
pub struct Overlay {
    columns: usize,
    rows: usize,
    cells: Vec<Option<Glyph>>,
}

impl Overlay {
    pub fn new(columns: usize, rows: usize) -> Self {
        Overlay {
            columns,
            rows,
            cells: vec![None; columns * rows],
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    pub fn glyph(&self, column: usize, row: usize) -> Option<Glyph> {
        self.cells[row * self.columns + column]
    }

    /// Writes `text` starting at a cell, clipping at the edges
    pub fn put_text(&mut self, column: isize, row: isize, text: &str, color: Rgb) {
        if row < 0 || row as usize >= self.rows {
            return;
        }
        for (i, ch) in text.chars().enumerate() {
            let x = column + i as isize;
            if x < 0 {
                continue;
            }
            if x as usize >= self.columns {
                break;
            }
            self.cells[row as usize * self.columns + x as usize] = Some(Glyph { ch, color });
        }
    }

    /// Writes `text` horizontally centered on a cell
    pub fn put_text_centered(&mut self, column: isize, row: isize, text: &str, color: Rgb) {
        let half = text.chars().count() as isize / 2;
        self.put_text(column - half, row, text, color);
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
}
