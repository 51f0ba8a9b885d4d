use crate::error::{EnvironmentError, Result};
use glam::Vec3;

/// Row-major RGB float image with its origin at the top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct Image2D {
    width: u32,
    height: u32,
    pixels: Vec<Vec3>,
}

impl Image2D {
    pub fn new(width: u32, height: u32, pixels: Vec<Vec3>) -> Result<Self> {
        if pixels.len() != width as usize * height as usize {
            return Err(EnvironmentError::InvalidPixelCount { width, height, len: pixels.len() });
        }
        Ok(Self { width, height, pixels })
    }

    pub fn filled(width: u32, height: u32, color: Vec3) -> Self {
        Self { width, height, pixels: vec![color; width as usize * height as usize] }
    }

    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Vec3) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self { width, height, pixels }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Vec3] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Vec3 {
        self.pixels[self.index(x, y)]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Vec3) {
        let idx = self.index(x, y);
        self.pixels[idx] = color;
    }

    pub fn row(&self, y: u32) -> &[Vec3] {
        let start = self.index(0, y);
        &self.pixels[start..start + self.width as usize]
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Bilinear lookup at `(u, v)`. Both coordinates wrap to `[0, 1)`, and the right/bottom
    /// neighbours wrap around the image so sampling is seamless across the seam.
    pub fn sample(&self, u: f32, v: f32) -> Vec3 {
        if self.pixels.is_empty() {
            return Vec3::ZERO;
        }
        let fu = u.rem_euclid(1.0) * self.width as f32;
        let fv = v.rem_euclid(1.0) * self.height as f32;
        let u0f = fu.floor();
        let v0f = fv.floor();
        let ku = fu - u0f;
        let kv = fv - v0f;

        // rem_euclid can round up to exactly 1.0 for tiny negative inputs.
        let u0 = (u0f as u32) % self.width;
        let v0 = (v0f as u32) % self.height;
        let u1 = (u0 + 1) % self.width;
        let v1 = (v0 + 1) % self.height;

        let c00 = self.pixel(u0, v0);
        let c10 = self.pixel(u1, v0);
        let c01 = self.pixel(u0, v1);
        let c11 = self.pixel(u1, v1);

        c00 * ((1.0 - ku) * (1.0 - kv)) + c10 * (ku * (1.0 - kv)) + c01 * ((1.0 - ku) * kv) + c11 * (ku * kv)
    }
}
