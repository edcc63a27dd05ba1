use std::path::Path;

use cgmath::prelude::*;
use cgmath::{Matrix4, Point2, Point3, Vector2};
use image::{ImageBuffer, Rgb, RgbImage};
use tracing::trace;

use super::error::Result;
use super::transform;

pub const ROPE_COLOR: Rgb<u8> = Rgb([20, 120, 190]);
pub const BACKGROUND: Rgb<u8> = Rgb([31, 31, 36]);

/// Half the edge length of the cube drawn at each node, in world units.
pub const NODE_HALF_SIZE: f32 = 6.;

/// Headless stand-in for the on-screen view: draws each node as a square and
/// joins neighbours with a line.
pub struct Canvas {
    img: RgbImage,
    projection: Matrix4<f32>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let img = ImageBuffer::from_pixel(width, height, BACKGROUND);
        let projection = transform::projection(width as f32, height as f32, width as f32);
        Canvas {img, projection}
    }

    pub fn image(&self) -> &RgbImage {
        &self.img
    }

    pub fn draw_chain(&mut self, model_views: &[Matrix4<f32>], color: Rgb<u8>) {
        let points: Vec<_> = model_views.iter()
            .map(|&m| self.to_screen(m.transform_point(Point3::origin())))
            .collect();

        points.iter().zip(points.iter().skip(1))
            .for_each(|(&start, &end)| rasterize_line(&mut self.img, start, end, color));

        let half = self.pixel_scale() * NODE_HALF_SIZE;
        for &p in points.iter() {
            fill_square(&mut self.img, p, half, color);
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.img.save(path)?;
        Ok(())
    }

    /// Pixels per world unit along X.
    fn pixel_scale(&self) -> f32 {
        self.projection.x.x * self.img.width().saturating_sub(1) as f32 / 2.
    }

    fn to_screen(&self, world: Point3<f32>) -> Point2<f32> {
        let clip = self.projection.transform_point(world);
        let w = self.img.width().saturating_sub(1) as f32;
        let h = self.img.height().saturating_sub(1) as f32;
        // Image rows grow downward while clip-space Y grows upward
        Point2::new((clip.x + 1.) / 2. * w, (1. - clip.y) / 2. * h)
    }
}

fn on_image(img: &RgbImage, p: Point2<f32>) -> bool {
    p.x >= 0. && p.y >= 0. && p.x <= img.width().saturating_sub(1) as f32 && p.y <= img.height().saturating_sub(1) as f32
}

fn rasterize_line(mut img: &mut RgbImage, start: Point2<f32>, end: Point2<f32>, color: Rgb<u8>) {
    if !on_image(img, start) && !on_image(img, end) {
        trace!("both clipped! ({}, {}), ({}, {})", start.x, start.y, end.x, end.y);
        return;
    }

    // Lerp from start to end by number of pixels across the widest dimension
    let max_dim = (end.x - start.x).abs().max((end.y - start.y).abs()).ceil() as u32;
    let start_p = start.to_vec();
    let end_p = end.to_vec();
    for i in 0..=max_dim {
        let i_f = if max_dim == 0 {0.} else {i as f32 / max_dim as f32};
        let p = start_p.lerp(end_p, i_f);
        safe_put_pixel(&mut img, p, color);
    }
}

fn fill_square(mut img: &mut RgbImage, center: Point2<f32>, half: f32, color: Rgb<u8>) {
    let half = half.max(0.5);
    let min = center - Vector2::new(half, half);
    let n = (half * 2.).ceil() as u32;
    for j in 0..=n {
        for k in 0..=n {
            safe_put_pixel(&mut img, min.to_vec() + Vector2::new(k as f32, j as f32), color);
        }
    }
}

fn safe_put_pixel(img: &mut RgbImage, p: Vector2<f32>, rgb: Rgb<u8>) {
    if p.x < 0. || p.y < 0. {
        return;
    }
    let (x, y) = (p.x as u32, p.y as u32);
    if x < img.width() && y < img.height() {
        img.put_pixel(x, y, rgb);
    }
}
