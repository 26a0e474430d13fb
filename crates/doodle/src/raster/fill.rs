//! Scanline bucket fill with tolerance and an anti-alias edge-seal pass.

use image::{Rgb, Rgba, RgbaImage};
use tracing::debug;

use super::color::dist_sq;
use crate::config::fill::{
    DEFAULT_DIAGONALS, DEFAULT_TOLERANCE, MAX_TOLERANCE, SEAL_ALPHA_CUTOFF, SEAL_PASSES,
};
use crate::error::{Error, Result};

/// Parameters of one bucket fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillRequest {
    pub x: u32,
    pub y: u32,
    pub color: Rgb<u8>,
    /// Erase mode fills with fully transparent pixels instead of `color`.
    pub erase: bool,
    tolerance: u8,
    pub diagonals: bool,
}

impl FillRequest {
    pub fn new(x: u32, y: u32, color: Rgb<u8>) -> Self {
        Self {
            x,
            y,
            color,
            erase: false,
            tolerance: DEFAULT_TOLERANCE,
            diagonals: DEFAULT_DIAGONALS,
        }
    }

    /// An erase fill at the given seed.
    pub fn erase(x: u32, y: u32) -> Self {
        Self {
            erase: true,
            ..Self::new(x, y, Rgb([0, 0, 0]))
        }
    }

    /// Set the tolerance, clamped to `MAX_TOLERANCE`.
    pub fn with_tolerance(mut self, tolerance: u8) -> Self {
        self.tolerance = tolerance.min(MAX_TOLERANCE);
        self
    }

    pub fn with_diagonals(mut self, diagonals: bool) -> Self {
        self.diagonals = diagonals;
        self
    }

    pub fn tolerance(&self) -> u8 {
        self.tolerance
    }

    /// The RGBA value written into filled pixels.
    pub fn fill_pixel(&self) -> Rgba<u8> {
        if self.erase {
            Rgba([0, 0, 0, 0])
        } else {
            let [r, g, b] = self.color.0;
            Rgba([r, g, b, 255])
        }
    }
}

/// Pixels written by each phase of a fill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillReport {
    pub filled: usize,
    pub sealed: usize,
}

impl FillReport {
    pub fn is_noop(&self) -> bool {
        self.filled == 0 && self.sealed == 0
    }
}

/// Flat RGBA buffer view shared by the scan and seal phases.
struct Grid<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
    target: Rgba<u8>,
    fill: Rgba<u8>,
    tol_sq: u32,
}

impl Grid<'_> {
    fn idx(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * 4
    }

    fn pixel(&self, idx: usize) -> Rgba<u8> {
        pixel_at(self.data, idx)
    }

    /// Within tolerance of the original target and not already the fill color.
    fn qualifies(&self, x: usize, y: usize) -> bool {
        let px = self.pixel(self.idx(x, y));
        px != self.fill && dist_sq(px, self.target) <= self.tol_sq
    }

    fn set_fill(&mut self, x: usize, y: usize) {
        let idx = self.idx(x, y);
        self.data[idx..idx + 4].copy_from_slice(&self.fill.0);
    }

    fn scanline_fill(&mut self, seed: (usize, usize), diagonals: bool) -> usize {
        let mut stack = vec![seed];
        let mut filled = 0;

        while let Some((x_start, y)) = stack.pop() {
            // Stale seed: its run was completed through another span.
            if !self.qualifies(x_start, y) {
                continue;
            }

            let mut x = x_start;
            while x > 0 && self.qualifies(x - 1, y) {
                x -= 1;
            }

            let mut span_up = false;
            let mut span_down = false;

            while x < self.width && self.qualifies(x, y) {
                self.set_fill(x, y);
                filled += 1;

                if y > 0 {
                    let ok = self.qualifies(x, y - 1);
                    if !span_up && ok {
                        stack.push((x, y - 1));
                        span_up = true;
                    } else if span_up && !ok {
                        span_up = false;
                    }
                }

                if y + 1 < self.height {
                    let ok = self.qualifies(x, y + 1);
                    if !span_down && ok {
                        stack.push((x, y + 1));
                        span_down = true;
                    } else if span_down && !ok {
                        span_down = false;
                    }
                }

                if diagonals {
                    self.push_diagonals(&mut stack, x, y);
                }

                x += 1;
            }
        }

        filled
    }

    fn push_diagonals(&self, stack: &mut Vec<(usize, usize)>, x: usize, y: usize) {
        let left = x.checked_sub(1);
        let right = (x + 1 < self.width).then_some(x + 1);
        let up = y.checked_sub(1);
        let down = (y + 1 < self.height).then_some(y + 1);

        for (nx, ny) in [(left, up), (right, up), (left, down), (right, down)] {
            if let (Some(nx), Some(ny)) = (nx, ny)
                && self.qualifies(nx, ny)
            {
                stack.push((nx, ny));
            }
        }
    }

    /// One edge-seal pass over interior pixels, reading neighbours from a snapshot.
    fn seal_pass(&mut self) -> usize {
        if self.width < 3 || self.height < 3 {
            return 0;
        }

        let prev = self.data.to_vec();
        let row = self.width * 4;
        let near_sq = self.tol_sq * 2;
        let mut sealed = 0;

        for y in 1..self.height - 1 {
            for x in 1..self.width - 1 {
                let idx = self.idx(x, y);
                let px = pixel_at(&prev, idx);
                if px == self.fill {
                    continue;
                }

                let touches_fill = [idx - 4, idx + 4, idx - row, idx + row]
                    .into_iter()
                    .any(|n| pixel_at(&prev, n) == self.fill);
                let absorbable =
                    dist_sq(px, self.target) <= near_sq || px.0[3] < SEAL_ALPHA_CUTOFF;

                if touches_fill && absorbable {
                    self.set_fill(x, y);
                    sealed += 1;
                }
            }
        }

        sealed
    }
}

fn pixel_at(data: &[u8], idx: usize) -> Rgba<u8> {
    Rgba([data[idx], data[idx + 1], data[idx + 2], data[idx + 3]])
}

/// Fill the tolerant region around the seed, then seal anti-aliased fringes.
///
/// The target color is sampled once at the seed. When the seed pixel is
/// already within tolerance of the fill color nothing is written.
pub fn flood_fill(image: &mut RgbaImage, request: &FillRequest) -> Result<FillReport> {
    let (width, height) = image.dimensions();
    if request.x >= width || request.y >= height {
        return Err(Error::SeedOutOfBounds {
            x: request.x,
            y: request.y,
            width,
            height,
        });
    }

    let target = *image.get_pixel(request.x, request.y);
    let fill = request.fill_pixel();
    let tol = u32::from(request.tolerance());
    let tol_sq = tol * tol;

    if dist_sq(target, fill) <= tol_sq {
        debug!(
            "Fill at ({}, {}) skipped: seed already matches fill color",
            request.x, request.y
        );
        return Ok(FillReport::default());
    }

    let data: &mut [u8] = image;
    let mut grid = Grid {
        data,
        width: width as usize,
        height: height as usize,
        target,
        fill,
        tol_sq,
    };

    let filled = grid.scanline_fill(
        (request.x as usize, request.y as usize),
        request.diagonals,
    );
    let sealed = (0..SEAL_PASSES).map(|_| grid.seal_pass()).sum();

    let report = FillReport { filled, sealed };
    debug!(
        "Fill at ({}, {}) tolerance {}: {} filled, {} sealed",
        request.x, request.y, tol, report.filled, report.sealed
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const RED: Rgb<u8> = Rgb([255, 0, 0]);
    const RED_PX: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn blank(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, WHITE)
    }

    #[test]
    fn test_fill_whole_white_image_black() {
        let mut img = blank(4, 4);
        let request = FillRequest::new(0, 0, Rgb([0, 0, 0])).with_tolerance(10);
        let report = flood_fill(&mut img, &request).unwrap();

        assert_eq!(report.filled, 16);
        assert_eq!(report.sealed, 0);
        assert!(img.pixels().all(|p| *p == BLACK));
    }

    #[test]
    fn test_seed_out_of_bounds() {
        let mut img = blank(4, 4);
        let before = img.clone();
        let result = flood_fill(&mut img, &FillRequest::new(4, 0, RED));
        assert!(matches!(
            result,
            Err(Error::SeedOutOfBounds { x: 4, y: 0, .. })
        ));
        assert_eq!(img, before);
    }

    #[test]
    fn test_seed_already_fill_color_is_noop() {
        let mut img = blank(5, 5);
        img.put_pixel(2, 2, RED_PX);
        let before = img.clone();

        let report = flood_fill(&mut img, &FillRequest::new(2, 2, RED)).unwrap();
        assert!(report.is_noop());
        assert_eq!(img, before);
    }

    #[test]
    fn test_seed_within_tolerance_of_fill_is_noop() {
        let mut img = RgbaImage::from_pixel(3, 3, Rgba([250, 0, 0, 255]));
        let before = img.clone();
        let report = flood_fill(&mut img, &FillRequest::new(1, 1, RED).with_tolerance(10)).unwrap();
        assert!(report.is_noop());
        assert_eq!(img, before);
    }

    #[test]
    fn test_tolerance_is_clamped() {
        let request = FillRequest::new(0, 0, RED).with_tolerance(255);
        assert_eq!(request.tolerance(), MAX_TOLERANCE);
    }

    #[test]
    fn test_erase_fills_transparent() {
        let mut img = RgbaImage::from_pixel(3, 3, BLACK);
        let report = flood_fill(&mut img, &FillRequest::erase(1, 1).with_tolerance(0)).unwrap();
        assert_eq!(report.filled, 9);
        assert!(img.pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn test_diagonal_connectivity() {
        // Two white cells touching only at a corner, everything else black.
        let mut img = RgbaImage::from_pixel(4, 4, BLACK);
        img.put_pixel(1, 1, WHITE);
        img.put_pixel(2, 2, WHITE);

        let mut orthogonal = img.clone();
        let request = FillRequest::new(1, 1, RED).with_tolerance(0);
        flood_fill(&mut orthogonal, &request.with_diagonals(false)).unwrap();
        assert_eq!(*orthogonal.get_pixel(1, 1), RED_PX);
        assert_eq!(*orthogonal.get_pixel(2, 2), WHITE);

        flood_fill(&mut img, &request.with_diagonals(true)).unwrap();
        assert_eq!(*img.get_pixel(1, 1), RED_PX);
        assert_eq!(*img.get_pixel(2, 2), RED_PX);
    }

    #[test]
    fn test_tolerance_spans_similar_colors() {
        let mut img = blank(6, 1);
        img.put_pixel(3, 0, Rgba([240, 240, 240, 255]));

        let mut strict = img.clone();
        flood_fill(&mut strict, &FillRequest::new(0, 0, RED).with_tolerance(0)).unwrap();
        assert_eq!(*strict.get_pixel(2, 0), RED_PX);
        assert_eq!(*strict.get_pixel(4, 0), WHITE);

        flood_fill(&mut img, &FillRequest::new(0, 0, RED).with_tolerance(30)).unwrap();
        assert!(img.pixels().all(|p| *p == RED_PX));
    }

    #[test]
    fn test_edge_seal_absorbs_antialiased_fringe() {
        // 5x5 white field, column 3 is a light-grey fringe, column 4 a black line.
        let mut img = blank(5, 5);
        let fringe = Rgba([215, 215, 215, 255]);
        for y in 0..5 {
            img.put_pixel(3, y, fringe);
            img.put_pixel(4, y, BLACK);
        }

        // distSq(fringe, white) = 3 * 40^2 = 4800: outside 60^2 but inside 2 * 60^2.
        let report = flood_fill(&mut img, &FillRequest::new(0, 0, RED).with_tolerance(60)).unwrap();

        assert_eq!(report.filled, 15);
        // Only interior pixels (rows 1..4) are sealed.
        assert_eq!(report.sealed, 3);
        for y in 1..4 {
            assert_eq!(*img.get_pixel(3, y), RED_PX);
        }
        assert_eq!(*img.get_pixel(3, 0), fringe);
        assert_eq!(*img.get_pixel(3, 4), fringe);
        assert!((0..5).all(|y| *img.get_pixel(4, y) == BLACK));
    }

    #[test]
    fn test_edge_seal_reaches_two_pixels_deep() {
        // White x=0..3, three fringe columns x=3..6, black x=6..8.
        let mut img = blank(8, 3);
        let fringe = Rgba([215, 215, 215, 255]);
        for y in 0..3 {
            for x in 3..6 {
                img.put_pixel(x, y, fringe);
            }
            for x in 6..8 {
                img.put_pixel(x, y, BLACK);
            }
        }

        let report = flood_fill(&mut img, &FillRequest::new(0, 0, RED).with_tolerance(60)).unwrap();

        assert_eq!(report, FillReport { filled: 9, sealed: 2 });
        // Each pass reads a snapshot, so one column is absorbed per pass.
        assert_eq!(*img.get_pixel(3, 1), RED_PX);
        assert_eq!(*img.get_pixel(4, 1), RED_PX);
        assert_eq!(*img.get_pixel(5, 1), fringe);
        // Border rows are never sealed.
        assert!((3..6).all(|x| *img.get_pixel(x, 0) == fringe && *img.get_pixel(x, 2) == fringe));
    }

    #[test]
    fn test_edge_seal_absorbs_translucent_pixels() {
        let mut img = blank(5, 3);
        img.put_pixel(2, 1, Rgba([0, 0, 255, 100]));
        for y in 0..3 {
            img.put_pixel(3, y, BLACK);
        }

        let report = flood_fill(&mut img, &FillRequest::new(0, 0, RED).with_tolerance(0)).unwrap();
        assert_eq!(report.sealed, 1);
        assert_eq!(*img.get_pixel(2, 1), RED_PX);
        assert_eq!(*img.get_pixel(4, 1), WHITE);
    }
}
