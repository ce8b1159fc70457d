use crate::widget::Rect;

// ============================================================================
// COLOR
// ============================================================================

/// ARGB color, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const BLUE: Color = Color::new(0x00, 0x00, 0xff);

    /// Opaque color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { a: 0xff, r, g, b }
    }

    pub const fn with_alpha(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    pub const fn as_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Parses `#RRGGBB` (opaque) or `#AARRGGBB`.
    pub fn parse_hex(text: &str) -> Option<Self> {
        let hex = text.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(hex, 16).ok()?;
        match hex.len() {
            6 => Some(Self::from_argb(0xff00_0000 | value)),
            8 => Some(Self::from_argb(value)),
            _ => None,
        }
    }
}

// ============================================================================
// CANVAS
// ============================================================================

/// Drawing surface over an RGBA8 frame, row-major, `width * height * 4` bytes.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    /// Rows that do not fit in `frame` are dropped from the drawable height.
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        let height = match width {
            0 => height,
            _ => height.min(frame.len() / (width * 4)),
        };
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    /// RGBA bytes at `(x, y)`, `None` outside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let px = self.frame.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Source-over blend of `color` at `(x, y)`; `coverage` scales the color's own alpha.
    fn blend_pixel(&mut self, x: usize, y: usize, color: Color, coverage: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * 4;
        let Some(px) = self.frame.get_mut(idx..idx + 4) else {
            return;
        };
        let a = (color.a as f32 / 255.0) * coverage.clamp(0.0, 1.0);
        let src = [color.r as f32, color.g as f32, color.b as f32];
        let dst = [px[0] as f32, px[1] as f32, px[2] as f32];
        let out = [
            (src[0] * a + dst[0] * (1.0 - a)).round() as u8,
            (src[1] * a + dst[1] * (1.0 - a)).round() as u8,
            (src[2] * a + dst[2] * (1.0 - a)).round() as u8,
            0xff,
        ];
        px.copy_from_slice(&out);
    }

    /// Strokes an arc of the circle inscribed in `bounds`.
    ///
    /// Angles are degrees, 0 at three o'clock, positive sweep clockwise on
    /// screen. The stroke is centered on the circle. A sweep of 360 or more
    /// in either direction draws the whole ring; a zero sweep draws nothing.
    pub fn stroke_arc(
        &mut self,
        bounds: &Rect,
        start_deg: f64,
        sweep_deg: f64,
        stroke_width: f64,
        color: Color,
    ) {
        if sweep_deg == 0.0 || stroke_width <= 0.0 || self.width == 0 || self.height == 0 {
            return;
        }
        let radius = bounds.width().min(bounds.height()) / 2.0;
        if radius <= 0.0 {
            return;
        }
        let (cx, cy) = bounds.center();
        let half = stroke_width / 2.0;
        let inner = (radius - half).max(0.0);
        let outer = radius + half;
        let full_ring = sweep_deg.abs() >= 360.0;

        let min_x = (cx - outer - 1.0).floor().max(0.0) as i64;
        let max_x = (cx + outer + 1.0).ceil().min(self.width as f64 - 1.0) as i64;
        let min_y = (cy - outer - 1.0).floor().max(0.0) as i64;
        let max_y = (cy + outer + 1.0).ceil().min(self.height as f64 - 1.0) as i64;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                let dist = dx.hypot(dy);
                let aa = if dist > outer {
                    1.0 - (dist - outer).min(1.0)
                } else if dist < inner {
                    1.0 - (inner - dist).min(1.0)
                } else {
                    1.0
                };
                if aa <= 0.0 {
                    continue;
                }
                if !full_ring && !within_sweep(dy.atan2(dx).to_degrees(), start_deg, sweep_deg) {
                    continue;
                }
                self.blend_pixel(x as usize, y as usize, color, aa as f32);
            }
        }
    }
}

fn within_sweep(angle_deg: f64, start_deg: f64, sweep_deg: f64) -> bool {
    if sweep_deg > 0.0 {
        (angle_deg - start_deg).rem_euclid(360.0) <= sweep_deg
    } else {
        (start_deg - angle_deg).rem_euclid(360.0) <= -sweep_deg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: usize, height: usize) -> Vec<u8> {
        vec![0u8; width * height * 4]
    }

    #[test]
    fn test_argb_roundtrip_channels() {
        let color = Color::from_argb(0x3c10_2030);
        assert_eq!(color.a, 0x3c);
        assert_eq!(color.as_tuple(), (0x10, 0x20, 0x30));
        assert_eq!(color.as_argb(), 0x3c10_2030);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::parse_hex("#0000ff"), Some(Color::BLUE));
        assert_eq!(Color::parse_hex("#80ff0000"), Some(Color::with_alpha(0x80, 0xff, 0, 0)));
        assert_eq!(Color::parse_hex("0000ff"), None);
        assert_eq!(Color::parse_hex("#00f"), None);
        assert_eq!(Color::parse_hex("#+0000ff"), None);
    }

    #[test]
    fn test_within_sweep_wraps() {
        assert!(within_sweep(10.0, 350.0, 30.0));
        assert!(!within_sweep(30.0, 350.0, 30.0));
        assert!(within_sweep(-170.0, 180.0, 20.0));
    }

    #[test]
    fn test_within_sweep_negative_goes_counter_clockwise() {
        assert!(within_sweep(-45.0, 0.0, -90.0));
        assert!(!within_sweep(45.0, 0.0, -90.0));
    }

    #[test]
    fn test_clear_fills_frame() {
        let mut buf = frame(4, 3);
        let mut canvas = Canvas::new(&mut buf, 4, 3);
        canvas.clear(Color::new(1, 2, 3));
        assert_eq!(canvas.pixel(3, 2), Some([1, 2, 3, 0xff]));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn test_stroke_arc_quarter() {
        let mut buf = frame(100, 100);
        let mut canvas = Canvas::new(&mut buf, 100, 100);
        canvas.clear(Color::WHITE);
        let bounds = Rect::new(10.0, 10.0, 90.0, 90.0);
        canvas.stroke_arc(&bounds, 0.0, 90.0, 6.0, Color::BLUE);

        // (90, 50) sits on the ring at 0 degrees, (50, 90) at 90 degrees.
        assert_eq!(canvas.pixel(89, 52), Some([0, 0, 0xff, 0xff]));
        assert_eq!(canvas.pixel(52, 89), Some([0, 0, 0xff, 0xff]));
        // 180 and 270 degrees stay untouched.
        assert_eq!(canvas.pixel(11, 50), Some([0xff, 0xff, 0xff, 0xff]));
        assert_eq!(canvas.pixel(50, 11), Some([0xff, 0xff, 0xff, 0xff]));
        // Center is never painted.
        assert_eq!(canvas.pixel(50, 50), Some([0xff, 0xff, 0xff, 0xff]));
    }

    #[test]
    fn test_stroke_arc_zero_sweep_draws_nothing() {
        let mut buf = frame(50, 50);
        let mut canvas = Canvas::new(&mut buf, 50, 50);
        canvas.clear(Color::WHITE);
        canvas.stroke_arc(&Rect::new(5.0, 5.0, 45.0, 45.0), 0.0, 0.0, 4.0, Color::BLACK);
        assert!(buf.chunks_exact(4).all(|px| px == [0xff, 0xff, 0xff, 0xff]));
    }

    #[test]
    fn test_translucent_stroke_blends() {
        let mut buf = frame(60, 60);
        let mut canvas = Canvas::new(&mut buf, 60, 60);
        canvas.clear(Color::WHITE);
        let track = Color::from_argb(0x3c00_0000);
        canvas.stroke_arc(&Rect::new(10.0, 10.0, 50.0, 50.0), 0.0, 360.0, 6.0, track);
        // 255 * (1 - 60/255) = 195
        assert_eq!(canvas.pixel(50, 30), Some([195, 195, 195, 0xff]));
    }

    #[test]
    fn test_stroke_arc_clips_to_frame() {
        let mut buf = frame(20, 20);
        let mut canvas = Canvas::new(&mut buf, 20, 20);
        canvas.stroke_arc(&Rect::new(-40.0, -40.0, 60.0, 60.0), 0.0, 360.0, 10.0, Color::BLUE);
        assert_eq!(buf.len(), 20 * 20 * 4);
    }

    #[test]
    fn test_short_frame_is_clamped() {
        // Room for 10 full rows of a 20x20 canvas, plus a partial row.
        let mut buf = vec![0u8; 20 * 10 * 4 + 8];
        let mut canvas = Canvas::new(&mut buf, 20, 20);
        assert_eq!(canvas.height(), 10);
        canvas.clear(Color::WHITE);
        canvas.stroke_arc(&Rect::new(0.0, 0.0, 20.0, 20.0), 0.0, 360.0, 4.0, Color::BLUE);
        assert_eq!(canvas.pixel(0, 15), None);
    }
}
