use anyhow::Result;
use game_types::{Color, GameError, Point, StrokeStyle};
use std::path::Path;
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use super::{BACKGROUND_COLOR, DrawingContext};

/// Software canvas backed by a tiny-skia pixmap.
pub struct RasterCanvas {
    pixmap: Pixmap,
    subpaths: Vec<Vec<Point>>,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32) -> Result<Self, GameError> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(GameError::InvalidCanvasSize { width, height })?;
        pixmap.fill(to_skia(BACKGROUND_COLOR));

        Ok(Self {
            pixmap,
            subpaths: Vec::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let pixel = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color {
            r: pixel.red(),
            g: pixel.green(),
            b: pixel.blue(),
            a: pixel.alpha(),
        })
    }

    /// Export canvas to PNG bytes
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        Ok(self.pixmap.encode_png()?)
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.pixmap.save_png(path)?;
        Ok(())
    }
}

impl DrawingContext for RasterCanvas {
    fn begin_path(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, point: Point) {
        self.subpaths.push(vec![point]);
    }

    fn line_to(&mut self, point: Point) {
        // Without a current point lineTo behaves like moveTo
        match self.subpaths.last_mut() {
            Some(subpath) => subpath.push(point),
            None => self.subpaths.push(vec![point]),
        }
    }

    fn stroke(&mut self, style: &StrokeStyle) {
        let mut pb = PathBuilder::new();
        for subpath in self.subpaths.iter().filter(|s| s.len() > 1) {
            pb.move_to(subpath[0].x, subpath[0].y);
            for point in &subpath[1..] {
                pb.line_to(point.x, point.y);
            }
        }

        let Some(path) = pb.finish() else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(to_skia(style.color));
        paint.anti_alias = true;

        let stroke = Stroke {
            width: style.width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };

        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn fill(&mut self, color: Color) {
        self.pixmap.fill(to_skia(color));
    }

    fn clear(&mut self) {
        self.subpaths.clear();
        self.pixmap.fill(to_skia(BACKGROUND_COLOR));
    }

    fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }
}

impl std::fmt::Debug for RasterCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterCanvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

fn to_skia(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}
