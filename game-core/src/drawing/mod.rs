//! Freehand drawing: pointer gestures in, path primitives out.

mod raster;
mod surface;

pub use raster::RasterCanvas;
pub use surface::*;

use game_types::{Color, Point, StrokeStyle};

/// Paper color. The eraser paints with it and `clear` restores it.
pub const BACKGROUND_COLOR: Color = Color::WHITE;

/// The subset of a 2D canvas context the drawing surface needs.
pub trait DrawingContext {
    fn begin_path(&mut self);
    fn move_to(&mut self, point: Point);
    fn line_to(&mut self, point: Point);
    /// Render the current path with the given style.
    fn stroke(&mut self, style: &StrokeStyle);
    /// Flood the whole surface with one color.
    fn fill(&mut self, color: Color);
    /// Reset the whole surface to the background.
    fn clear(&mut self);
    fn size(&self) -> (u32, u32);
}
