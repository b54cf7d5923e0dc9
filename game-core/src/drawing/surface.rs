use game_types::{
    Color, GameError, MAX_LINE_WIDTH, MIN_LINE_WIDTH, Point, Stroke, StrokeStyle, Tool,
};
use tracing::debug;

use super::{BACKGROUND_COLOR, DrawingContext};

pub const ENABLED_CURSOR: &str = "cursor-crosshair";
pub const DISABLED_CURSOR: &str = "cursor-not-allowed";

/// Turns pointer down/move/up sequences into line segments rendered straight onto a context.
///
/// Only the gesture in progress is tracked. Finished strokes are handed back to the
/// caller and forgotten, so there is no history to undo or replay.
#[derive(Debug)]
pub struct DrawingSurface<C: DrawingContext> {
    context: C,
    origin: Point,
    style: StrokeStyle,
    tool: Tool,
    enabled: bool,
    active: Option<Stroke>,
}

impl<C: DrawingContext> DrawingSurface<C> {
    pub fn new(context: C) -> Self {
        Self {
            context,
            origin: Point::new(0.0, 0.0),
            style: StrokeStyle::default(),
            tool: Tool::default(),
            enabled: true,
            active: None,
        }
    }

    /// Position of the surface's top-left corner in client coordinates.
    pub fn with_origin(mut self, left: f32, top: f32) -> Self {
        self.set_origin(left, top);
        self
    }

    pub fn set_origin(&mut self, left: f32, top: f32) {
        self.origin = Point::new(left, top);
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling drops any gesture in progress.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.active = None;
        }
    }

    /// Visual cue for the pointer over the surface.
    pub fn cursor(&self) -> &'static str {
        if self.enabled {
            ENABLED_CURSOR
        } else {
            DISABLED_CURSOR
        }
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn set_color(&mut self, color: Color) {
        self.style.color = color;
    }

    pub fn set_color_hex(&mut self, value: &str) -> Result<(), GameError> {
        self.style.color = value.parse()?;
        Ok(())
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.style.width = if width.is_nan() {
            MIN_LINE_WIDTH
        } else {
            width.clamp(MIN_LINE_WIDTH, MAX_LINE_WIDTH)
        };
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    pub fn pointer_down(&mut self, client_x: f32, client_y: f32) -> bool {
        if !self.enabled {
            return false;
        }

        let point = self.to_local(client_x, client_y);
        if self.tool == Tool::Fill {
            self.context.fill(self.style.color);
            return true;
        }

        let color = match self.tool {
            Tool::Eraser => BACKGROUND_COLOR,
            _ => self.style.color,
        };
        self.context.begin_path();
        self.context.move_to(point);
        self.active = Some(Stroke {
            points: vec![point],
            color,
            width: self.style.width,
        });
        true
    }

    pub fn pointer_move(&mut self, client_x: f32, client_y: f32) -> bool {
        if !self.enabled {
            return false;
        }

        let point = self.to_local(client_x, client_y);
        let Some(stroke) = self.active.as_mut() else {
            return false;
        };

        self.context.line_to(point);
        self.context.stroke(&StrokeStyle {
            color: stroke.color,
            width: stroke.width,
        });
        stroke.points.push(point);
        true
    }

    /// Ends the gesture, returning what was drawn.
    pub fn pointer_up(&mut self) -> Option<Stroke> {
        let stroke = self.active.take()?;
        debug!("Stroke finished with {} points", stroke.points.len());
        Some(stroke)
    }

    /// Leaving the surface ends the gesture the same way releasing the pointer does.
    pub fn pointer_leave(&mut self) -> Option<Stroke> {
        self.pointer_up()
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.context.clear();
    }

    fn to_local(&self, client_x: f32, client_y: f32) -> Point {
        Point::new(client_x - self.origin.x, client_y - self.origin.y)
    }
}
