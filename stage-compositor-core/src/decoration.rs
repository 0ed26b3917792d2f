//! Border geometry and colors.

use stage_core::{Color, DecorationConfig, Point, Rect, Size};

/// Border colors for the focused and unfocused states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorationColors {
    pub focused: Color,
    pub default: Color,
}

impl DecorationColors {
    pub fn for_state(&self, activated: bool) -> Color {
        if activated {
            self.focused
        } else {
            self.default
        }
    }
}

impl From<&DecorationConfig> for DecorationColors {
    fn from(config: &DecorationConfig) -> Self {
        DecorationColors {
            focused: config.focused_color,
            default: config.default_color,
        }
    }
}

/// Border rectangles for a view of `size`, relative to the view node, in
/// left, top, bottom, right order.
pub fn border_layout(size: Size<i32>) -> [Rect; 4] {
    let (w, h) = (size.width, size.height);
    [
        Rect::from_parts(Point::new(0, 0), Size::new(1, h)),
        Rect::from_parts(Point::new(0, 0), Size::new(w, 1)),
        Rect::from_parts(Point::new(0, h - 1), Size::new(w, 1)),
        Rect::from_parts(Point::new(w - 1, 0), Size::new(1, h)),
    ]
}
