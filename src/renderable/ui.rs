//! Game-anchored labels and pointer tooltips

use macroquad::prelude::*;

use super::Renderable;
use crate::camera::Camera2D;
use crate::renderer::Renderer;

/// Outlined text anchored to a game-space position.
pub struct Label {
    pub pos: Vec2,
    pub text: String,
    pub size: f32,
    pub color: Color,
    pub outline_color: Color,
}

impl Label {
    pub fn new(pos: Vec2, text: &str) -> Self {
        Self {
            pos,
            text: text.to_string(),
            size: 20.0,
            color: Color::from_rgba(10, 10, 10, 255),
            outline_color: WHITE,
        }
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Renderable for Label {
    fn render(&self, renderer: &mut Renderer, camera: &Camera2D) {
        let anchor = camera.screen_coords(self.pos);
        let step = self.size * 0.9;
        for (i, line) in self.text.lines().enumerate() {
            renderer.draw_text_line(
                line,
                self.color,
                vec2(anchor.x, anchor.y + i as f32 * step),
                self.size,
                1.0,
                self.outline_color,
            );
        }
    }
}

/// A small panel that follows the pointer while its hover region is active.
pub struct Tooltip {
    pub text: String,
    pub color: Color,
    hovered: bool,
}

impl Tooltip {
    pub fn new(text: &str, color: Color) -> Self {
        Self {
            text: text.to_string(),
            color,
            hovered: false,
        }
    }

    pub fn set_hover(&mut self, state: bool) {
        self.hovered = state;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }
}

impl Renderable for Tooltip {
    fn render(&self, renderer: &mut Renderer, _camera: &Camera2D) {
        if !self.hovered {
            return;
        }
        let (mx, my) = mouse_position();
        draw_rectangle(mx, my, 200.0, 50.0, self.color);
        renderer.draw_text_block(
            &self.text,
            renderer.color("UI Text"),
            vec2(mx + 10.0, my + 10.0),
            20.0,
            None,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tooltip_hover_gate() {
        let mut tip = Tooltip::new("hello", BLACK);
        assert!(!tip.is_hovered());
        tip.set_hover(true);
        assert!(tip.is_hovered());
        tip.set_hover(false);
        assert!(!tip.is_hovered());
    }

    #[test]
    fn test_label_builder() {
        let label = Label::new(vec2(1.0, 2.0), "hi").with_size(30.0);
        assert_eq!(label.pos, vec2(1.0, 2.0));
        assert!((label.size - 30.0).abs() < f32::EPSILON);
    }
}
