//! Renderer and layered render lists
//!
//! The renderer owns the theme and the shared text/widget drawing helpers.
//! Renderables are grouped into four fixed layers drawn back to front;
//! layers can be hidden individually (e.g. an overlay layer that only shows
//! while a dialog is open).

use macroquad::prelude::*;

use crate::camera::Camera2D;
use crate::input::Button;
use crate::renderable::Renderable;
use crate::theme::Theme;

/// Default line height for multi-line text blocks.
pub const LINE_HEIGHT: f32 = 25.0;

/// Render layers, drawn in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerId {
    Background = 0,
    Main = 1,
    Ui = 2,
    Overlay = 3,
}

impl LayerId {
    pub const ALL: [LayerId; 4] = [
        LayerId::Background,
        LayerId::Main,
        LayerId::Ui,
        LayerId::Overlay,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LayerId::Background => "background",
            LayerId::Main => "main",
            LayerId::Ui => "ui",
            LayerId::Overlay => "overlay",
        }
    }
}

/// One render list: ordered renderables plus a visibility flag.
pub struct Layer {
    content: Vec<Box<dyn Renderable>>,
    visible: bool,
}

impl Layer {
    fn new() -> Self {
        Self {
            content: Vec::new(),
            visible: true,
        }
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn add(&mut self, renderable: Box<dyn Renderable>) {
        self.content.push(renderable);
    }

    pub fn clear(&mut self) {
        self.content.clear();
    }

    pub fn render(&self, renderer: &mut Renderer, camera: &Camera2D) {
        for renderable in &self.content {
            renderable.render(renderer, camera);
        }
    }
}

/// The four fixed layers, indexed by `LayerId`.
pub struct LayerStack {
    layers: [Layer; 4],
}

impl LayerStack {
    pub fn new() -> Self {
        Self {
            layers: [Layer::new(), Layer::new(), Layer::new(), Layer::new()],
        }
    }

    pub fn layer(&self, id: LayerId) -> &Layer {
        &self.layers[id as usize]
    }

    pub fn layer_mut(&mut self, id: LayerId) -> &mut Layer {
        &mut self.layers[id as usize]
    }

    pub fn add(&mut self, id: LayerId, renderable: Box<dyn Renderable>) {
        self.layer_mut(id).add(renderable);
    }

    pub fn clear(&mut self, id: LayerId) {
        self.layer_mut(id).clear();
    }

    /// Draw every visible layer, back to front.
    pub fn render_all(&self, renderer: &mut Renderer, camera: &Camera2D) {
        for id in LayerId::ALL {
            let layer = self.layer(id);
            if layer.is_visible() {
                layer.render(renderer, camera);
            }
        }
    }
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared drawing helpers: themed colors, outlined text, buttons, the
/// debug overlay.
pub struct Renderer {
    theme: Theme,
    pub debug: bool,
    pub line_height: f32,
    debug_lines: Vec<String>,
}

impl Renderer {
    pub fn new(theme: Theme, debug: bool) -> Self {
        Self {
            theme,
            debug,
            line_height: LINE_HEIGHT,
            debug_lines: Vec::new(),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Themed color lookup (falls back per `Theme::color`).
    pub fn color(&self, name: &str) -> Color {
        self.theme.color(name)
    }

    /// Queue a line for the debug overlay (shown only in debug mode).
    pub fn debug_line(&mut self, line: String) {
        if self.debug {
            self.debug_lines.push(line);
        }
    }

    /// Clear the whole surface with a themed background color.
    pub fn clear(&mut self, color_name: Option<&str>) {
        let color = self.color(color_name.unwrap_or("background"));
        clear_background(color);
    }

    /// Draw a single text line with an 8-direction outline, top-left
    /// anchored at `pos`.
    pub fn draw_text_line(
        &self,
        text: &str,
        color: Color,
        pos: Vec2,
        size: f32,
        outline_px: f32,
        outline_color: Color,
    ) {
        let dims = measure_text(text, None, size as u16, 1.0);
        let (x, y) = (pos.x, pos.y + dims.offset_y);
        if outline_px > 0.0 {
            let o = outline_px;
            for (dx, dy) in [
                (-o, 0.0),
                (o, 0.0),
                (0.0, -o),
                (0.0, o),
                (-o, -o),
                (o, o),
                (o, -o),
                (-o, o),
            ] {
                draw_text(text, x + dx, y + dy, size, outline_color);
            }
        }
        draw_text(text, x, y, size, color);
        if self.debug {
            draw_rectangle(pos.x, pos.y, 3.0, 3.0, self.color("DEBUG"));
        }
    }

    /// Draw a multi-line text block, one outlined line per `\n`.
    pub fn draw_text_block(
        &self,
        text: &str,
        color: Color,
        pos: Vec2,
        size: f32,
        line_height: Option<f32>,
    ) {
        let step = line_height.unwrap_or(self.line_height);
        let outline = self.color("background");
        for (i, line) in text.lines().enumerate() {
            self.draw_text_line(
                line,
                color,
                vec2(pos.x, pos.y + i as f32 * step),
                size,
                1.0,
                outline,
            );
        }
    }

    /// Draw a button: hover-dependent fill, pressed text offset.
    pub fn draw_button(&self, button: &Button) {
        let fill = if button.hovered {
            self.color("Button hovered")
        } else {
            self.color("Button")
        };
        let r = button.rect;
        draw_rectangle(r.x, r.y, r.w, r.h, fill);
        let border = 1.0 + (button.hovered as u8 as f32) - (button.pressed as u8 as f32);
        if border > 0.0 {
            draw_rectangle_lines(r.x, r.y, r.w, r.h, border * 2.0, self.color("UI Text"));
        }
        let offset = 5.0 + 2.0 * (button.pressed as u8 as f32);
        self.draw_text_block(
            &button.text,
            self.color("UI Text"),
            vec2(r.x + 5.0, r.y + offset),
            20.0,
            None,
        );
    }

    /// Draw the queued debug lines top-left, then drop them. Lines queue up
    /// between frames and are consumed once per draw.
    pub fn draw_debug(&mut self) {
        if !self.debug {
            self.debug_lines.clear();
            return;
        }
        let color = self.color("DEBUG");
        for (i, line) in self.debug_lines.iter().enumerate() {
            self.draw_text_line(
                line,
                color,
                vec2(10.0, 10.0 + i as f32 * self.line_height),
                20.0,
                0.0,
                color,
            );
        }
        self.debug_lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Nothing;
    impl Renderable for Nothing {
        fn render(&self, _renderer: &mut Renderer, _camera: &Camera2D) {}
    }

    #[test]
    fn test_layer_ids_are_ordered() {
        assert_eq!(LayerId::ALL.len(), 4);
        assert_eq!(LayerId::ALL[0] as usize, 0);
        assert_eq!(LayerId::ALL[3] as usize, 3);
        assert_eq!(LayerId::Overlay.label(), "overlay");
    }

    #[test]
    fn test_layer_visibility() {
        let mut layer = Layer::new();
        assert!(layer.is_visible());
        layer.hide();
        assert!(!layer.is_visible());
        layer.toggle_visibility();
        assert!(layer.is_visible());
    }

    #[test]
    fn test_stack_add_and_clear() {
        let mut stack = LayerStack::new();
        stack.add(LayerId::Main, Box::new(Nothing));
        stack.add(LayerId::Main, Box::new(Nothing));
        stack.add(LayerId::Ui, Box::new(Nothing));
        assert_eq!(stack.layer(LayerId::Main).len(), 2);
        assert_eq!(stack.layer(LayerId::Ui).len(), 1);
        assert!(stack.layer(LayerId::Overlay).is_empty());

        stack.clear(LayerId::Main);
        assert!(stack.layer(LayerId::Main).is_empty());
        assert_eq!(stack.layer(LayerId::Ui).len(), 1);
    }

    #[test]
    fn test_debug_lines_gated_and_drained() {
        let mut renderer = Renderer::new(Theme::default(), false);
        renderer.debug_line("hidden".to_string());
        assert!(renderer.debug_lines.is_empty());

        renderer.debug = true;
        renderer.debug_line("shown".to_string());
        assert_eq!(renderer.debug_lines.len(), 1);

        // Draining without drawing happens when debug is off.
        renderer.debug = false;
        renderer.draw_debug();
        assert!(renderer.debug_lines.is_empty());
    }
}
