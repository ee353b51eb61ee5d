//! Dialog and popup-menu text layout
//!
//! Dialogs are screen-space: a title, a body, and a list of options whose
//! labels the input handler rewrites when it binds them to keys.

use macroquad::prelude::*;

use super::Renderable;
use crate::camera::Camera2D;
use crate::renderer::Renderer;

/// One selectable option: a label plus the app action id it fires.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogOption {
    pub text: String,
    pub action: &'static str,
}

impl DialogOption {
    pub fn new(text: &str, action: &'static str) -> Self {
        Self {
            text: text.to_string(),
            action,
        }
    }
}

/// Full-screen dialog: title, body text, options list.
pub struct Dialog {
    pub title: String,
    pub text: String,
    pub options: Vec<DialogOption>,
}

impl Dialog {
    pub fn new(title: &str, text: &str) -> Self {
        Self {
            title: title.to_string(),
            text: text.to_string(),
            options: Vec::new(),
        }
    }

    pub fn add_option(&mut self, text: &str, action: &'static str) {
        self.options.push(DialogOption::new(text, action));
    }

    /// Options rendered one per line.
    pub fn options_text(&self) -> String {
        self.options
            .iter()
            .map(|o| o.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Renderable for Dialog {
    fn render(&self, renderer: &mut Renderer, _camera: &Camera2D) {
        renderer.draw_text_block(
            &self.title,
            renderer.color("Title"),
            vec2(50.0, 50.0),
            30.0,
            None,
        );
        renderer.draw_text_block(
            &self.text,
            renderer.color("UI Text"),
            vec2(50.0, 100.0),
            20.0,
            None,
        );
        renderer.draw_text_block(
            &self.options_text(),
            renderer.color("UI Text"),
            vec2(50.0, 400.0),
            20.0,
            None,
        );
    }
}

/// A compact dialog drawn on a fixed panel instead of the full screen.
pub struct PopupMenu {
    pub dialog: Dialog,
    pub panel: Rect,
}

impl PopupMenu {
    pub fn new(dialog: Dialog) -> Self {
        Self {
            dialog,
            panel: Rect::new(200.0, 200.0, 400.0, 150.0),
        }
    }
}

impl Renderable for PopupMenu {
    fn render(&self, renderer: &mut Renderer, _camera: &Camera2D) {
        let p = self.panel;
        draw_rectangle(p.x, p.y, p.w, p.h, renderer.color("Dialog Background"));
        let text_color = renderer.color("UI Text");
        renderer.draw_text_block(
            &self.dialog.title,
            text_color,
            vec2(p.x + 20.0, p.y + 20.0),
            20.0,
            None,
        );
        renderer.draw_text_block(
            &self.dialog.text,
            text_color,
            vec2(p.x + 20.0, p.y + 45.0),
            20.0,
            None,
        );
        renderer.draw_text_block(
            &self.dialog.options_text(),
            text_color,
            vec2(p.x + 20.0, p.y + 80.0),
            20.0,
            Some(20.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_text() {
        let mut dialog = Dialog::new("Title", "Body");
        dialog.add_option("Move east", "demo.move_east");
        dialog.add_option("Quit", "demo.quit");
        assert_eq!(dialog.options_text(), "Move east\nQuit");
    }

    #[test]
    fn test_popup_wraps_dialog() {
        let mut dialog = Dialog::new("Pick", "");
        dialog.add_option("Yes", "demo.yes");
        let popup = PopupMenu::new(dialog);
        assert_eq!(popup.dialog.options.len(), 1);
        assert!(popup.panel.w > 0.0);
    }
}
