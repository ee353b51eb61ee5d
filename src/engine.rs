//! Engine facade
//!
//! Owns the camera, renderer, input handler and layer stack, and runs one
//! frame of the input -> mutate -> render pipeline. Games reach into the
//! public fields for anything the facade doesn't wrap.

use macroquad::prelude::*;

use crate::camera::Camera2D;
use crate::input::{InputEvent, InputHandler, Space};
use crate::renderable::{Dialog, PopupMenu, Renderable, Tooltip};
use crate::renderer::{LayerId, LayerStack, Renderer};
use crate::theme::Theme;

/// Camera configuration applied at startup, with the usual bindings.
#[derive(Debug, Clone, Copy)]
pub struct CameraSetup {
    pub rotation: f32,
    pub isometry: f32,
    pub zoom: f32,
    /// Bind the mouse wheel to zoom.
    pub wheel_zoom: bool,
    /// Bind right-mouse drag to pan the projection center.
    pub drag_pan: bool,
    /// Bind arrow keys to rotate/tilt.
    pub arrow_rotate: bool,
}

impl Default for CameraSetup {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            isometry: 0.3,
            zoom: 30.0,
            wheel_zoom: true,
            drag_pan: true,
            arrow_rotate: true,
        }
    }
}

pub struct Engine {
    pub camera: Camera2D,
    pub renderer: Renderer,
    pub input: InputHandler,
    pub layers: LayerStack,
    tooltips: Vec<Tooltip>,
    background: Option<String>,
}

impl Engine {
    /// Engine for the current macroquad window.
    pub fn new(theme: Theme, debug: bool) -> Self {
        Self::with_size(vec2(screen_width(), screen_height()), theme, debug)
    }

    /// Engine for an explicit surface size (windowless tests use this).
    pub fn with_size(screen_size: Vec2, theme: Theme, debug: bool) -> Self {
        Self {
            camera: Camera2D::new(screen_size),
            renderer: Renderer::new(theme, debug),
            input: InputHandler::new(),
            layers: LayerStack::new(),
            tooltips: Vec::new(),
            background: None,
        }
    }

    /// Apply camera settings and register the standard camera bindings.
    pub fn setup_camera(&mut self, setup: CameraSetup) {
        self.camera.set_rotation(setup.rotation);
        self.camera.set_isometry(setup.isometry);
        self.camera.zoom(setup.zoom);
        if setup.wheel_zoom {
            self.input.bind_camera_zoom_to_wheel(0.1);
        }
        if setup.drag_pan {
            self.input.bind_camera_pan_to_mouse_drag(MouseButton::Right);
        }
        if setup.arrow_rotate {
            self.input.bind_camera_rotate_to_arrows(0.5);
        }
    }

    pub fn add_to_layer(&mut self, layer: LayerId, renderable: Box<dyn Renderable>) {
        self.layers.add(layer, renderable);
    }

    pub fn clear_layer(&mut self, layer: LayerId) {
        self.layers.clear(layer);
    }

    pub fn set_layer_visible(&mut self, layer: LayerId, visible: bool) {
        let layer = self.layers.layer_mut(layer);
        if visible {
            layer.show();
        } else {
            layer.hide();
        }
    }

    /// Clear to a themed color at the start of every frame.
    pub fn show_background(&mut self, color_name: &str) {
        self.background = Some(color_name.to_string());
    }

    /// Replace the UI layer with a dialog, rebinding its options to keys.
    /// Key-press bindings and buttons from the previous scene are dropped.
    pub fn show_scene(&mut self, mut dialog: Dialog) {
        self.input.reset();
        self.input.bind_dialog_options(&mut dialog.options);
        self.layers.clear(LayerId::Ui);
        self.layers.add(LayerId::Ui, Box::new(dialog));
    }

    /// Stack a popup on the UI layer, rebinding its options to keys.
    pub fn show_dialog(&mut self, mut popup: PopupMenu) {
        self.input.reset();
        self.input.bind_dialog_options(&mut popup.dialog.options);
        self.layers.add(LayerId::Ui, Box::new(popup));
    }

    /// Attach a pointer tooltip to a hover region. Returns the tooltip id.
    pub fn add_tooltip(&mut self, region: Rect, space: Space, message: &str) -> usize {
        let id = self.tooltips.len();
        let color = self.renderer.color("Dialog Background");
        self.tooltips.push(Tooltip::new(message, color));
        self.input.register_hover(region, space, id);
        id
    }

    pub fn tooltip_count(&self) -> usize {
        self.tooltips.len()
    }

    /// One frame: dispatch input (mutating the camera), render every visible
    /// layer back to front, then buttons, tooltips (gated on the overlay
    /// layer's visibility) and the debug overlay. Returns the app-defined
    /// action ids fired this frame.
    pub fn frame(&mut self) -> Vec<&'static str> {
        let mut actions = Vec::new();
        for event in self.input.update(&mut self.camera) {
            match event {
                InputEvent::Action(id) => actions.push(id),
                InputEvent::HoverChanged(id, state) => {
                    if let Some(tooltip) = self.tooltips.get_mut(id) {
                        tooltip.set_hover(state);
                    }
                }
            }
        }

        self.renderer.clear(self.background.as_deref());
        self.layers.render_all(&mut self.renderer, &self.camera);
        for button in self.input.buttons() {
            self.renderer.draw_button(button);
        }
        // Tooltips belong to the overlay: hiding that layer hides them too.
        if self.layers.layer(LayerId::Overlay).is_visible() {
            for tooltip in &self.tooltips {
                tooltip.render(&mut self.renderer, &self.camera);
            }
        }
        self.renderer.draw_debug();

        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        Engine::with_size(vec2(800.0, 600.0), Theme::default(), false)
    }

    #[test]
    fn test_show_scene_replaces_ui_layer() {
        let mut engine = engine();

        let mut first = Dialog::new("One", "");
        first.add_option("Go", "demo.go");
        engine.show_scene(first);
        assert_eq!(engine.layers.layer(LayerId::Ui).len(), 1);

        let second = Dialog::new("Two", "");
        engine.show_scene(second);
        assert_eq!(engine.layers.layer(LayerId::Ui).len(), 1);
    }

    #[test]
    fn test_show_dialog_stacks() {
        let mut engine = engine();
        engine.show_scene(Dialog::new("Base", ""));
        engine.show_dialog(PopupMenu::new(Dialog::new("Popup", "")));
        assert_eq!(engine.layers.layer(LayerId::Ui).len(), 2);
    }

    #[test]
    fn test_show_scene_keeps_hit_regions() {
        let mut engine = engine();
        engine
            .input
            .register_clickable(Rect::new(4.0, -2.0, 1.0, 1.0), Space::Game, "demo.mine");
        engine.add_tooltip(Rect::new(4.0, -2.0, 1.0, 1.0), Space::Game, "a mine");

        engine.show_scene(Dialog::new("Intro", ""));
        assert_eq!(engine.input.clickable_count(), 1);
        assert_eq!(engine.tooltip_count(), 1);
    }

    #[test]
    fn test_add_tooltip_wires_hover_region() {
        let mut engine = engine();
        let id = engine.add_tooltip(
            Rect::new(0.0, 0.0, 2.0, 2.0),
            Space::Game,
            "a tile",
        );
        assert_eq!(id, 0);
        assert_eq!(engine.tooltip_count(), 1);
    }

    #[test]
    fn test_overlay_visibility_gates_tooltips() {
        let mut engine = engine();
        engine.add_tooltip(Rect::new(0.0, 0.0, 1.0, 1.0), Space::Game, "hint");
        assert!(engine.layers.layer(LayerId::Overlay).is_visible());

        engine.set_layer_visible(LayerId::Overlay, false);
        assert!(!engine.layers.layer(LayerId::Overlay).is_visible());
        assert_eq!(engine.tooltip_count(), 1);
    }

    #[test]
    fn test_setup_camera_applies_state() {
        let mut engine = engine();
        engine.setup_camera(CameraSetup {
            rotation: 45.0,
            isometry: 0.5,
            zoom: 10.0,
            ..Default::default()
        });
        assert!((engine.camera.rotation() - 45.0).abs() < 1e-4);
        assert!((engine.camera.flatness() - 0.5).abs() < 1e-4);
        assert!((engine.camera.zoom_level().x - 10.0).abs() < 1e-4);
        assert!(!engine.input.bindings_table().is_empty());
    }
}
