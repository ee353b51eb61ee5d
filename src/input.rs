//! Input-binding dispatcher
//!
//! Bindings map raw device triggers (key press/hold/release, mouse buttons,
//! wheel) to actions. Camera actions are applied directly to the camera
//! during `update`; app-defined actions are returned as string ids for the
//! caller to handle (same id convention as "edit.undo"-style registries).
//!
//! Clickable and hoverable regions can live in screen space or game space;
//! game-space regions hit-test by sending the pointer through the camera's
//! inverse transform.

use macroquad::prelude::*;

use crate::camera::Camera2D;
use crate::renderable::dialog::DialogOption;

/// A raw device trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    KeyPress(KeyCode),
    KeyRelease(KeyCode),
    KeyHold(KeyCode),
    MousePress(MouseButton),
    MouseHold(MouseButton),
    WheelUp,
    WheelDown,
}

/// What a binding does when its trigger fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    /// Multiply camera zoom by a uniform factor.
    Zoom(f32),
    /// Pan the camera by a game-space delta.
    Pan(f32, f32),
    /// Rotate the camera by degrees.
    Rotate(f32),
    /// Tilt the camera flatness by a delta.
    Tilt(f32),
    /// Anchor a camera drag gesture at the pointer.
    DragStart,
    /// Continue the camera drag gesture.
    Drag,
    /// Forward an app-defined action id to the caller.
    Emit(&'static str),
}

/// Which coordinate space a hit region is defined in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    Screen,
    Game,
}

/// Events surfaced from `update` for the app to handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// An `Emit` binding, a clickable region, or a button fired.
    Action(&'static str),
    /// A hover region changed state (id, now hovered).
    HoverChanged(usize, bool),
}

struct Binding {
    trigger: Trigger,
    action: InputAction,
    name: String,
}

struct Clickable {
    rect: Rect,
    space: Space,
    action: &'static str,
}

struct HoverRegion {
    rect: Rect,
    space: Space,
    id: usize,
    hovered: bool,
}

/// A clickable screen-space button: press on mouse-down inside, fire on
/// release while still inside.
pub struct Button {
    pub rect: Rect,
    pub text: String,
    pub action: &'static str,
    pub hovered: bool,
    pub pressed: bool,
}

impl Button {
    pub fn new(rect: Rect, text: &str, action: &'static str) -> Self {
        Self {
            rect,
            text: text.to_string(),
            action,
            hovered: false,
            pressed: false,
        }
    }
}

/// Does `rect` (in `space`) contain the screen-space pointer?
fn region_contains(rect: Rect, space: Space, pointer: Vec2, camera: &Camera2D) -> bool {
    match space {
        Space::Screen => rect.contains(pointer),
        Space::Game => rect.contains(camera.game_coords(pointer)),
    }
}

pub struct InputHandler {
    bindings: Vec<Binding>,
    clickables: Vec<Clickable>,
    hovers: Vec<HoverRegion>,
    buttons: Vec<Button>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
            clickables: Vec::new(),
            hovers: Vec::new(),
            buttons: Vec::new(),
        }
    }

    /// Register a binding with a human-readable name for the bindings table.
    pub fn bind(&mut self, trigger: Trigger, action: InputAction, name: &str) {
        self.bindings.push(Binding {
            trigger,
            action,
            name: name.to_string(),
        });
    }

    /// Human-readable list of registered bindings, sorted.
    pub fn bindings_table(&self) -> Vec<String> {
        let mut rows: Vec<String> = self
            .bindings
            .iter()
            .map(|b| format!("{}: {}", trigger_label(b.trigger), b.name))
            .collect();
        rows.sort();
        rows
    }

    pub fn clickable_count(&self) -> usize {
        self.clickables.len()
    }

    pub fn register_clickable(&mut self, rect: Rect, space: Space, action: &'static str) {
        self.clickables.push(Clickable {
            rect,
            space,
            action,
        });
    }

    /// Register a hover region; `HoverChanged(id, _)` events carry `id` back.
    pub fn register_hover(&mut self, rect: Rect, space: Space, id: usize) {
        self.hovers.push(HoverRegion {
            rect,
            space,
            id,
            hovered: false,
        });
    }

    pub fn add_button(&mut self, button: Button) {
        self.buttons.push(button);
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    // ------------------------------------------------------------------
    // Convenience binders
    // ------------------------------------------------------------------

    /// Mouse wheel zooms the camera in/out by `change` per notch.
    pub fn bind_camera_zoom_to_wheel(&mut self, change: f32) {
        self.bind(Trigger::WheelUp, InputAction::Zoom(1.0 + change), "Camera zoom in");
        self.bind(Trigger::WheelDown, InputAction::Zoom(1.0 - change), "Camera zoom out");
    }

    /// Arrow keys pan the camera in game space.
    pub fn bind_camera_pan_to_arrows(&mut self, speed: f32) {
        self.bind(Trigger::KeyHold(KeyCode::Up), InputAction::Pan(0.0, speed), "Camera pan up");
        self.bind(Trigger::KeyHold(KeyCode::Down), InputAction::Pan(0.0, -speed), "Camera pan down");
        self.bind(Trigger::KeyHold(KeyCode::Left), InputAction::Pan(-speed, 0.0), "Camera pan left");
        self.bind(Trigger::KeyHold(KeyCode::Right), InputAction::Pan(speed, 0.0), "Camera pan right");
    }

    /// Left/right arrows rotate, up/down arrows tilt.
    pub fn bind_camera_rotate_to_arrows(&mut self, speed: f32) {
        self.bind(
            Trigger::KeyHold(KeyCode::Up),
            InputAction::Tilt(speed / 360.0),
            "Camera tilt up",
        );
        self.bind(
            Trigger::KeyHold(KeyCode::Down),
            InputAction::Tilt(-speed / 360.0),
            "Camera tilt down",
        );
        self.bind(
            Trigger::KeyHold(KeyCode::Left),
            InputAction::Rotate(speed),
            "Camera rotate counter-clockwise",
        );
        self.bind(
            Trigger::KeyHold(KeyCode::Right),
            InputAction::Rotate(-speed),
            "Camera rotate clockwise",
        );
    }

    /// Holding a mouse button drags the projection center.
    pub fn bind_camera_pan_to_mouse_drag(&mut self, button: MouseButton) {
        self.bind(Trigger::MousePress(button), InputAction::DragStart, "Camera drag start");
        self.bind(Trigger::MouseHold(button), InputAction::Drag, "Camera drag");
    }

    /// WASD emits movement action ids for the app's own mover.
    pub fn bind_wasd_movement(&mut self) {
        self.bind(Trigger::KeyHold(KeyCode::W), InputAction::Emit("move.north"), "Move up");
        self.bind(Trigger::KeyHold(KeyCode::S), InputAction::Emit("move.south"), "Move down");
        self.bind(Trigger::KeyHold(KeyCode::A), InputAction::Emit("move.west"), "Move left");
        self.bind(Trigger::KeyHold(KeyCode::D), InputAction::Emit("move.east"), "Move right");
    }

    /// Bind dialog options to keys: `1..9` by position plus the option's
    /// first letter when free, rewriting labels to match
    /// (`"Move east"` becomes `"1. [M]ove east"`).
    pub fn bind_dialog_options(&mut self, options: &mut [DialogOption]) {
        let mut used_letters: Vec<char> = Vec::new();
        for i in 0..options.len() {
            let action = options[i].action;
            let mut prefix = String::new();
            if i < 9 {
                if let Some(key) = key_for_digit(i as u32 + 1) {
                    self.bind(Trigger::KeyPress(key), InputAction::Emit(action), &options[i].text);
                }
                prefix = format!("{}. ", i + 1);
            }
            let first = options[i].text.chars().next();
            if let Some(c) = first {
                let lower = c.to_ascii_lowercase();
                if lower.is_ascii_alphabetic() && !used_letters.contains(&lower) {
                    if let Some(key) = key_for_char(lower) {
                        used_letters.push(lower);
                        self.bind(Trigger::KeyPress(key), InputAction::Emit(action), &options[i].text);
                        let bracketed =
                            format!("[{}]{}", lower.to_ascii_uppercase(), &options[i].text[1..]);
                        options[i].text = bracketed;
                    }
                }
            }
            options[i].text.insert_str(0, &prefix);
        }
    }

    /// Scene change: drop key-press bindings and buttons. Hold and mouse
    /// bindings (camera controls) and registered hit regions survive.
    pub fn reset(&mut self) {
        self.bindings
            .retain(|b| !matches!(b.trigger, Trigger::KeyPress(_)));
        self.buttons.clear();
    }

    // ------------------------------------------------------------------
    // Per-frame dispatch
    // ------------------------------------------------------------------

    /// Poll device state once, apply camera actions, and return the events
    /// the app has to handle. Call once per frame before rendering.
    pub fn update(&mut self, camera: &mut Camera2D) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let pointer = Vec2::from(mouse_position());
        let wheel_y = mouse_wheel().1;

        for binding in &self.bindings {
            let fired = match binding.trigger {
                Trigger::KeyPress(key) => is_key_pressed(key),
                Trigger::KeyRelease(key) => is_key_released(key),
                Trigger::KeyHold(key) => is_key_down(key),
                Trigger::MousePress(button) => is_mouse_button_pressed(button),
                Trigger::MouseHold(button) => is_mouse_button_down(button),
                Trigger::WheelUp => wheel_y > 0.0,
                Trigger::WheelDown => wheel_y < 0.0,
            };
            if !fired {
                continue;
            }
            match binding.action {
                InputAction::Zoom(f) => camera.zoom(f),
                InputAction::Pan(dx, dy) => camera.move_by(vec2(dx, dy)),
                InputAction::Rotate(delta) => camera.rotate(delta),
                InputAction::Tilt(delta) => camera.tilt(delta),
                InputAction::DragStart => camera.drag_start(pointer),
                InputAction::Drag => camera.drag_update(pointer),
                InputAction::Emit(id) => events.push(InputEvent::Action(id)),
            }
        }

        // Buttons: hover always, press on down, fire on release inside.
        let left_pressed = is_mouse_button_pressed(MouseButton::Left);
        let left_released = is_mouse_button_released(MouseButton::Left);
        for button in &mut self.buttons {
            button.hovered = button.rect.contains(pointer);
            if !button.hovered {
                button.pressed = false;
            } else if left_pressed {
                button.pressed = true;
            } else if left_released && button.pressed {
                button.pressed = false;
                events.push(InputEvent::Action(button.action));
            }
        }

        // Clickable regions: first hit wins.
        if left_pressed {
            for clickable in &self.clickables {
                if region_contains(clickable.rect, clickable.space, pointer, camera) {
                    events.push(InputEvent::Action(clickable.action));
                    break;
                }
            }
        }

        // Hover regions: report transitions only.
        for hover in &mut self.hovers {
            let inside = region_contains(hover.rect, hover.space, pointer, camera);
            if inside != hover.hovered {
                hover.hovered = inside;
                events.push(InputEvent::HoverChanged(hover.id, inside));
            }
        }

        events
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn trigger_label(trigger: Trigger) -> String {
    match trigger {
        Trigger::KeyPress(key) => format!("press {:?}", key),
        Trigger::KeyRelease(key) => format!("release {:?}", key),
        Trigger::KeyHold(key) => format!("hold {:?}", key),
        Trigger::MousePress(button) => format!("click {:?}", button),
        Trigger::MouseHold(button) => format!("hold {:?}", button),
        Trigger::WheelUp => "wheel up".to_string(),
        Trigger::WheelDown => "wheel down".to_string(),
    }
}

fn key_for_digit(digit: u32) -> Option<KeyCode> {
    Some(match digit {
        1 => KeyCode::Key1,
        2 => KeyCode::Key2,
        3 => KeyCode::Key3,
        4 => KeyCode::Key4,
        5 => KeyCode::Key5,
        6 => KeyCode::Key6,
        7 => KeyCode::Key7,
        8 => KeyCode::Key8,
        9 => KeyCode::Key9,
        _ => return None,
    })
}

fn key_for_char(c: char) -> Option<KeyCode> {
    Some(match c {
        'a' => KeyCode::A,
        'b' => KeyCode::B,
        'c' => KeyCode::C,
        'd' => KeyCode::D,
        'e' => KeyCode::E,
        'f' => KeyCode::F,
        'g' => KeyCode::G,
        'h' => KeyCode::H,
        'i' => KeyCode::I,
        'j' => KeyCode::J,
        'k' => KeyCode::K,
        'l' => KeyCode::L,
        'm' => KeyCode::M,
        'n' => KeyCode::N,
        'o' => KeyCode::O,
        'p' => KeyCode::P,
        'q' => KeyCode::Q,
        'r' => KeyCode::R,
        's' => KeyCode::S,
        't' => KeyCode::T,
        'u' => KeyCode::U,
        'v' => KeyCode::V,
        'w' => KeyCode::W,
        'x' => KeyCode::X,
        'y' => KeyCode::Y,
        'z' => KeyCode::Z,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings_table() {
        let mut input = InputHandler::new();
        input.bind_camera_zoom_to_wheel(0.1);
        input.bind_camera_rotate_to_arrows(0.5);
        let table = input.bindings_table();
        assert_eq!(table.len(), 6);
        assert!(table.iter().any(|row| row.contains("Camera zoom in")));
        assert!(table.iter().any(|row| row.contains("Camera rotate clockwise")));
    }

    #[test]
    fn test_key_for_char() {
        assert_eq!(key_for_char('m'), Some(KeyCode::M));
        assert_eq!(key_for_char('1'), None);
        assert_eq!(key_for_digit(3), Some(KeyCode::Key3));
        assert_eq!(key_for_digit(10), None);
    }

    #[test]
    fn test_bind_dialog_options_rewrites_labels() {
        let mut input = InputHandler::new();
        let mut options = vec![
            DialogOption::new("Move east", "demo.move_east"),
            DialogOption::new("Mine", "demo.mine"),
            DialogOption::new("Quit", "demo.quit"),
        ];
        input.bind_dialog_options(&mut options);

        assert_eq!(options[0].text, "1. [M]ove east");
        // 'm' is taken, so the second option only gets its number key.
        assert_eq!(options[1].text, "2. Mine");
        assert_eq!(options[2].text, "3. [Q]uit");

        // 3 number keys + 2 letter keys.
        assert_eq!(input.bindings.len(), 5);
        assert!(input
            .bindings
            .iter()
            .any(|b| b.trigger == Trigger::KeyPress(KeyCode::Q)
                && b.action == InputAction::Emit("demo.quit")));
    }

    #[test]
    fn test_reset_keeps_hold_bindings() {
        let mut input = InputHandler::new();
        input.bind_camera_zoom_to_wheel(0.1);
        input.bind_camera_pan_to_arrows(1.0);
        let mut options = vec![DialogOption::new("Go", "demo.go")];
        input.bind_dialog_options(&mut options);
        input.add_button(Button::new(Rect::new(0.0, 0.0, 10.0, 10.0), "Go", "demo.go"));

        input.reset();
        assert!(input.buttons.is_empty());
        assert!(input
            .bindings
            .iter()
            .all(|b| !matches!(b.trigger, Trigger::KeyPress(_))));
        // Wheel + arrow-hold bindings survive.
        assert_eq!(input.bindings.len(), 6);
    }

    #[test]
    fn test_reset_keeps_hit_regions() {
        let mut input = InputHandler::new();
        input.register_clickable(Rect::new(0.0, 0.0, 1.0, 1.0), Space::Game, "demo.tile");
        input.register_hover(Rect::new(2.0, 0.0, 1.0, 1.0), Space::Game, 0);

        input.reset();
        assert_eq!(input.clickable_count(), 1);
        assert_eq!(input.hovers.len(), 1);
    }

    #[test]
    fn test_game_space_region_follows_camera() {
        let mut camera = Camera2D::new(vec2(800.0, 600.0));
        let region = Rect::new(0.0, 0.0, 10.0, 10.0);

        // Screen center maps to the camera position (the game origin), which
        // is inside the region.
        assert!(region_contains(region, Space::Game, vec2(400.0, 300.0), &camera));

        // Pan the camera away; the same pointer now misses the region.
        camera.move_by(vec2(100.0, 100.0));
        assert!(!region_contains(region, Space::Game, vec2(400.0, 300.0), &camera));

        // Screen-space regions ignore the camera.
        assert!(region_contains(
            Rect::new(395.0, 295.0, 10.0, 10.0),
            Space::Screen,
            vec2(400.0, 300.0),
            &camera
        ));
    }
}
