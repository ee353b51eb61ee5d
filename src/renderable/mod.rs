//! Renderable primitives
//!
//! Everything that can be placed on a render layer implements `Renderable`:
//! it receives the shared renderer (theme, text helpers) and the camera, and
//! projects its own game-space geometry before issuing draw calls.

pub mod dialog;
pub mod tiles;
pub mod ui;

pub use dialog::{Dialog, DialogOption, PopupMenu};
pub use tiles::{Grid, Tile, Tilemap};
pub use ui::{Label, Tooltip};

use crate::camera::Camera2D;
use crate::renderer::Renderer;

pub trait Renderable {
    fn render(&self, renderer: &mut Renderer, camera: &Camera2D);
}

/// A named, ordered collection of renderables drawn as one unit.
pub struct RenderGroup {
    pub name: String,
    items: Vec<Box<dyn Renderable>>,
}

impl RenderGroup {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            items: Vec::new(),
        }
    }

    pub fn add(&mut self, item: Box<dyn Renderable>) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Renderable for RenderGroup {
    fn render(&self, renderer: &mut Renderer, camera: &Camera2D) {
        for item in &self.items {
            item.render(renderer, camera);
        }
    }
}
