//! Tiles, tilemaps and the labelled coordinate grid

use macroquad::prelude::*;

use super::Renderable;
use crate::camera::Camera2D;
use crate::input::{InputHandler, Space};
use crate::renderer::Renderer;

/// A game-space quad: filled with a color, or textured. Tiles are placed by
/// their anchor corner; the quad's corners go through the full projection,
/// so tiles rotate and skew with the camera.
pub struct Tile {
    pub name: String,
    /// Anchor corner in game coordinates.
    pub pos: Vec2,
    /// Width/height in game units.
    pub size: Vec2,
    pub color: Color,
    pub texture: Option<Texture2D>,
    /// Dimmed when false (textured tiles only).
    pub highlighted: bool,
    /// App action id fired when the tile is clicked.
    pub click_action: Option<&'static str>,
}

impl Tile {
    pub fn new(name: &str, pos: Vec2, size: Vec2, color: Color) -> Self {
        Self {
            name: name.to_string(),
            pos,
            size,
            color,
            texture: None,
            highlighted: true,
            click_action: None,
        }
    }

    pub fn with_texture(mut self, texture: Texture2D) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_click_action(mut self, action: &'static str) -> Self {
        self.click_action = Some(action);
        self
    }

    /// Corner points in game coordinates, counter-clockwise from the anchor.
    pub fn corners(&self) -> [Vec2; 4] {
        let (p, s) = (self.pos, self.size);
        [
            p,
            vec2(p.x + s.x, p.y),
            vec2(p.x + s.x, p.y + s.y),
            vec2(p.x, p.y + s.y),
        ]
    }

    /// Axis-aligned bounding rect in game coordinates, for hit regions.
    pub fn hit_rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    fn render_area(&self, camera: &Camera2D) {
        let p = camera.screen_coords_many(&self.corners());
        draw_triangle(p[0], p[1], p[2], self.color);
        draw_triangle(p[0], p[2], p[3], self.color);
    }

    fn render_texture(&self, texture: &Texture2D, camera: &Camera2D) {
        // Textured tiles stay axis-aligned on screen; the destination size
        // tracks the camera zoom directly.
        let dest = self.size * camera.zoom_level();
        let center = camera.screen_coords(self.pos + self.size * 0.5);
        let tint = if self.highlighted { WHITE } else { GRAY };
        draw_texture_ex(
            texture,
            center.x - dest.x * 0.5,
            center.y - dest.y * 0.5,
            tint,
            DrawTextureParams {
                dest_size: Some(dest),
                ..Default::default()
            },
        );
    }
}

impl Renderable for Tile {
    fn render(&self, renderer: &mut Renderer, camera: &Camera2D) {
        match &self.texture {
            Some(texture) => self.render_texture(texture, camera),
            None => self.render_area(camera),
        }
        if renderer.debug {
            let r = camera.screen_rect(self.hit_rect());
            draw_rectangle_lines(r.x, r.y, r.w, r.h, 1.0, renderer.color("DEBUG"));
        }
    }
}

/// A render group of tiles with bulk construction and hit-region wiring.
pub struct Tilemap {
    pub name: String,
    tiles: Vec<Tile>,
}

impl Tilemap {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tiles: Vec::new(),
        }
    }

    /// Build from (position, size, color) rows.
    pub fn from_rows(name: &str, rows: &[(Vec2, Vec2, Color)]) -> Self {
        let mut map = Self::new(name);
        for (i, &(pos, size, color)) in rows.iter().enumerate() {
            map.add(Tile::new(&format!("{} {}", name, i), pos, size, color));
        }
        map
    }

    pub fn add(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Register a game-space clickable for every tile that has one.
    pub fn register_hit_regions(&self, input: &mut InputHandler) {
        for tile in &self.tiles {
            if let Some(action) = tile.click_action {
                input.register_clickable(tile.hit_rect(), Space::Game, action);
            }
        }
    }
}

impl Renderable for Tilemap {
    fn render(&self, renderer: &mut Renderer, camera: &Camera2D) {
        for tile in &self.tiles {
            tile.render(renderer, camera);
        }
    }
}

/// A labelled coordinate grid over x/y ranges, line endpoints projected
/// through the camera.
pub struct Grid {
    pub x_range: (i32, i32),
    pub y_range: (i32, i32),
    pub spacing: (i32, i32),
    pub color_x: Color,
    pub color_y: Color,
    pub labels: bool,
    pub width: f32,
}

impl Grid {
    pub fn new(x_range: (i32, i32), y_range: (i32, i32), spacing: i32, color: Color) -> Self {
        Self {
            x_range,
            y_range,
            spacing: (spacing.max(1), spacing.max(1)),
            color_x: color,
            color_y: color,
            labels: true,
            width: 1.0,
        }
    }
}

impl Renderable for Grid {
    fn render(&self, renderer: &mut Renderer, camera: &Camera2D) {
        let (min_x, max_x) = self.x_range;
        let (min_y, max_y) = self.y_range;

        let mut x = min_x;
        while x <= max_x {
            let a = camera.screen_coords(vec2(x as f32, min_y as f32));
            let b = camera.screen_coords(vec2(x as f32, max_y as f32));
            draw_line(a.x, a.y, b.x, b.y, self.width, self.color_x);
            if self.labels && x < max_x {
                let pos = camera.screen_coords(vec2(x as f32 + 0.5, min_y as f32 - 0.5));
                renderer.draw_text_block(&x.to_string(), self.color_x, pos, 16.0, None);
            }
            x += self.spacing.0;
        }

        let mut y = min_y;
        while y <= max_y {
            let a = camera.screen_coords(vec2(min_x as f32, y as f32));
            let b = camera.screen_coords(vec2(max_x as f32, y as f32));
            draw_line(a.x, a.y, b.x, b.y, self.width, self.color_y);
            if self.labels && y < max_y {
                let pos = camera.screen_coords(vec2(min_x as f32 - 0.5, y as f32 + 0.5));
                renderer.draw_text_block(&y.to_string(), self.color_y, pos, 16.0, None);
            }
            y += self.spacing.1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_corners() {
        let tile = Tile::new("t", vec2(2.0, 3.0), vec2(4.0, 1.0), WHITE);
        let c = tile.corners();
        assert_eq!(c[0], vec2(2.0, 3.0));
        assert_eq!(c[1], vec2(6.0, 3.0));
        assert_eq!(c[2], vec2(6.0, 4.0));
        assert_eq!(c[3], vec2(2.0, 4.0));

        let r = tile.hit_rect();
        assert_eq!((r.x, r.y, r.w, r.h), (2.0, 3.0, 4.0, 1.0));
    }

    #[test]
    fn test_tilemap_from_rows() {
        let map = Tilemap::from_rows(
            "floor",
            &[
                (vec2(0.0, 0.0), vec2(1.0, 1.0), WHITE),
                (vec2(1.0, 0.0), vec2(1.0, 1.0), GRAY),
            ],
        );
        assert_eq!(map.len(), 2);
        assert_eq!(map.tiles()[1].pos, vec2(1.0, 0.0));
    }

    #[test]
    fn test_hit_region_registration_skips_inert_tiles() {
        let mut map = Tilemap::new("m");
        map.add(Tile::new("plain", vec2(0.0, 0.0), vec2(1.0, 1.0), WHITE));
        map.add(
            Tile::new("hot", vec2(1.0, 0.0), vec2(1.0, 1.0), WHITE)
                .with_click_action("demo.tile"),
        );
        let mut input = InputHandler::new();
        map.register_hit_regions(&mut input);
        assert_eq!(input.clickable_count(), 1);
    }
}
