//! iso2d sandbox
//!
//! A small demo scene exercising the whole scaffold: a labelled grid, a
//! clickable tilemap, a player marker the camera can follow, and a dialog
//! whose options are bound to keys.
//!
//! Controls: mouse wheel zooms, right-drag pans the view, arrow keys
//! rotate/tilt, WASD moves the player.

// The engine API is wider than this sandbox scene exercises.
#![allow(dead_code)]

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod camera;
mod engine;
mod input;
mod renderable;
mod renderer;
mod theme;

use macroquad::prelude::*;

use camera::EntityId;
use engine::{CameraSetup, Engine};
use input::Space;
use renderable::{Dialog, Grid, Label, RenderGroup, Tile, Tilemap};
use renderer::LayerId;
use theme::Theme;

const PLAYER: EntityId = EntityId(1);

fn window_conf() -> Conf {
    Conf {
        window_title: format!("iso2d v{}", VERSION),
        window_width: 1024,
        window_height: 768,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn build_scene(engine: &mut Engine) {
    engine.show_background("background");

    let grid_color = engine.renderer.color("Grid");
    let mut markers = RenderGroup::new("markers");
    markers.add(Box::new(Grid::new((-10, 10), (-10, 10), 1, grid_color)));
    markers.add(Box::new(Label::new(vec2(0.0, 0.0), "origin").with_size(18.0)));
    engine.add_to_layer(LayerId::Background, Box::new(markers));

    let mut tiles = Tilemap::new("floor");
    tiles.add(Tile::new(
        "water",
        vec2(-3.0, -3.0),
        vec2(2.0, 2.0),
        Color::from_rgba(70, 110, 160, 255),
    ));
    tiles.add(Tile::new(
        "grass",
        vec2(1.0, 1.0),
        vec2(3.0, 2.0),
        Color::from_rgba(90, 140, 80, 255),
    ));
    tiles.add(
        Tile::new(
            "mine",
            vec2(4.0, -2.0),
            vec2(1.0, 1.0),
            Color::from_rgba(120, 100, 70, 255),
        )
        .with_click_action("demo.mine"),
    );
    tiles.register_hit_regions(&mut engine.input);
    engine.add_to_layer(LayerId::Main, Box::new(tiles));

    engine.add_tooltip(
        Rect::new(4.0, -2.0, 1.0, 1.0),
        Space::Game,
        "An old mine.\nClick to dig.",
    );

    let mut dialog = Dialog::new("iso2d sandbox", "A grid, some tiles, one player.");
    dialog.add_option("Follow player", "demo.follow");
    dialog.add_option("Reset camera", "demo.reset");
    dialog.add_option("Quit", "demo.quit");
    engine.show_scene(dialog);

    // Key-press bindings go after show_scene: scene changes drop them.
    engine.input.bind_wasd_movement();
}

#[macroquad::main(window_conf)]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let mut engine = Engine::new(Theme::default(), true);
    engine.setup_camera(CameraSetup::default());
    build_scene(&mut engine);
    engine.camera.follow(PLAYER, 150.0);

    let mut player = vec2(0.0, 0.0);

    loop {
        let step = 4.0 * get_frame_time();

        engine.renderer.debug_line(format!(
            "pos ({:.1}, {:.1})  zoom {:.2}  rot {:.0}  flat {:.2}",
            engine.camera.position().x,
            engine.camera.position().y,
            engine.camera.zoom_level().x,
            engine.camera.rotation(),
            engine.camera.flatness(),
        ));
        engine
            .renderer
            .debug_line(format!("player ({:.1}, {:.1})", player.x, player.y));

        for action in engine.frame() {
            match action {
                "move.north" => player.y += step,
                "move.south" => player.y -= step,
                "move.west" => player.x -= step,
                "move.east" => player.x += step,
                "demo.follow" => engine.camera.follow(PLAYER, 150.0),
                "demo.reset" => {
                    let at = player;
                    engine.camera.reset(|id| (id == PLAYER).then_some(at));
                }
                "demo.mine" => println!("mine clicked"),
                "demo.quit" => return,
                _ => {}
            }
        }

        let at = player;
        engine.camera.update(|id| (id == PLAYER).then_some(at));

        // Player marker, drawn over everything the engine rendered.
        let marker = engine.camera.screen_coords(player);
        draw_circle(marker.x, marker.y, 5.0, RED);

        next_frame().await
    }
}
