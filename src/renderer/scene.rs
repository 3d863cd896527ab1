//! Scene and HUD rendering for the playfield

use glam::Vec2;

use super::{DrawSink, TextAlign, TextStyle};
use crate::consts::PLAYFIELD_SIZE;
use crate::settings::Palette;
use crate::sim::World;

/// Font used for the in-game HUD
pub const HUD_FONT: &str = "10px sans-serif";

/// Drawn radius of a circular body. Half the collision radius.
#[inline]
pub fn drawn_radius(size: u32) -> f32 {
    (size / 2) as f32
}

/// "Score: N"
pub fn score_line(world: &World) -> String {
    format!("Score: {}", world.tower.score)
}

/// "Level: N"
pub fn level_line(world: &World) -> String {
    format!("Level: {}", world.level)
}

/// Tower statistics shown along the bottom edge
pub fn statistics_line(world: &World) -> String {
    format!(
        "Firedelay: {}   Bullet-size: {}   Upgrade cost:{}",
        world.tower.fire_delay,
        world.tower.fire_size,
        world.upgrade_cost()
    )
}

/// Draw the full playfield: tower, projectiles, enemies, then the HUD
pub fn render_world<S: DrawSink + ?Sized>(world: &World, palette: &Palette, sink: &mut S) {
    sink.clear(PLAYFIELD_SIZE, PLAYFIELD_SIZE);

    render_tower(world, palette, sink);
    for projectile in &world.projectiles {
        sink.stroke_circle(projectile.pos, drawn_radius(projectile.size), &palette.stroke);
    }
    for enemy in &world.enemies {
        sink.fill_square(enemy.pos, enemy.size as f32, &palette.fill);
    }

    draw_score(world, palette, sink);
    draw_statistics(world, palette, sink);
}

/// Draw only the tower (used on attach, before the first tick)
pub fn render_tower<S: DrawSink + ?Sized>(world: &World, palette: &Palette, sink: &mut S) {
    let tower = &world.tower;
    sink.stroke_circle(tower.pos, drawn_radius(tower.size), &palette.stroke);
}

fn draw_score<S: DrawSink + ?Sized>(world: &World, palette: &Palette, sink: &mut S) {
    let origin = Vec2::new(10.0, 10.0);
    let score = score_line(world);
    let width = sink.measure_text(&score, HUD_FONT);
    sink.fill_rect(Vec2::new(origin.x, 0.0), Vec2::new(width, 30.0), &palette.background);

    let style = TextStyle::new(&palette.fill, HUD_FONT, TextAlign::Left);
    sink.fill_text(&score, origin, &style);
    sink.fill_text(&level_line(world), origin + Vec2::new(0.0, 15.0), &style);
}

fn draw_statistics<S: DrawSink + ?Sized>(world: &World, palette: &Palette, sink: &mut S) {
    let stats = statistics_line(world);
    let width = sink.measure_text(&stats, HUD_FONT);
    sink.fill_rect(Vec2::new(10.0, 730.0), Vec2::new(width, 15.0), &palette.background);
    sink.fill_text(
        &stats,
        Vec2::new(10.0, 740.0),
        &TextStyle::new(&palette.fill, HUD_FONT, TextAlign::Left),
    );
}

/// Draw the end screen over a cleared surface
pub fn render_game_over<S: DrawSink + ?Sized>(world: &World, palette: &Palette, sink: &mut S) {
    sink.clear(PLAYFIELD_SIZE, PLAYFIELD_SIZE);

    let x = (PLAYFIELD_SIZE / 2.0).floor();
    let y = (PLAYFIELD_SIZE / 5.0).floor();
    let lines = [
        ("++ Thank you for playing ++".to_string(), "18px monospace", 0.0),
        ("Pixel Wars!".to_string(), "36px monospace", 85.0),
        (format!("Level reached: {}", world.level), "18px monospace", 220.0),
        (format!("Final score: {}", world.tower.score), "18px monospace", 260.0),
    ];

    for (text, font, dy) in lines {
        let style = TextStyle::new(&palette.stroke, font, TextAlign::Center);
        sink.fill_text(&text, Vec2::new(x, y + dy), &style);
    }
}
