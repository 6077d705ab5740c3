//! Scene assembly: turns a `GameState` into colored triangles in playfield
//! coordinates. Pure, so it runs (and is tested) without a GPU.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::{Aabb, FoodItem, FoodKind, GameState, Player};

const SEGMENTS: u32 = 24;
/// Height of the sand strip along the bottom edge
const SAND_HEIGHT: f32 = 12.0;

/// Build every vertex for one frame, back to front
pub fn build_scene(state: &GameState) -> Vec<Vertex> {
    let (w, h) = (state.tuning.screen_width, state.tuning.screen_height);
    let mut vertices = Vec::with_capacity(1024);

    let water = Aabb::new(Vec2::ZERO, Vec2::new(w, h));
    vertices.extend(shapes::gradient_rect(
        &water,
        colors::WATER_TOP,
        colors::WATER_BOTTOM,
    ));
    let sand = Aabb::new(Vec2::new(0.0, h - SAND_HEIGHT), Vec2::new(w, h));
    vertices.extend(shapes::rect(&sand, colors::SAND));

    for food in &state.foods {
        push_food(&mut vertices, food);
    }
    push_player(&mut vertices, &state.player);

    if state.is_game_over() {
        vertices.extend(shapes::rect(&water, colors::GAME_OVER_DIM));
    }
    vertices
}

fn push_food(out: &mut Vec<Vertex>, food: &FoodItem) {
    let c = food.pos;
    let r = food.size / 2.0;
    match food.kind {
        FoodKind::Shrimp => {
            // Curled body with a tail fan
            out.extend(shapes::ellipse(c, Vec2::new(r * 0.6, r * 0.35), colors::SHRIMP, SEGMENTS));
            out.extend(shapes::triangle(
                c + Vec2::new(r * 0.5, 0.0),
                c + Vec2::new(r * 0.9, -r * 0.3),
                c + Vec2::new(r * 0.9, r * 0.3),
                colors::SHRIMP,
            ));
        }
        FoodKind::Fish => {
            out.extend(shapes::ellipse(c, Vec2::new(r * 0.7, r * 0.4), colors::FISH, SEGMENTS));
            out.extend(shapes::triangle(
                c + Vec2::new(-r * 0.6, 0.0),
                c + Vec2::new(-r * 0.95, -r * 0.35),
                c + Vec2::new(-r * 0.95, r * 0.35),
                colors::FISH,
            ));
            out.extend(shapes::circle(
                c + Vec2::new(r * 0.35, -r * 0.1),
                r * 0.08,
                colors::EYE,
                8,
            ));
        }
        FoodKind::Toxin => {
            out.extend(shapes::circle(c, r * 0.6, colors::TOXIN, SEGMENTS));
            out.extend(shapes::circle(c, r * 0.3, colors::TOXIN_CORE, SEGMENTS));
        }
    }
}

fn push_player(out: &mut Vec<Vertex>, player: &Player) {
    let c = player.pos;
    let r = player.size / 2.0;

    // Gills behind the head
    for side in [-1.0, 1.0] {
        for i in 0..3 {
            let dy = (i as f32 - 1.0) * r * 0.18;
            out.extend(shapes::ellipse(
                c + Vec2::new(side * r * 0.62, -r * 0.1 + dy),
                Vec2::new(r * 0.2, r * 0.06),
                colors::AXOLOTL_GILLS,
                12,
            ));
        }
    }
    out.extend(shapes::ellipse(c, Vec2::new(r * 0.6, r * 0.5), colors::AXOLOTL, SEGMENTS));

    for side in [-1.0, 1.0] {
        out.extend(shapes::circle(
            c + Vec2::new(side * r * 0.25, -r * 0.12),
            r * 0.07,
            colors::EYE,
            10,
        ));
    }

    // Mouth opens wider on later animation frames
    let open = mouth_opening(player.frame());
    out.extend(shapes::ellipse(
        c + Vec2::new(0.0, r * 0.18),
        Vec2::new(r * 0.2, r * (0.03 + 0.07 * open)),
        colors::MOUTH,
        SEGMENTS,
    ));
}

/// 0.0 closed (idle) up to 1.0 on the last eating frame
fn mouth_opening(frame: u8) -> f32 {
    let last = crate::consts::ANIMATION_FRAMES.saturating_sub(1).max(1);
    f32::from(frame.min(last)) / f32::from(last)
}
