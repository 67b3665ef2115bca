//! Rendering systems: gizmo outlines for every [`Visual`] and the text HUD.
//!
//! ## Coordinate Model
//!
//! The simulation works in screen space (origin top-left, y down, rotation 0
//! facing up and growing clockwise).  Bevy's 2D camera is centred with y up,
//! so every point goes through [`to_world`] right before it is handed to
//! [`Gizmos`].  Shapes are built in screen space by [`strokes`], which keeps
//! them testable without a renderer.
//!
//! ## System Responsibilities
//!
//! | System                  | Schedule | Purpose                              |
//! |-------------------------|----------|--------------------------------------|
//! | `setup_hud`             | Startup  | Spawn score / high score / level HUD |
//! | `game_render_system`    | Update   | Draw the active scene with gizmos    |
//! | `hud_display_system`    | Update   | Refresh HUD text                     |

use crate::config::GameConfig;
use crate::game::Game;
use crate::geometry::heading;
use crate::render::{Canvas, RenderItem, Visual};
use bevy::prelude::*;
use std::f32::consts::TAU;

// ── Colours ───────────────────────────────────────────────────────────────────

fn ship_color() -> Color {
    Color::srgb(0.90, 0.92, 1.0)
}
fn exhaust_color() -> Color {
    Color::srgb(1.0, 0.62, 0.18)
}
fn shield_color() -> Color {
    Color::srgba(0.35, 0.75, 1.0, 0.8)
}
fn meteor_color() -> Color {
    Color::srgb(0.72, 0.66, 0.58)
}
fn explosion_color() -> Color {
    Color::srgb(1.0, 0.45, 0.12)
}
fn laser_color() -> Color {
    Color::srgb(0.35, 1.0, 0.45)
}
fn alien_laser_color() -> Color {
    Color::srgb(1.0, 0.25, 0.25)
}
fn hyperspace_color() -> Color {
    Color::srgb(0.75, 0.45, 1.0)
}

// ── Shapes ────────────────────────────────────────────────────────────────────

/// One gizmo primitive in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stroke {
    Line { from: Vec2, to: Vec2, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
}

/// Screen-space frame attached to a rotated item.
struct Frame {
    origin: Vec2,
    forward: Vec2,
    right: Vec2,
}

impl Frame {
    fn new(origin: Vec2, rotation: f32) -> Self {
        let forward = heading(rotation);
        Self {
            origin,
            forward,
            right: Vec2::new(-forward.y, forward.x),
        }
    }

    /// Point `ahead` px along the heading and `side` px to its right.
    fn at(&self, ahead: f32, side: f32) -> Vec2 {
        self.origin + self.forward * ahead + self.right * side
    }
}

/// Closed outline through `points`.
fn polygon(points: &[Vec2], color: Color, out: &mut Vec<Stroke>) {
    for (i, &from) in points.iter().enumerate() {
        let to = points[(i + 1) % points.len()];
        out.push(Stroke::Line { from, to, color });
    }
}

fn ship_outline(frame: &Frame, scale: f32, color: Color, out: &mut Vec<Stroke>) {
    let points = [
        frame.at(24.0 * scale, 0.0),
        frame.at(-18.0 * scale, 16.0 * scale),
        frame.at(-10.0 * scale, 0.0),
        frame.at(-18.0 * scale, -16.0 * scale),
    ];
    polygon(&points, color, out);
}

/// Lumpy meteor outline; `variant` picks a fixed vertex pattern.
fn meteor_outline(center: Vec2, rotation: f32, radius: f32, variant: u8, out: &mut Vec<Stroke>) {
    const VERTICES: u32 = 10;
    let points: Vec<Vec2> = (0..VERTICES)
        .map(|i| {
            let lump = ((i * 7 + u32::from(variant) * 13) % 5) as f32 / 4.0;
            let angle = rotation + i as f32 * TAU / VERTICES as f32;
            center + Vec2::from_angle(angle) * radius * (0.78 + 0.22 * lump)
        })
        .collect();
    polygon(&points, meteor_color(), out);
}

/// Screen-space primitives for one item.
pub fn strokes(item: &RenderItem, config: &GameConfig) -> Vec<Stroke> {
    let mut out = Vec::new();
    let frame = Frame::new(item.position, item.rotation);
    match item.visual {
        Visual::Ship => ship_outline(&frame, 1.0, ship_color(), &mut out),
        Visual::ShipExplosion { frame: n } => {
            let progress = (n + 1) as f32 / config.dying_frames.max(1) as f32;
            out.push(Stroke::Circle {
                center: item.position,
                radius: config.player_radius * (0.3 + progress),
                color: explosion_color().with_alpha(1.0 - 0.7 * progress),
            });
            ship_outline(&frame, 1.0 - 0.5 * progress, ship_color(), &mut out);
        }
        Visual::Exhaust => {
            let points = [frame.at(0.0, -6.0), frame.at(14.0, 0.0), frame.at(0.0, 6.0)];
            polygon(&points, exhaust_color(), &mut out);
        }
        Visual::Shield => out.push(Stroke::Circle {
            center: item.position,
            radius: config.shield_radius,
            color: shield_color(),
        }),
        Visual::MeteorLarge { variant } => meteor_outline(
            item.position,
            item.rotation,
            config.large_meteor_radius,
            variant,
            &mut out,
        ),
        Visual::MeteorSmall { variant } => meteor_outline(
            item.position,
            item.rotation,
            config.small_meteor_radius,
            variant,
            &mut out,
        ),
        Visual::Explosion { radius } => {
            for scale in [0.5, 1.0] {
                out.push(Stroke::Circle {
                    center: item.position,
                    radius: radius * scale,
                    color: explosion_color(),
                });
            }
        }
        Visual::Laser | Visual::AlienLaser => {
            let color = if item.visual == Visual::Laser {
                laser_color()
            } else {
                alien_laser_color()
            };
            let (w, h) = (config.laser_half_width, config.laser_half_height);
            let points = [
                frame.at(h, -w),
                frame.at(h, w),
                frame.at(-h, w),
                frame.at(-h, -w),
            ];
            polygon(&points, color, &mut out);
        }
        Visual::Alien { intelligent } => {
            let r = config.alien_radius;
            let color = if intelligent {
                Color::srgb(1.0, 0.35, 0.35)
            } else {
                Color::srgb(0.85, 0.45, 1.0)
            };
            let hull = [
                item.position + Vec2::new(-r, 0.0),
                item.position + Vec2::new(-r * 0.5, r * 0.35),
                item.position + Vec2::new(r * 0.5, r * 0.35),
                item.position + Vec2::new(r, 0.0),
                item.position + Vec2::new(r * 0.5, -r * 0.3),
                item.position + Vec2::new(-r * 0.5, -r * 0.3),
            ];
            polygon(&hull, color, &mut out);
            out.push(Stroke::Circle {
                center: item.position + Vec2::new(0.0, -r * 0.35),
                radius: r * 0.3,
                color,
            });
        }
        Visual::Star { radius, brightness } => out.push(Stroke::Circle {
            center: item.position,
            radius,
            color: Color::srgb(brightness, brightness, brightness),
        }),
        Visual::LifeIndicator => ship_outline(&frame, 0.6, ship_color(), &mut out),
        Visual::ShieldIndicator => out.push(Stroke::Circle {
            center: item.position,
            radius: 10.0,
            color: shield_color(),
        }),
        Visual::HyperspaceIndicator => {
            let points = [
                item.position + Vec2::new(0.0, -10.0),
                item.position + Vec2::new(8.0, 0.0),
                item.position + Vec2::new(0.0, 10.0),
                item.position + Vec2::new(-8.0, 0.0),
            ];
            polygon(&points, hyperspace_color(), &mut out);
        }
    }
    out
}

/// Screen space (top-left origin, y down) to Bevy world space (centred, y up).
pub fn to_world(point: Vec2, screen: Vec2) -> Vec2 {
    Vec2::new(point.x - screen.x * 0.5, screen.y * 0.5 - point.y)
}

// ── Gizmo canvas ──────────────────────────────────────────────────────────────

/// [`Canvas`] that draws through Bevy gizmos.
pub struct GizmoCanvas<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's>,
    config: &'a GameConfig,
}

impl Canvas for GizmoCanvas<'_, '_, '_> {
    fn draw(&mut self, item: &RenderItem) {
        let screen = self.config.screen_size();
        for stroke in strokes(item, self.config) {
            match stroke {
                Stroke::Line { from, to, color } => {
                    self.gizmos
                        .line_2d(to_world(from, screen), to_world(to, screen), color);
                }
                Stroke::Circle {
                    center,
                    radius,
                    color,
                } => {
                    self.gizmos.circle_2d(to_world(center, screen), radius, color);
                }
            }
        }
    }
}

/// Draw the active scene.
pub fn game_render_system(mut gizmos: Gizmos, game: Res<Game>, config: Res<GameConfig>) {
    let mut canvas = GizmoCanvas {
        gizmos: &mut gizmos,
        config: &config,
    };
    game.render(&mut canvas, &config);
}

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Which HUD line a text node shows.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudText {
    Score,
    HighScore,
    Level,
}

/// Spawn the permanent top-right HUD (always visible).
pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            right: Val::Px(16.0),
            top: Val::Px(10.0),
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::FlexEnd,
            ..default()
        })
        .with_children(|parent| {
            for (field, color) in [
                (HudText::Score, Color::srgb(0.95, 0.88, 0.45)),
                (HudText::HighScore, Color::srgb(0.55, 0.55, 0.65)),
                (HudText::Level, Color::srgb(0.55, 0.55, 0.65)),
            ] {
                parent.spawn((
                    Text::new(""),
                    TextFont {
                        font_size: 20.0,
                        ..default()
                    },
                    TextColor(color),
                    field,
                ));
            }
        });
}

/// HUD line for `field`.
pub fn hud_line(field: HudText, game: &Game) -> String {
    match field {
        HudText::Score => format!("Score: {}", game.scene().score()),
        HudText::HighScore => format!("High: {}", game.high_score().best()),
        HudText::Level => format!("Level {}", game.scene().level()),
    }
}

/// Refresh the HUD whenever the game changed.
pub fn hud_display_system(game: Res<Game>, mut texts: Query<(&HudText, &mut Text)>) {
    if !game.is_changed() {
        return;
    }
    for (field, mut text) in texts.iter_mut() {
        *text = Text::new(hud_line(*field, &game));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(visual: Visual) -> RenderItem {
        RenderItem::new(Vec2::new(640.0, 360.0), 0.0, visual)
    }

    #[test]
    fn screen_corners_map_to_world() {
        let screen = Vec2::new(1280.0, 720.0);
        assert_eq!(to_world(Vec2::new(640.0, 360.0), screen), Vec2::ZERO);
        assert_eq!(to_world(Vec2::ZERO, screen), Vec2::new(-640.0, 360.0));
        assert_eq!(to_world(screen, screen), Vec2::new(640.0, -360.0));
    }

    #[test]
    fn unrotated_ship_points_up_on_screen() {
        let config = GameConfig::default();
        let lines = strokes(&item(Visual::Ship), &config);
        assert_eq!(lines.len(), 4);
        let Stroke::Line { from: nose, .. } = lines[0] else {
            panic!("ship outline is made of lines");
        };
        assert!(nose.y < 360.0);
        assert!(to_world(nose, config.screen_size()).y > 0.0);
    }

    #[test]
    fn meteor_outline_is_closed_and_sized() {
        let config = GameConfig::default();
        let lines = strokes(&item(Visual::MeteorLarge { variant: 2 }), &config);
        assert_eq!(lines.len(), 10);
        for stroke in &lines {
            let Stroke::Line { from, .. } = stroke else {
                panic!("meteor outline is made of lines");
            };
            let distance = from.distance(Vec2::new(640.0, 360.0));
            assert!(distance <= config.large_meteor_radius + 1e-3);
            assert!(distance >= config.large_meteor_radius * 0.78 - 1e-3);
        }
    }

    #[test]
    fn shield_uses_configured_radius() {
        let config = GameConfig::default();
        assert_eq!(
            strokes(&item(Visual::Shield), &config),
            vec![Stroke::Circle {
                center: Vec2::new(640.0, 360.0),
                radius: config.shield_radius,
                color: shield_color(),
            }]
        );
    }
}
