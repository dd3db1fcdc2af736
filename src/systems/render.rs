//! Raylib renderer for the windowed demo.
//!
//! This is the renderer collaborator: it consumes a [`PoseSnapshot`] and
//! nothing else, so any other backend could replace it. Visual parameters
//! (colors, line widths, feature sizes) live in [`Theme`], not in the
//! simulation core.

use raylib::prelude::*;

use crate::math::Vec2;
use crate::pose::PoseSnapshot;

/// Colors and stroke widths for the cat.
pub struct Theme {
    pub background: Color,
    pub body: Color,
    pub body_highlight: Color,
    pub limbs: Color,
    pub paws: Color,
    pub tail: Color,
    pub head: Color,
    pub ears: Color,
    pub eyes: Color,
    pub pupils: Color,
    pub nose: Color,
    pub whiskers: Color,
    pub limb_width: f32,
    pub tail_width: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::new(52, 73, 94, 255),
            body: Color::new(139, 69, 19, 255),
            body_highlight: Color::new(160, 82, 45, 255),
            limbs: Color::new(101, 67, 33, 255),
            paws: Color::new(139, 69, 19, 255),
            tail: Color::new(101, 67, 33, 255),
            head: Color::new(139, 69, 19, 255),
            ears: Color::new(101, 67, 33, 255),
            eyes: Color::new(255, 215, 0, 255),
            pupils: Color::BLACK,
            nose: Color::new(255, 105, 180, 255),
            whiskers: Color::WHITE,
            limb_width: 8.0,
            tail_width: 6.0,
        }
    }
}

fn rl(v: Vec2) -> Vector2 {
    Vector2 { x: v.x, y: v.y }
}

/// Draw one complete cat from a pose snapshot.
pub fn draw_pose(d: &mut impl RaylibDraw, pose: &PoseSnapshot, theme: &Theme) {
    draw_tail(d, pose, theme);
    draw_limbs(d, pose, theme);
    draw_body(d, pose, theme);
    draw_head(d, pose, theme);
}

fn draw_body(d: &mut impl RaylibDraw, pose: &PoseSnapshot, theme: &Theme) {
    let body = &pose.body;
    d.draw_ellipse(
        body.position.x as i32,
        body.position.y as i32,
        body.width / 2.0,
        body.height / 2.0,
        theme.body,
    );
    d.draw_ellipse(
        body.position.x as i32,
        body.position.y as i32,
        body.width / 3.0,
        body.height / 3.0,
        theme.body_highlight,
    );
}

fn draw_limbs(d: &mut impl RaylibDraw, pose: &PoseSnapshot, theme: &Theme) {
    for limb in &pose.limbs {
        d.draw_line_ex(rl(limb.base), rl(limb.end), theme.limb_width, theme.limbs);
        d.draw_circle_v(rl(limb.end), 6.0, theme.paws);
    }
}

fn draw_tail(d: &mut impl RaylibDraw, pose: &PoseSnapshot, theme: &Theme) {
    for segment in &pose.tail {
        d.draw_line_ex(rl(segment.start), rl(segment.end), theme.tail_width, theme.tail);
    }
    if let Some(tip) = pose.tail.last() {
        d.draw_circle_v(rl(tip.end), 4.0, theme.tail);
    }
}

fn draw_head(d: &mut impl RaylibDraw, pose: &PoseSnapshot, theme: &Theme) {
    let head = &pose.head;
    let center = head.position;
    let angle = head.angle;
    // Feature offsets are in the head frame (+x toward the nose) and
    // rotated into place.
    let at = |dx: f32, dy: f32| rl(center + Vec2::new(dx, dy).rotated_deg(angle));

    // Ears ride slightly forward of the head center, twitching up a notch.
    let lift = if pose.ear_twitch { 2.0 } else { 0.0 };
    d.draw_triangle(
        at(2.0, -8.0),
        at(-8.0, -16.0 - lift),
        at(8.0, -14.0 - lift),
        theme.ears,
    );
    d.draw_triangle(
        at(2.0, 8.0),
        at(8.0, 14.0 + lift),
        at(-8.0, 16.0 + lift),
        theme.ears,
    );

    d.draw_circle_v(rl(center), 20.0, theme.head);

    if pose.blink {
        // Closed eyes as short lines.
        d.draw_line_ex(at(6.0, -10.0), at(12.0, -6.0), 2.0, theme.pupils);
        d.draw_line_ex(at(6.0, 10.0), at(12.0, 6.0), 2.0, theme.pupils);
    } else {
        d.draw_circle_v(at(9.0, -7.0), 3.5, theme.eyes);
        d.draw_circle_v(at(9.0, 7.0), 3.5, theme.eyes);
        d.draw_circle_v(at(10.0, -7.0), 1.5, theme.pupils);
        d.draw_circle_v(at(10.0, 7.0), 1.5, theme.pupils);
    }

    d.draw_circle_v(at(18.0, 0.0), 2.5, theme.nose);

    for (dy, tilt) in [(-4.0, -2.0), (0.0, 0.0), (4.0, 2.0)] {
        d.draw_line_ex(
            at(14.0, -6.0 + dy * 0.5),
            at(30.0, -10.0 + dy + tilt),
            1.0,
            theme.whiskers,
        );
        d.draw_line_ex(
            at(14.0, 6.0 - dy * 0.5),
            at(30.0, 10.0 - dy - tilt),
            1.0,
            theme.whiskers,
        );
    }
}
