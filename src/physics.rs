//! Gravity integration, platform alignment and pairwise collision.
//!
//! These work on components rather than whole entities so any entity that
//! carries a `GravityBody` can opt in.

use crate::entities::{Bounded, GravityBody, Platform, Point, Rect, Size};

/// Fall-speed cap shared by every gravity body, in distance units per frame.
pub const MAX_FALL_SPEED: f64 = 10.0;

/// `v' = min(v + g, MAX_FALL_SPEED)`, then moves the body by `v'`.
pub fn apply_gravity(position: &mut Point, body: &mut GravityBody) {
    body.velocity_y = (body.velocity_y + body.gravity).min(MAX_FALL_SPEED);
    position.y += body.velocity_y;
}

/// Snaps the body onto the first platform (in list order) whose box
/// intersects it. The first match wins even if a later platform is closer.
///
/// Returns whether the body ended up supported.
pub fn align_to_platforms(
    position: &mut Point,
    size: Size,
    body: &mut GravityBody,
    platforms: &[Platform],
) -> bool {
    let bounds = Rect::centered(*position, size);
    let landing = platforms
        .iter()
        .map(Bounded::bounds)
        .find(|platform| platform.intersects(&bounds));

    match landing {
        Some(platform) => {
            position.y = platform.top - size.half_height();
            body.velocity_y = 0.0;
            body.supported = true;
        }
        None => body.supported = false,
    }
    body.supported
}

/// One frame of passive falling: gravity unless supported, then alignment.
pub fn settle(position: &mut Point, size: Size, body: &mut GravityBody, platforms: &[Platform]) {
    if !body.supported {
        apply_gravity(position, body);
    }
    align_to_platforms(position, size, body, platforms);
}

/// Returns true when the two bounding boxes overlap or touch.
pub fn collides<A: Bounded, B: Bounded>(a: &A, b: &B) -> bool {
    a.bounds().intersects(&b.bounds())
}
