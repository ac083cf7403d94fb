use kong_climber::entities::*;
use kong_climber::physics::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn floor_at(x: f64, y: f64) -> Platform {
    Platform::new(Point::new(x, y), Size::new(256.0, 20.0))
}

// ── apply_gravity ─────────────────────────────────────────────────────────────

#[test]
fn gravity_converges_to_fall_speed_cap() {
    let mut rng = seeded_rng();
    for _ in 0..50 {
        let gravity = rng.gen_range(0.05..3.0);
        let mut position = Point::new(0.0, 0.0);
        let mut body = GravityBody::new(gravity);
        for _ in 0..500 {
            apply_gravity(&mut position, &mut body);
            assert!(body.velocity_y <= MAX_FALL_SPEED);
        }
        assert_eq!(body.velocity_y, MAX_FALL_SPEED);
    }
}

#[test]
fn upward_velocity_decays_under_gravity() {
    let mut position = Point::new(0.0, 100.0);
    let mut body = GravityBody::new(1.0);
    body.velocity_y = -3.0;
    apply_gravity(&mut position, &mut body);
    assert_eq!(body.velocity_y, -2.0);
    assert_eq!(position.y, 98.0);
}

// ── align_to_platforms ────────────────────────────────────────────────────────

#[test]
fn alignment_rests_bottom_on_platform_top() {
    let platforms = vec![floor_at(128.0, 100.0)]; // top = 90
    let size = Size::new(20.0, 20.0);
    let mut position = Point::new(128.0, 85.0);
    let mut body = GravityBody::new(0.4);
    body.velocity_y = 4.0;

    assert!(align_to_platforms(&mut position, size, &mut body, &platforms));
    assert_eq!(position.y, 80.0);
    assert_eq!(body.velocity_y, 0.0);
    assert!(body.supported);
}

#[test]
fn alignment_is_idempotent() {
    let mut rng = seeded_rng();
    let platforms = vec![floor_at(128.0, 100.0)];
    for _ in 0..100 {
        let size = Size::new(rng.gen_range(4.0..60.0), rng.gen_range(4.0..60.0));
        // Somewhere overlapping the platform.
        let mut position = Point::new(rng.gen_range(0.0..256.0), rng.gen_range(70.0..110.0));
        let mut body = GravityBody::new(0.4);
        if !align_to_platforms(&mut position, size, &mut body, &platforms) {
            continue;
        }
        let settled = position;
        assert!(align_to_platforms(&mut position, size, &mut body, &platforms));
        assert_eq!(position, settled);
    }
}

#[test]
fn alignment_without_overlap_clears_support() {
    let platforms = vec![floor_at(128.0, 100.0)];
    let mut position = Point::new(128.0, 40.0);
    let mut body = GravityBody::new(0.4);
    body.supported = true;

    assert!(!align_to_platforms(&mut position, Size::new(20.0, 20.0), &mut body, &platforms));
    assert!(!body.supported);
    assert_eq!(position.y, 40.0);
}

// Known edge case: the first platform in list order wins, even when a later
// one is the nearer surface.
#[test]
fn alignment_takes_first_listed_platform_not_closest() {
    let lower = floor_at(128.0, 100.0); // top = 90
    let upper = floor_at(128.0, 60.0); // top = 50
    let size = Size::new(20.0, 60.0);
    let mut position = Point::new(128.0, 70.0); // spans 40..100, touches both

    let mut body = GravityBody::new(0.4);
    align_to_platforms(&mut position, size, &mut body, &[lower.clone(), upper.clone()]);
    assert_eq!(position.y, 60.0); // snapped onto the lower one

    let mut position = Point::new(128.0, 70.0);
    let mut body = GravityBody::new(0.4);
    align_to_platforms(&mut position, size, &mut body, &[upper, lower]);
    assert_eq!(position.y, 20.0);
}

// ── settle ────────────────────────────────────────────────────────────────────

#[test]
fn falling_body_lands_and_stays() {
    let platforms = vec![floor_at(128.0, 300.0)]; // top = 290
    let size = Size::new(30.0, 30.0);
    let mut position = Point::new(128.0, 0.0);
    let mut body = GravityBody::new(0.4);

    for _ in 0..200 {
        settle(&mut position, size, &mut body, &platforms);
    }
    assert!(body.supported);
    assert_eq!(position.y, 275.0);
    assert_eq!(body.velocity_y, 0.0);
}

// ── collides ──────────────────────────────────────────────────────────────────

#[test]
fn collision_is_symmetric_and_inclusive() {
    let a = Platform::new(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
    let touching = Platform::new(Point::new(0.0, 10.0), Size::new(10.0, 10.0));
    let apart = Platform::new(Point::new(0.0, 10.5), Size::new(10.0, 10.0));

    assert!(collides(&a, &touching));
    assert!(collides(&touching, &a));
    assert!(!collides(&a, &apart));
    assert!(!collides(&apart, &a));
}

#[test]
fn random_boxes_collide_symmetrically() {
    let mut rng = seeded_rng();
    for _ in 0..500 {
        let mut random_box = || {
            Platform::new(
                Point::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)),
                Size::new(rng.gen_range(1.0..40.0), rng.gen_range(1.0..40.0)),
            )
        };
        let a = random_box();
        let b = random_box();
        assert_eq!(collides(&a, &b), collides(&b, &a));
    }
}
