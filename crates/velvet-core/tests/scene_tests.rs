use glam::Vec3;
use velvet_core::scene::{sphere_position, SimpleClothScene, CLOTH_ORIGIN, DEFAULT_FIXED_DT, SPHERE_RADIUS};
use velvet_core::shapes::collider::Collider;
use velvet_core::shapes::Shape;

#[test]
fn test_scene_layout() {
    let scene = SimpleClothScene::new().unwrap();

    assert_eq!(scene.solver.particle_count(), 17 * 17);
    assert_eq!(scene.colliders().len(), 2);
    assert_eq!(scene.colliders()[0].shape(), Shape::Plane);
    assert_eq!(scene.sphere().shape(), Shape::Sphere);
    assert_eq!(scene.sphere().transform().position, Vec3::new(0.0, SPHERE_RADIUS, -1.0));
    assert_eq!(scene.solver.positions()[0], CLOTH_ORIGIN + Vec3::new(-1.0, 0.0, 0.0));
    assert_eq!(scene.fixed_dt(), DEFAULT_FIXED_DT);
}

#[test]
fn test_sphere_path() {
    assert_eq!(sphere_position(0.0), Vec3::new(0.0, 0.6, -1.0));
    let quarter = sphere_position(std::f32::consts::FRAC_PI_4);
    assert!(quarter.z.abs() < 1e-6);
    let half = sphere_position(std::f32::consts::FRAC_PI_2);
    assert!((half.z - 1.0).abs() < 1e-6);
}

#[test]
fn test_tick_moves_sphere_and_tracks_velocity() {
    let mut scene = SimpleClothScene::with_resolution(4).unwrap();
    let dt = scene.fixed_dt();

    scene.tick();

    assert_eq!(scene.sphere().transform().position, sphere_position(dt));
    let expected = (sphere_position(dt) - sphere_position(0.0)) / dt;
    assert!((scene.sphere().velocity() - expected).length() < 1e-3);
    assert_eq!(scene.solver.ticks(), 1);
}

#[test]
fn test_advance_accumulates_partial_frames() {
    let mut scene = SimpleClothScene::with_resolution(4).unwrap();

    assert_eq!(scene.advance(0.01), 0);
    assert_eq!(scene.advance(0.01), 1);
    assert_eq!(scene.solver.ticks(), 1);
    assert!((scene.elapsed() - DEFAULT_FIXED_DT).abs() < 1e-7);
}

#[test]
fn test_advance_caps_long_frames() {
    let mut scene = SimpleClothScene::with_resolution(4).unwrap();

    assert_eq!(scene.advance(1.0), 8);
    // The backlog was dropped rather than replayed.
    assert_eq!(scene.advance(0.001), 0);
}

#[test]
fn test_paused_scene_does_not_advance() {
    let mut scene = SimpleClothScene::with_resolution(4).unwrap();
    let before = scene.solver.positions().to_vec();

    scene.paused = true;
    assert_eq!(scene.advance(0.5), 0);
    assert_eq!(scene.solver.positions(), before.as_slice());

    scene.paused = false;
    assert_eq!(scene.advance(DEFAULT_FIXED_DT * 1.5), 1);
}

#[test]
fn test_invalid_fixed_dt_is_ignored() {
    let mut scene = SimpleClothScene::with_resolution(2).unwrap();
    scene.set_fixed_dt(-1.0);
    scene.set_fixed_dt(f32::NAN);
    assert_eq!(scene.fixed_dt(), DEFAULT_FIXED_DT);

    scene.set_fixed_dt(1.0 / 120.0);
    assert_eq!(scene.fixed_dt(), 1.0 / 120.0);
}

#[test]
fn test_cloth_never_enters_swinging_sphere() {
    let mut scene = SimpleClothScene::with_resolution(12).unwrap();
    let reach = SPHERE_RADIUS + scene.params.collision_margin;

    for tick in 0..300 {
        scene.tick();
        let center = scene.sphere().transform().position;
        for (i, p) in scene.solver.positions().iter().enumerate() {
            assert!(p.is_finite(), "tick {tick}: particle {i} is not finite");
            let d = p.distance(center);
            assert!(d >= reach - 1e-4, "tick {tick}: particle {i} at distance {d} inside sphere");
            assert!(p.y > -0.1, "tick {tick}: particle {i} fell through the ground at {p}");
        }
    }
}

#[test]
fn test_scene_pins_survive_the_run() {
    let mut scene = SimpleClothScene::with_resolution(8).unwrap();
    let corners = [scene.solver.positions()[0], scene.solver.positions()[8]];

    for _ in 0..120 {
        scene.tick();
    }

    assert_eq!(scene.solver.positions()[0], corners[0]);
    assert_eq!(scene.solver.positions()[8], corners[1]);
}

#[test]
fn test_added_colliders_keep_sphere_feed() {
    let mut scene = SimpleClothScene::with_resolution(4).unwrap();
    let index = scene.add_collider(Collider::sphere(Vec3::new(3.0, 0.5, 0.0), 0.4));
    assert_eq!(index, 2);

    scene.tick();
    scene.tick();

    assert_eq!(scene.colliders().len(), 3);
    assert_eq!(scene.sphere().transform().position, sphere_position(2.0 * scene.fixed_dt()));
    assert_eq!(scene.colliders()[2].transform().position, Vec3::new(3.0, 0.5, 0.0));
}
