use glam::Vec3;
use velvet_core::math::Transform;
use velvet_core::shapes::collider::Collider;
use velvet_core::shapes::Shape;

#[test]
fn test_plane_restores_margin() {
    let plane = Collider::plane();
    let point = Vec3::new(0.3, -1.0, 0.7);
    let corrected = point + plane.compute_correction(point, 0.06);

    assert!(
        corrected.y >= 0.06 - 1e-6,
        "point should be lifted to the margin, got y = {}",
        corrected.y
    );
    assert_eq!(corrected.x, point.x);
    assert_eq!(corrected.z, point.z);
}

#[test]
fn test_plane_ignores_its_transform() {
    // The ground is fixed at world height 0 wherever the actor sits.
    let mut plane = Collider::new(Shape::Plane, Transform::from_position(Vec3::new(0.0, 5.0, 0.0)));
    plane.refresh(1.0 / 60.0);

    assert_eq!(plane.compute_correction(Vec3::new(0.0, 1.0, 0.0), 0.06), Vec3::ZERO);
    let c = plane.compute_correction(Vec3::new(0.0, 0.0, 0.0), 0.06);
    assert!((c.y - 0.06).abs() < 1e-6, "expected lift to margin, got {c}");
}

#[test]
fn test_sphere_pushes_out_radially() {
    let sphere = Collider::sphere(Vec3::ZERO, 0.5);
    let dir = Vec3::new(1.0, 2.0, -0.5).normalize();
    let point = dir * 0.3;

    let corrected = point + sphere.compute_correction(point, 0.0);
    let dist = corrected.length();

    assert!(dist >= 0.5 - 1e-5, "point should reach the surface, got distance {dist}");
    assert!(
        corrected.normalize().dot(dir) > 1.0 - 1e-5,
        "correction must keep the radial direction"
    );
}

#[test]
fn test_sphere_radius_includes_margin() {
    let sphere = Collider::sphere(Vec3::new(1.0, 1.0, 1.0), 0.5);
    let point = Vec3::new(1.0, 1.55, 1.0);

    let c = sphere.compute_correction(point, 0.1);
    assert!((c - Vec3::new(0.0, 0.05, 0.0)).length() < 1e-5, "got {c}");

    assert_eq!(sphere.compute_correction(point, 0.0), Vec3::ZERO);
}

#[test]
fn test_sphere_outside_point_untouched() {
    let sphere = Collider::sphere(Vec3::ZERO, 0.5);
    assert_eq!(sphere.compute_correction(Vec3::new(0.0, 0.0, 0.9), 0.06), Vec3::ZERO);
}

#[test]
fn test_sphere_center_query_is_skipped() {
    let center = Vec3::new(0.0, 0.6, -1.0);
    let sphere = Collider::sphere(center, 0.6);
    let c = sphere.compute_correction(center, 0.06);
    assert_eq!(c, Vec3::ZERO);
    assert!(c.is_finite());
}

#[test]
fn test_refresh_without_motion_has_zero_velocity() {
    let mut sphere = Collider::sphere(Vec3::new(0.0, 0.6, -1.0), 0.6);
    for _ in 0..5 {
        sphere.refresh(1.0 / 60.0);
        assert_eq!(sphere.velocity(), Vec3::ZERO);
    }
}

#[test]
fn test_refresh_backward_difference_velocity() {
    let dt = 0.02;
    let mut sphere = Collider::sphere(Vec3::ZERO, 0.5);
    sphere.set_position(Vec3::new(0.1, 0.0, 0.0));
    sphere.refresh(dt);

    assert!((sphere.velocity() - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-4);
    assert_eq!(sphere.last_transform().position, Vec3::ZERO);
    assert_eq!(sphere.transform().position, Vec3::new(0.1, 0.0, 0.0));

    // No further movement: velocity drops to zero on the next tick.
    sphere.refresh(dt);
    assert_eq!(sphere.velocity(), Vec3::ZERO);
}

#[test]
fn test_refresh_with_zero_dt_yields_zero_velocity() {
    let mut sphere = Collider::sphere(Vec3::ZERO, 0.5);
    sphere.set_position(Vec3::ONE);
    sphere.refresh(0.0);
    assert_eq!(sphere.velocity(), Vec3::ZERO);
    assert_eq!(sphere.transform().position, Vec3::ONE);
}

#[test]
fn test_queries_use_refreshed_transform_only() {
    let mut sphere = Collider::sphere(Vec3::ZERO, 0.5);
    sphere.set_position(Vec3::new(10.0, 0.0, 0.0));

    // Not refreshed yet: still answers for the old position.
    let point = Vec3::new(0.1, 0.0, 0.0);
    assert_ne!(sphere.compute_correction(point, 0.0), Vec3::ZERO);

    sphere.refresh(1.0 / 60.0);
    assert_eq!(sphere.compute_correction(point, 0.0), Vec3::ZERO);
}
