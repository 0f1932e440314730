//! Cascaded Shadow Tests
//!
//! Tests for:
//! - Slice center and bounding-radius derivation from the viewer frustum
//! - Orthographic light camera extents per cascade
//! - Per-frame light camera orientation and sampling matrices
//! - Degenerate split behavior

use glam::{Mat4, Vec3};

use umbra::scene::Camera;
use umbra::shadow::{CASCADE_COUNT, Shadow, ShadowConfig};

const EPSILON: f32 = 1e-3;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn assert_finite(m: &Mat4) {
    for i in 0..4 {
        for j in 0..4 {
            let val = m.col(i)[j];
            assert!(!val.is_nan(), "Matrix contains NaN at [{i}][{j}]");
            assert!(!val.is_infinite(), "Matrix contains Inf at [{i}][{j}]");
        }
    }
}

/// The reference viewer: fovy 60°, square aspect, near 1, far 100.
fn make_viewer() -> Camera {
    Camera::new_perspective(60.0, 1.0, 1.0, 100.0)
}

fn prepared_shadow(viewer: &Camera) -> Shadow {
    let mut shadow = Shadow::new(ShadowConfig::default());
    shadow.prepare_view_camera(viewer, 10.0, 40.0);
    shadow
}

// ============================================================================
// prepare_view_camera
// ============================================================================

#[test]
fn radii_are_strictly_increasing() {
    let viewer = make_viewer();
    let shadow = prepared_shadow(&viewer);

    let r = shadow.radii();
    assert!(
        r[0] < r[1] && r[1] < r[2],
        "Radii must grow with slice depth: {r:?}"
    );
}

#[test]
fn radii_match_far_corner_distances() {
    let viewer = make_viewer();
    let shadow = prepared_shadow(&viewer);

    // Slice boundaries: 1, 11, 41, 100. Midpoints: -6, -26, -70.5.
    // Radius = |midpoint - far cross-section corner|, tan(30°) half-angle.
    let tan_half = 30.0_f32.to_radians().tan();
    let expected = [
        (Vec3::new(11.0 * tan_half, 11.0 * tan_half, -11.0) - Vec3::new(0.0, 0.0, -6.0)).length(),
        (Vec3::new(41.0 * tan_half, 41.0 * tan_half, -41.0) - Vec3::new(0.0, 0.0, -26.0)).length(),
        (Vec3::new(100.0 * tan_half, 100.0 * tan_half, -100.0) - Vec3::new(0.0, 0.0, -70.5))
            .length(),
    ];

    for i in 0..CASCADE_COUNT {
        assert!(
            approx(shadow.radius(i), expected[i]),
            "Cascade {i}: expected radius {}, got {}",
            expected[i],
            shadow.radius(i)
        );
    }
}

#[test]
fn slice_centers_sit_on_view_axis_at_interval_midpoints() {
    let viewer = make_viewer();
    let shadow = prepared_shadow(&viewer);

    let expected_z = [-6.0, -26.0, -70.5];
    for i in 0..CASCADE_COUNT {
        let center = shadow.center(i);
        assert!(approx(center.x, 0.0));
        assert!(approx(center.y, 0.0));
        assert!(
            approx(center.z, expected_z[i]),
            "Cascade {i} center z: expected {}, got {}",
            expected_z[i],
            center.z
        );
    }
}

#[test]
fn slice_spheres_pair_centers_with_radii() {
    let viewer = make_viewer();
    let shadow = prepared_shadow(&viewer);

    for i in 0..CASCADE_COUNT {
        let sphere = shadow.slice_sphere(i);
        assert_eq!(sphere.center, shadow.center(i));
        assert!(approx(sphere.radius, shadow.radius(i)));
    }
}

#[test]
fn light_camera_half_extent_equals_radius() {
    let viewer = make_viewer();
    let shadow = prepared_shadow(&viewer);

    for i in 0..CASCADE_COUNT {
        let cam = shadow.light_camera(i);
        let radius = shadow.radius(i);
        assert!(
            approx(cam.ortho.right, radius),
            "Cascade {i}: ortho extent {} != radius {}",
            cam.ortho.right,
            radius
        );
        assert!(approx(1.0 / cam.projection_matrix().x_axis.x, radius));
    }
}

#[test]
fn light_camera_depth_range_has_slack() {
    let viewer = make_viewer();
    let shadow = prepared_shadow(&viewer);

    for i in 0..CASCADE_COUNT {
        let cam = shadow.light_camera(i);
        let radius = shadow.radius(i);
        assert!(approx(cam.near, -1.0001 * radius));
        assert!(approx(cam.far, 1.0001 * radius));
    }
}

#[test]
fn prepare_is_not_undone_by_updates() {
    let viewer = make_viewer();
    let mut shadow = prepared_shadow(&viewer);
    let radii_before = *shadow.radii();

    shadow.update(&viewer, Vec3::new(0.0, -1.0, 0.0));
    shadow.update(&viewer, Vec3::new(0.3, -1.0, 0.2).normalize());

    assert_eq!(
        *shadow.radii(),
        radii_before,
        "Radii depend only on projection parameters, not light direction"
    );
}

// ============================================================================
// update
// ============================================================================

#[test]
fn light_cameras_sit_on_world_space_slice_centers() {
    let viewer = make_viewer(); // identity view: camera space == world space
    let mut shadow = prepared_shadow(&viewer);

    shadow.update(&viewer, Vec3::NEG_Y);

    let expected_z = [-6.0, -26.0, -70.5];
    for i in 0..CASCADE_COUNT {
        let cam = shadow.light_camera(i);
        assert!(approx(cam.position.x, 0.0));
        assert!(approx(cam.position.y, 0.0));
        assert!(approx(cam.position.z, expected_z[i]));
        assert_eq!(cam.look_dir, Vec3::NEG_Y);
    }
}

#[test]
fn light_cameras_follow_the_viewer() {
    let mut viewer = make_viewer();
    viewer.update_look(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);

    let mut shadow = Shadow::new(ShadowConfig::default());
    shadow.prepare_view_camera(&viewer, 10.0, 40.0);
    shadow.update(&viewer, Vec3::NEG_Y);

    // Slice center (0, 0, -6) in camera space lands at world z = 4
    let cam = shadow.light_camera(0);
    assert!(approx(cam.position.z, 4.0));
}

#[test]
fn sampling_matrices_are_valid_and_direction_sensitive() {
    let viewer = make_viewer();
    let mut shadow = prepared_shadow(&viewer);

    shadow.update(&viewer, Vec3::new(0.0, -1.0, 0.0));
    let near_before = *shadow.light_near_mat();
    assert_finite(&near_before);
    assert!(near_before.determinant().abs() > 1e-10);
    assert_finite(shadow.light_mid_mat());
    assert_finite(shadow.light_far_mat());

    shadow.update(&viewer, Vec3::new(0.5, -1.0, 0.0).normalize());
    assert_ne!(
        near_before,
        *shadow.light_near_mat(),
        "A moving sun must reorient the sampling transforms"
    );
}

#[test]
fn slice_sphere_projects_inside_light_clip_volume() {
    let viewer = make_viewer();
    let mut shadow = prepared_shadow(&viewer);
    shadow.update(&viewer, Vec3::new(0.2, -1.0, 0.1).normalize());

    // Extreme points of cascade 0's bounding sphere along the world axes
    let center = Vec3::new(0.0, 0.0, -6.0);
    let radius = shadow.radius(0);
    let vp = shadow.light_near_mat();

    for offset in [Vec3::X, Vec3::Y, Vec3::Z, Vec3::NEG_X, Vec3::NEG_Y, Vec3::NEG_Z] {
        let point = center + offset * radius;
        let clip = *vp * point.extend(1.0);
        let ndc = clip / clip.w;
        assert!(
            ndc.x.abs() <= 1.0 + EPSILON && ndc.y.abs() <= 1.0 + EPSILON,
            "Sphere point {point:?} escapes the light volume: {ndc:?}"
        );
    }
}

// ============================================================================
// Degenerate splits
// ============================================================================

#[test]
fn collapsed_splits_stay_finite() {
    let viewer = Camera::new_perspective(0.5, 1.0, 1.0, 1.001);
    let mut shadow = Shadow::new(ShadowConfig::default());

    shadow.prepare_view_camera(&viewer, 0.0005, 0.001);
    shadow.update(&viewer, Vec3::NEG_Y);

    for i in 0..CASCADE_COUNT {
        let radius = shadow.radius(i);
        assert!(radius.is_finite());
        assert!(radius >= 0.0);
        assert_finite(shadow.light_camera(i).projection_matrix());
    }
}
