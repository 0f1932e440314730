use glam::{Mat4, Vec3};

use crate::resources::BoundingSphere;
use crate::scene::camera::Camera;

/// Cascade count of the near/mid/far split.
pub const CASCADE_COUNT: usize = 3;

/// Depth slack applied to the light cameras' near/far extents, guarding
/// against precision loss where geometry sits exactly on a slice boundary.
const DEPTH_MARGIN: f32 = 1.0001;

/// Shadow mapping configuration.
#[derive(Debug, Clone)]
pub struct ShadowConfig {
    /// First split, as an offset added to the viewer's near plane.
    pub distance1: f32,
    /// Second split, as an offset added to the viewer's near plane.
    pub distance2: f32,
    /// Shadow map resolution per cascade, in texels.
    pub map_size: u32,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            distance1: 10.0,
            distance2: 40.0,
            map_size: 1024,
        }
    }
}

/// Three light-facing orthographic cameras covering successive depth slices
/// of the viewer's frustum.
///
/// [`prepare_view_camera`](Self::prepare_view_camera) derives each slice's
/// bounding sphere from the viewer's projection parameters; call it only when
/// those parameters (or the split distances) change.
/// [`update`](Self::update) reorients the light cameras for the current
/// light direction and is a per-frame operation. Both take the viewer camera
/// by reference; the shadow set stores no viewer state beyond the derived
/// slice centers and radii.
pub struct Shadow {
    pub config: ShadowConfig,

    /// Slice midpoints on the viewing axis, in the viewer's camera space.
    centers: [Vec3; CASCADE_COUNT],
    /// Bounding sphere radius per slice.
    radii: [f32; CASCADE_COUNT],

    light_cameras: [Camera; CASCADE_COUNT],
    light_dir: Vec3,
    /// The shadow-sampling transforms handed to the render stage.
    light_mats: [Mat4; CASCADE_COUNT],
}

impl Shadow {
    #[must_use]
    pub fn new(config: ShadowConfig) -> Self {
        Self {
            config,
            centers: [Vec3::ZERO; CASCADE_COUNT],
            radii: [0.0; CASCADE_COUNT],
            light_cameras: std::array::from_fn(|_| {
                Camera::new_ortho(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0)
            }),
            light_dir: Vec3::NEG_Y,
            light_mats: [Mat4::IDENTITY; CASCADE_COUNT],
        }
    }

    /// Recomputes the cascade slice centers and radii from the viewer's
    /// projection parameters and the two split distances, and resizes the
    /// orthographic light cameras accordingly.
    ///
    /// The frustum is cross-sectioned at depths `{near, near + dist1,
    /// near + dist2, far}` in the viewer's camera space (+X right, +Y up,
    /// −Z forward). Each slice's radius is the distance from the slice's
    /// depth midpoint to one corner of its far cross-section. For a
    /// symmetric-FOV frustum those corners are the farthest slice points
    /// from the midpoint, so the sphere covers the whole slice without a
    /// full minimal-sphere fit.
    ///
    /// Not a per-frame operation: call when the viewer's fovy, aspect,
    /// near/far, or the split distances change.
    pub fn prepare_view_camera(&mut self, viewer: &Camera, dist1: f32, dist2: f32) {
        self.config.distance1 = dist1;
        self.config.distance2 = dist2;

        let near = viewer.near;
        let level1 = near + dist1;
        let level2 = near + dist2;
        let far = viewer.far;

        let tan_half_v = (viewer.fovy * 0.5).tan();
        let tan_half_h = viewer.aspect * tan_half_v;

        let depths = [near, level1, level2, far];
        let sections: [[Vec3; 4]; 4] =
            std::array::from_fn(|i| cross_section(depths[i], tan_half_h, tan_half_v));

        for i in 0..CASCADE_COUNT {
            let slice_near = depths[i];
            let slice_far = depths[i + 1];
            let center = Vec3::new(0.0, 0.0, -(slice_near + (slice_far - slice_near) * 0.5));
            let radius = (center - sections[i + 1][0]).length();

            self.centers[i] = center;
            self.radii[i] = radius;
            self.light_cameras[i].init_ortho_camera(
                -radius,
                radius,
                -radius,
                radius,
                -DEPTH_MARGIN * radius,
                DEPTH_MARGIN * radius,
            );
        }
    }

    /// Reorients the three light cameras for the current light direction:
    /// each slice center is transformed into world space through the
    /// viewer's inverse view matrix, and the cascade camera is placed there
    /// looking along the light. The negative near plane of the ortho
    /// projection covers the half of the slice sphere behind the camera.
    ///
    /// Runs every frame the light direction or viewer orientation changes.
    pub fn update(&mut self, viewer: &Camera, light_dir: Vec3) {
        self.light_dir = light_dir;

        for i in 0..CASCADE_COUNT {
            let world_center = viewer.inv_view_matrix.transform_point3(self.centers[i]);
            self.light_cameras[i].update_look(world_center, light_dir);
            self.light_mats[i] = self.light_cameras[i].view_projection_matrix;
        }
    }

    #[inline]
    #[must_use]
    pub fn light_near_mat(&self) -> &Mat4 {
        &self.light_mats[0]
    }

    #[inline]
    #[must_use]
    pub fn light_mid_mat(&self) -> &Mat4 {
        &self.light_mats[1]
    }

    #[inline]
    #[must_use]
    pub fn light_far_mat(&self) -> &Mat4 {
        &self.light_mats[2]
    }

    #[must_use]
    pub fn light_camera(&self, cascade: usize) -> &Camera {
        &self.light_cameras[cascade]
    }

    #[must_use]
    pub fn center(&self, cascade: usize) -> Vec3 {
        self.centers[cascade]
    }

    #[must_use]
    pub fn radius(&self, cascade: usize) -> f32 {
        self.radii[cascade]
    }

    #[must_use]
    pub fn radii(&self) -> &[f32; CASCADE_COUNT] {
        &self.radii
    }

    /// The slice's bounding sphere, in the viewer's camera space.
    #[must_use]
    pub fn slice_sphere(&self, cascade: usize) -> BoundingSphere {
        BoundingSphere {
            center: self.centers[cascade],
            radius: self.radii[cascade],
        }
    }

    #[must_use]
    pub fn light_dir(&self) -> Vec3 {
        self.light_dir
    }
}

/// Four corners of the frustum cross-section at `depth`, in camera space:
/// +X right, +Y up, the section plane at `z = -depth`.
fn cross_section(depth: f32, tan_half_h: f32, tan_half_v: f32) -> [Vec3; 4] {
    let x = depth * tan_half_h;
    let y = depth * tan_half_v;
    [
        Vec3::new(x, y, -depth),
        Vec3::new(-x, y, -depth),
        Vec3::new(x, -y, -depth),
        Vec3::new(-x, -y, -depth),
    ]
}
