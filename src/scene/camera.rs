use glam::{Mat4, Vec3, Vec4};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionType {
    Perspective,
    Orthographic,
}

/// Explicit orthographic extents, used by shadow light cameras.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Default for OrthoBounds {
    fn default() -> Self {
        Self {
            left: -1.0,
            right: 1.0,
            bottom: -1.0,
            top: 1.0,
        }
    }
}

/// View/projection state for a viewer or a shadow light.
///
/// Matrices are mutated only by explicit `update_*` calls; nothing here
/// recomputes implicitly. Right-handed convention throughout: +X right,
/// +Y up, −Z forward in camera space.
#[derive(Debug, Clone)]
pub struct Camera {
    pub uuid: Uuid,

    // === Projection parameters ===
    pub projection_type: ProjectionType,
    /// Vertical field of view in radians (perspective only).
    pub fovy: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub ortho: OrthoBounds,

    // === View parameters ===
    pub position: Vec3,
    pub look_dir: Vec3,

    // === Derived matrices ===
    pub(crate) view_matrix: Mat4,
    pub(crate) projection_matrix: Mat4,
    pub(crate) view_projection_matrix: Mat4,
    pub(crate) inv_view_matrix: Mat4,
    pub(crate) frustum: Frustum,
}

impl Camera {
    #[must_use]
    pub fn new_perspective(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            uuid: Uuid::new_v4(),
            projection_type: ProjectionType::Perspective,
            fovy: fov_deg.to_radians(),
            aspect,
            near,
            far,
            ortho: OrthoBounds::default(),

            position: Vec3::ZERO,
            look_dir: Vec3::NEG_Z,

            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            view_projection_matrix: Mat4::IDENTITY,
            inv_view_matrix: Mat4::IDENTITY,
            frustum: Frustum::default(),
        };

        cam.update_projection_matrix();
        cam
    }

    #[must_use]
    pub fn new_ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            uuid: Uuid::new_v4(),
            projection_type: ProjectionType::Orthographic,
            fovy: 60.0_f32.to_radians(),
            aspect: 1.0,
            near,
            far,
            ortho: OrthoBounds {
                left,
                right,
                bottom,
                top,
            },

            position: Vec3::ZERO,
            look_dir: Vec3::NEG_Z,

            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            view_projection_matrix: Mat4::IDENTITY,
            inv_view_matrix: Mat4::IDENTITY,
            frustum: Frustum::default(),
        };

        cam.update_projection_matrix();
        cam
    }

    /// Switches this camera to an explicit orthographic projection.
    ///
    /// `near` may be negative: shadow light cameras sit on their slice
    /// center and capture geometry behind themselves through a negative
    /// near plane.
    pub fn init_ortho_camera(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) {
        self.projection_type = ProjectionType::Orthographic;
        self.ortho = OrthoBounds {
            left,
            right,
            bottom,
            top,
        };
        self.near = near;
        self.far = far;
        self.update_projection_matrix();
    }

    /// Rebuilds the projection matrix from the current parameters, then
    /// refreshes the derived view-projection matrix and frustum.
    pub fn update_projection_matrix(&mut self) {
        self.projection_matrix = match self.projection_type {
            ProjectionType::Perspective => {
                Mat4::perspective_rh(self.fovy, self.aspect, self.near, self.far)
            }
            ProjectionType::Orthographic => Mat4::orthographic_rh(
                self.ortho.left,
                self.ortho.right,
                self.ortho.bottom,
                self.ortho.top,
                self.near,
                self.far,
            ),
        };

        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
        self.frustum = Frustum::from_matrix(self.view_projection_matrix);
    }

    /// Places the camera at `eye` looking along `dir`, and refreshes every
    /// derived matrix.
    ///
    /// A zero-length direction falls back to −Z; a direction collinear with
    /// the world up axis switches to an X up-vector to keep the basis
    /// well-formed.
    pub fn update_look(&mut self, eye: Vec3, dir: Vec3) {
        let dir = if dir.length_squared() > 1e-6 {
            dir.normalize()
        } else {
            Vec3::NEG_Z
        };
        let up = if dir.y.abs() > 0.99 { Vec3::X } else { Vec3::Y };

        self.position = eye;
        self.look_dir = dir;
        self.view_matrix = Mat4::look_to_rh(eye, dir, up);
        self.inv_view_matrix = self.view_matrix.inverse();
        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
        self.frustum = Frustum::from_matrix(self.view_projection_matrix);
    }

    /// Refreshes the view-projection matrix and frustum from the current
    /// view and projection matrices.
    pub fn update_frustum(&mut self) {
        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
        self.frustum = Frustum::from_matrix(self.view_projection_matrix);
    }

    /// Overwrites the view matrix directly (reflection cameras derive theirs
    /// from another camera's), refreshing the inverse and the frustum.
    pub(crate) fn set_view_matrix(&mut self, view: Mat4) {
        self.view_matrix = view;
        self.inv_view_matrix = view.inverse();
        self.update_frustum();
    }

    #[inline]
    #[must_use]
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    #[inline]
    #[must_use]
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    #[inline]
    #[must_use]
    pub fn view_projection_matrix(&self) -> &Mat4 {
        &self.view_projection_matrix
    }

    #[inline]
    #[must_use]
    pub fn inv_view_matrix(&self) -> &Mat4 {
        &self.inv_view_matrix
    }

    #[inline]
    #[must_use]
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }
}

/// Frustum planes extracted from a view-projection matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct Frustum {
    planes: [Vec4; 6], // Left, Right, Bottom, Top, Near, Far
}

impl Frustum {
    /// Gribb-Hartmann plane extraction, for a [0, 1] depth range.
    #[must_use]
    pub fn from_matrix(m: Mat4) -> Self {
        let rows = [m.row(0), m.row(1), m.row(2), m.row(3)];

        let mut planes = [Vec4::ZERO; 6];
        planes[0] = rows[3] + rows[0]; // Left
        planes[1] = rows[3] - rows[0]; // Right
        planes[2] = rows[3] + rows[1]; // Bottom
        planes[3] = rows[3] - rows[1]; // Top
        planes[4] = rows[2]; // Near (depth 0 at the near plane)
        planes[5] = rows[3] - rows[2]; // Far

        for plane in &mut planes {
            let length = Vec3::new(plane.x, plane.y, plane.z).length();
            if length > 0.0 {
                *plane /= length;
            }
        }

        Self { planes }
    }

    #[must_use]
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        for plane in &self.planes {
            let dist = plane.x * center.x + plane.y * center.y + plane.z * center.z + plane.w;
            if dist < -radius {
                return false;
            }
        }
        true
    }
}
