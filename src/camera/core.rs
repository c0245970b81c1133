use glam::{Affine3A, Vec3};

/// Camera pose plus zoom and depth-slab parameters.
///
/// `up` and `forward` are stored as *points* one unit away from `pos`
/// rather than as free directions, so a single rigid transform moves the
/// whole pose consistently. Use [`Camera::up_dir`] and
/// [`Camera::forward_dir`] for the directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Camera position.
    pub pos: Vec3,
    /// Point above the camera.
    pub up: Vec3,
    /// Point in front of the camera, along the viewing direction.
    pub forward: Vec3,
    /// Half-extent of the visible slab.
    pub zoom: f32,
    /// Near clip depth.
    pub z_front: f32,
    /// Far clip depth.
    pub z_back: f32,
}

impl Default for Camera {
    /// The identity pose: at the origin, looking down +z with +y up.
    fn default() -> Self {
        Self {
            pos: Vec3::ZERO,
            up: Vec3::Y,
            forward: Vec3::Z,
            zoom: 0.0,
            z_front: 0.0,
            z_back: 0.0,
        }
    }
}

impl Camera {
    /// Up direction relative to the camera position.
    #[must_use]
    pub fn up_dir(&self) -> Vec3 {
        self.up - self.pos
    }

    /// Viewing direction relative to the camera position.
    #[must_use]
    pub fn forward_dir(&self) -> Vec3 {
        self.forward - self.pos
    }

    /// Apply a rigid transform to the pose. Slab parameters are unchanged.
    pub fn transform(&mut self, m: &Affine3A) {
        self.pos = m.transform_point3(self.pos);
        self.up = m.transform_point3(self.up);
        self.forward = m.transform_point3(self.forward);
    }

    /// Copy of this camera with `m` applied.
    #[must_use]
    pub fn transformed(&self, m: &Affine3A) -> Self {
        let mut camera = *self;
        camera.transform(m);
        camera
    }

    /// Whether depth `z` lies inside the visible slab for an atom of
    /// radius `atom_radius`.
    #[must_use]
    pub fn is_visible_z(&self, z: f32, atom_radius: f32) -> bool {
        z >= 2.0 * atom_radius - self.zoom && z >= self.z_front && z <= self.z_back
    }

    /// Pose and slab parameters equal within `tolerance`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f32) -> bool {
        self.pos.abs_diff_eq(other.pos, tolerance)
            && self.up.abs_diff_eq(other.up, tolerance)
            && self.forward.abs_diff_eq(other.forward, tolerance)
            && (self.zoom - other.zoom).abs() <= tolerance
            && (self.z_front - other.z_front).abs() <= tolerance
            && (self.z_back - other.z_back).abs() <= tolerance
    }
}
