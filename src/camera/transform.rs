//! Rigid motion that carries one camera pose onto another.
//!
//! The motion is decomposed into a translation and two rotations: the
//! first aligns the up directions, the second then aligns the viewing
//! directions. [`camera_transform`] returns one `1/n` step of that motion,
//! pivoting about the moving camera, so a caller that recomputes it every
//! frame with a decreasing `n` lands exactly on the reference pose when
//! `n` reaches 1.

use glam::{Affine3A, Quat, Vec3};

use super::core::Camera;

/// Angles and cross-product lengths below this are treated as zero.
pub const NEAR_ZERO: f32 = 1e-6;

/// Signed angle that rotates `mov` onto `reference` about `axis`, measured
/// after projecting both onto the plane normal to `axis`.
#[must_use]
pub fn dihedral(reference: Vec3, axis: Vec3, mov: Vec3) -> f32 {
    let axis = axis.normalize_or_zero();
    let r = reference.reject_from_normalized(axis);
    let m = mov.reject_from_normalized(axis);
    axis.dot(m.cross(r)).atan2(m.dot(r))
}

/// Axis and angle of the full rotation taking direction `mov` onto
/// `reference`. `None` when already aligned.
///
/// Antiparallel directions have no unique axis; `fallback` (made
/// perpendicular to `mov`) is used instead.
fn alignment(mov: Vec3, reference: Vec3, fallback: Vec3) -> Option<(Vec3, f32)> {
    let m = mov.try_normalize()?;
    let r = reference.try_normalize()?;
    let cross = m.cross(r);
    let axis = if cross.length() > NEAR_ZERO {
        cross.normalize()
    } else if m.dot(r) > 0.0 {
        return None;
    } else {
        fallback
            .reject_from_normalized(m)
            .try_normalize()
            .unwrap_or_else(|| m.any_orthonormal_vector())
    };
    let angle = dihedral(r, axis, m);
    (angle.abs() > NEAR_ZERO).then_some((axis, angle))
}

fn partial(rotation: Option<(Vec3, f32)>, n: f32) -> Quat {
    rotation.map_or(Quat::IDENTITY, |(axis, angle)| {
        Quat::from_axis_angle(axis, angle / n)
    })
}

/// One animation step of the rigid motion carrying `moving` onto
/// `reference`.
///
/// Applied to `moving`, the result advances its position by `1/n_step` of
/// the remaining displacement and turns it by `1/n_step` of each alignment
/// angle. With `n_step == 1` the full motion is returned.
#[must_use]
pub fn camera_transform(
    reference: &Camera,
    moving: &Camera,
    n_step: f32,
) -> Affine3A {
    let n = n_step.max(1.0);
    let disp = reference.pos - moving.pos;

    let first = alignment(
        moving.up_dir(),
        reference.up_dir(),
        moving.forward_dir(),
    );
    let full_first = partial(first, 1.0);
    let second = alignment(
        full_first * moving.forward_dir(),
        reference.forward_dir(),
        reference.up_dir(),
    );
    let rotation = partial(second, n) * partial(first, n);

    let remaining = disp * (-(n - 1.0) / n);
    Affine3A::from_translation(reference.pos + remaining)
        * Affine3A::from_quat(rotation)
        * Affine3A::from_translation(-moving.pos)
}
