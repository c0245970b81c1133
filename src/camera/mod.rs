//! Camera poses and the rigid motion between them.

/// Camera pose and depth-slab parameters.
pub mod core;
/// Incremental rigid transform aligning one camera with another.
pub mod transform;

pub use self::core::Camera;
pub use self::transform::{camera_transform, dihedral, NEAR_ZERO};
