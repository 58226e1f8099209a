//! Vector helpers shared by the movement and physics crates

use glam::Vec3;

/// World up direction
pub const UP: Vec3 = Vec3::Y;

/// Remove the component of `v` along `normal`.
///
/// `normal` does not need to be unit length. A zero normal leaves `v` unchanged.
pub fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    let len_sq = normal.length_squared();
    if len_sq <= f32::EPSILON {
        return v;
    }
    v - normal * (v.dot(normal) / len_sq)
}

/// Unsigned angle between two vectors in degrees.
///
/// Returns 0 when either vector has zero length.
pub fn angle_between_degrees(a: Vec3, b: Vec3) -> f32 {
    let denom = (a.length_squared() * b.length_squared()).sqrt();
    if denom <= f32::EPSILON {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Drop the vertical component
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Rescale `v` so its length does not exceed `max_len`
pub fn clamp_length(v: Vec3, max_len: f32) -> Vec3 {
    let len = v.length();
    if len > max_len && len > 0.0 {
        v / len * max_len
    } else {
        v
    }
}
