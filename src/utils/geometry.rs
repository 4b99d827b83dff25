use nalgebra::{Unit, UnitQuaternion, Vector3};

/// Unit vector along `v`, or `None` for a zero or non-finite vector.
pub fn direction(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    if !v.iter().all(|c| c.is_finite()) {
        return None;
    }
    v.try_normalize(f64::EPSILON)
}

/// Angle from `from` to `to` measured around `axis`, in (-π, π].
///
/// Only the components perpendicular to `axis` take part.
pub fn signed_angle(from: &Vector3<f64>, to: &Vector3<f64>, axis: &Vector3<f64>) -> f64 {
    let axis = match direction(axis) {
        Some(axis) => axis,
        None => return 0.0,
    };
    let from = from - axis * axis.dot(from);
    let to = to - axis * axis.dot(to);
    let sin = axis.dot(&from.cross(&to));
    let cos = from.dot(&to);
    sin.atan2(cos)
}

/// Rotates `v` by `angle` radians around `axis` (right-handed).
pub fn rotate_about(v: &Vector3<f64>, axis: &Vector3<f64>, angle: f64) -> Vector3<f64> {
    match direction(axis) {
        Some(axis) => UnitQuaternion::from_axis_angle(&Unit::new_unchecked(axis), angle) * v,
        None => *v,
    }
}
