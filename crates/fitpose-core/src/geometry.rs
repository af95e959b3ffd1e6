//! Joint-angle geometry over pose keypoints.
//!
//! Pure functions only; all state lives in the detector crate. Angles are
//! computed in image space, so the Y axis grows downward.

use crate::types::Keypoint;

/// Computes the interior angle at vertex `b` formed by rays `b -> a` and
/// `b -> c`, in degrees.
///
/// Returns `None` when either ray has zero length (degenerate geometry);
/// callers must treat that as "cannot evaluate this frame for this joint",
/// not as an error. The cosine is clamped to [-1, 1] before the arccosine
/// to guard against floating-point overshoot.
///
/// # Example
///
/// ```rust
/// use fitpose_core::geometry::joint_angle;
/// use fitpose_core::{Confidence, Keypoint, KeypointType};
///
/// let shoulder = Keypoint::new(KeypointType::LeftShoulder, 0.0, 0.0, Confidence::MAX);
/// let elbow = Keypoint::new(KeypointType::LeftElbow, 0.5, 0.0, Confidence::MAX);
/// let wrist = Keypoint::new(KeypointType::LeftWrist, 1.0, 0.0, Confidence::MAX);
///
/// let angle = joint_angle(&shoulder, &elbow, &wrist).unwrap();
/// assert!((angle - 180.0).abs() < 0.01);
/// ```
#[must_use]
pub fn joint_angle(a: &Keypoint, b: &Keypoint, c: &Keypoint) -> Option<f32> {
    let (abx, aby) = (a.x - b.x, a.y - b.y);
    let (cbx, cby) = (c.x - b.x, c.y - b.y);

    let mag_ab = (abx * abx + aby * aby).sqrt();
    let mag_cb = (cbx * cbx + cby * cby).sqrt();
    if mag_ab == 0.0 || mag_cb == 0.0 {
        return None;
    }

    let dot = abx * cbx + aby * cby;
    let cos = (dot / (mag_ab * mag_cb)).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}

/// Returns the vertical midpoint of two keypoints in image coordinates.
///
/// Used by the Y-ordering predicates (sit-ups and pull-ups) to compare a
/// single joint against the midline of a joint pair.
#[must_use]
pub fn midpoint_y(a: &Keypoint, b: &Keypoint) -> f32 {
    (a.y + b.y) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Confidence, KeypointType};

    fn kp(x: f32, y: f32) -> Keypoint {
        Keypoint::new(KeypointType::Nose, x, y, Confidence::MAX)
    }

    #[test]
    fn colinear_points_give_straight_angle() {
        let angle = joint_angle(&kp(0.0, 0.0), &kp(1.0, 1.0), &kp(2.0, 2.0)).unwrap();
        assert!((angle - 180.0).abs() < 0.01);
    }

    #[test]
    fn coincident_rays_give_zero_angle() {
        // a and c on the same side of b
        let angle = joint_angle(&kp(1.0, 0.0), &kp(0.0, 0.0), &kp(2.0, 0.0)).unwrap();
        assert!(angle.abs() < 0.01);
    }

    #[test]
    fn right_angle() {
        let angle = joint_angle(&kp(1.0, 0.0), &kp(0.0, 0.0), &kp(0.0, 1.0)).unwrap();
        assert!((angle - 90.0).abs() < 0.01);
    }

    #[test]
    fn zero_length_ray_is_degenerate() {
        assert!(joint_angle(&kp(0.5, 0.5), &kp(0.5, 0.5), &kp(1.0, 1.0)).is_none());
        assert!(joint_angle(&kp(1.0, 1.0), &kp(0.5, 0.5), &kp(0.5, 0.5)).is_none());
    }

    #[test]
    fn midpoint_y_averages() {
        assert!((midpoint_y(&kp(0.0, 0.2), &kp(0.0, 0.6)) - 0.4).abs() < f32::EPSILON);
    }
}
