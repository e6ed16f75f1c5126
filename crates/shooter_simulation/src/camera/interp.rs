//! Frame-rate независимая интерполяция к target (exponential approach)
//!
//! `alpha = clamp(dt × speed, 0, 1)`; speed ≤ 0 → сразу target.

use bevy::prelude::*;

fn alpha(delta_secs: f32, speed: f32) -> Option<f32> {
    if speed <= 0.0 {
        return None;
    }
    Some((delta_secs * speed).clamp(0.0, 1.0))
}

pub fn interp_f32(current: f32, target: f32, delta_secs: f32, speed: f32) -> f32 {
    match alpha(delta_secs, speed) {
        Some(alpha) => current + (target - current) * alpha,
        None => target,
    }
}

pub fn interp_vec3(current: Vec3, target: Vec3, delta_secs: f32, speed: f32) -> Vec3 {
    match alpha(delta_secs, speed) {
        Some(alpha) => current + (target - current) * alpha,
        None => target,
    }
}

pub fn interp_quat(current: Quat, target: Quat, delta_secs: f32, speed: f32) -> Quat {
    match alpha(delta_secs, speed) {
        Some(alpha) => current.slerp(target, alpha).normalize(),
        None => target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_positive_speed_returns_target() {
        assert_eq!(interp_f32(90.0, 75.0, 0.016, 0.0), 75.0);
        assert_eq!(interp_vec3(Vec3::ZERO, Vec3::ONE, 0.016, -1.0), Vec3::ONE);
    }

    #[test]
    fn test_converges_without_overshoot() {
        let mut fov = 90.0;
        let mut previous_gap = f32::MAX;

        for _ in 0..120 {
            fov = interp_f32(fov, 75.0, 1.0 / 60.0, 5.0);
            let gap = fov - 75.0;
            assert!(gap >= 0.0);
            assert!(gap < previous_gap);
            previous_gap = gap;
        }
        assert!(previous_gap < 0.5);
    }

    #[test]
    fn test_large_dt_clamps_alpha() {
        let position = interp_vec3(Vec3::ZERO, Vec3::new(0.0, 40.0, -180.0), 10.0, 5.0);
        assert_eq!(position, Vec3::new(0.0, 40.0, -180.0));
    }

    #[test]
    fn test_quat_interp_stays_normalized() {
        let target = Quat::from_rotation_y(1.0);
        let rotation = interp_quat(Quat::IDENTITY, target, 0.05, 5.0);
        assert!((rotation.length() - 1.0).abs() < 1e-5);
        assert!(rotation.angle_between(target) < 1.0);
    }
}
