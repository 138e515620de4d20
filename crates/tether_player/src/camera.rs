//! Camera field-of-view smoothing

use tether_core::FovTarget;

/// Smoothly moves the camera FOV toward a requested target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    current: f32,
    target: f32,
    smoothing: f32,
}

impl CameraRig {
    /// Create a rig resting at `fov` degrees
    pub fn new(fov: f32, smoothing: f32) -> Self {
        Self {
            current: fov,
            target: fov,
            smoothing,
        }
    }

    /// Current field of view in degrees
    pub fn fov(&self) -> f32 {
        self.current
    }

    /// Requested field of view in degrees
    pub fn target_fov(&self) -> f32 {
        self.target
    }

    /// Advance the smoothing by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        let t = (dt * self.smoothing).clamp(0.0, 1.0);
        self.current += (self.target - self.current) * t;
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(80.0, 4.0)
    }
}

impl FovTarget for CameraRig {
    fn set_target_fov(&mut self, fov: f32) {
        self.target = fov;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_set_target_never_snaps() {
        let mut rig = CameraRig::new(80.0, 4.0);
        rig.set_target_fov(100.0);
        assert_relative_eq!(rig.fov(), 80.0);

        rig.update(0.05);
        // 20 * 0.2
        assert_relative_eq!(rig.fov(), 84.0, epsilon = 1e-4);
    }

    #[test]
    fn test_converges_monotonically() {
        let mut rig = CameraRig::new(80.0, 4.0);
        rig.set_target_fov(100.0);

        let mut last = rig.fov();
        for _ in 0..240 {
            rig.update(1.0 / 60.0);
            assert!(rig.fov() >= last);
            assert!(rig.fov() <= 100.0);
            last = rig.fov();
        }
        assert_relative_eq!(rig.fov(), 100.0, epsilon = 0.01);
    }

    #[test]
    fn test_large_step_does_not_overshoot() {
        let mut rig = CameraRig::new(80.0, 4.0);
        rig.set_target_fov(100.0);
        rig.update(1.0);
        assert_relative_eq!(rig.fov(), 100.0);
    }
}
