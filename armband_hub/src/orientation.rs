//! Orientation data and the quaternion → Euler conversion the device SDK
//! provides.
//!
//! The band streams its attitude as a unit quaternion.  Applications almost
//! always want roll/pitch/yaw, so the conversion lives here, next to the
//! type, using the aerospace Z-Y-X convention:
//!
//! * **roll**  — rotation about the x-axis (along the forearm)
//! * **pitch** — rotation about the y-axis
//! * **yaw**   — rotation about the z-axis

// ════════════════════════════════════════════════════════════════════════════
// Quaternion
// ════════════════════════════════════════════════════════════════════════════

/// A rotation, as reported by the band's onboard fusion.
///
/// Components are `w + xi + yj + zk`.  Values coming off the device are
/// already normalized; nothing here re-normalizes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quaternion {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Quaternion {
    /// No rotation.
    pub const IDENTITY: Quaternion = Quaternion { w: 1.0, x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Quaternion { w, x, y, z }
    }

    /// Build a quaternion from Euler angles in radians (Z-Y-X order:
    /// yaw, then pitch, then roll).
    pub fn from_euler(roll: f32, pitch: f32, yaw: f32) -> Self {
        let (sr, cr) = (roll * 0.5).sin_cos();
        let (sp, cp) = (pitch * 0.5).sin_cos();
        let (sy, cy) = (yaw * 0.5).sin_cos();
        Quaternion {
            w: cr * cp * cy + sr * sp * sy,
            x: sr * cp * cy - cr * sp * sy,
            y: cr * sp * cy + sr * cp * sy,
            z: cr * cp * sy - sr * sp * cy,
        }
    }

    /// Roll in radians.
    pub fn roll(self) -> f32 {
        let Quaternion { w, x, y, z } = self;
        (2.0 * (w * x + y * z)).atan2(1.0 - 2.0 * (x * x + y * y))
    }

    /// Pitch in radians.  The asin argument is clamped so numerical noise
    /// near the ±90° singularity cannot produce NaN.
    pub fn pitch(self) -> f32 {
        let Quaternion { w, x, y, z } = self;
        (2.0 * (w * y - z * x)).clamp(-1.0, 1.0).asin()
    }

    /// Yaw in radians.
    pub fn yaw(self) -> f32 {
        let Quaternion { w, x, y, z } = self;
        (2.0 * (w * z + x * y)).atan2(1.0 - 2.0 * (y * y + z * z))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-4;

    #[test]
    fn identity_has_zero_angles() {
        let q = Quaternion::IDENTITY;
        assert!(q.roll().abs() < EPS);
        assert!(q.pitch().abs() < EPS);
        assert!(q.yaw().abs() < EPS);
    }

    #[test]
    fn quarter_roll_extracts() {
        // 90° about x: w = cos(45°), x = sin(45°)
        let q = Quaternion::new((FRAC_PI_2 / 2.0).cos(), (FRAC_PI_2 / 2.0).sin(), 0.0, 0.0);
        assert!((q.roll() - FRAC_PI_2).abs() < EPS);
        assert!(q.pitch().abs() < EPS);
        assert!(q.yaw().abs() < EPS);
    }

    #[test]
    fn from_euler_matches_extraction() {
        let (r, p, y) = (0.3_f32, -0.4_f32, 1.1_f32);
        let q = Quaternion::from_euler(r, p, y);
        assert!((q.roll() - r).abs() < EPS);
        assert!((q.pitch() - p).abs() < EPS);
        assert!((q.yaw() - y).abs() < EPS);
    }

    #[test]
    fn pitch_clamps_at_singularity() {
        // Slightly denormalized input pushes the asin argument past 1.0.
        let q = Quaternion::new(0.7072, 0.0, 0.7072, 0.0);
        assert!(q.pitch().is_finite());
        assert!((q.pitch() - FRAC_PI_2).abs() < 1e-2);
    }
}
