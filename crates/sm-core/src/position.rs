//! 3D position in world space

use serde::{Deserialize, Serialize};

/// A position in world space, metres, right-handed XYZ.
///
/// Every operation that could produce a non-finite coordinate clamps
/// instead; callers that need to detect the anomaly use [`Position::is_finite`]
/// before trusting a freshly computed value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Spherical coordinates: azimuth/elevation in degrees, distance in metres.
    /// Azimuth 0 = +Y (front), positive = clockwise towards +X (right).
    pub fn from_spherical(azimuth_deg: f64, elevation_deg: f64, distance: f64) -> Self {
        let az = azimuth_deg.to_radians();
        let el = elevation_deg.to_radians();
        let cos_el = el.cos();
        Self {
            x: distance * az.sin() * cos_el,
            y: distance * az.cos() * cos_el,
            z: distance * el.sin(),
        }
    }

    pub fn to_spherical(self) -> (f64, f64, f64) {
        let distance = self.magnitude();
        if distance < 1e-10 {
            return (0.0, 0.0, 0.0);
        }
        let azimuth = self.x.atan2(self.y).to_degrees();
        let elevation = (self.z / distance).clamp(-1.0, 1.0).asin().to_degrees();
        (azimuth, elevation, distance)
    }

    #[inline]
    pub fn magnitude(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    #[inline]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    #[inline]
    pub fn distance_to(self, other: Self) -> f64 {
        (self - other).magnitude()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Clamp every coordinate into `[-bound, bound]`, and force non-finite
    /// coordinates to `0.0`. Used by the transform pipeline's final clamp
    /// stage (world envelope, §4.4 step 3).
    pub fn clamp_finite(self, bound: Option<f64>) -> Self {
        let clamp_one = |v: f64| -> f64 {
            let v = if v.is_finite() { v } else { 0.0 };
            match bound {
                Some(b) => v.clamp(-b, b),
                None => v,
            }
        };
        Self {
            x: clamp_one(self.x),
            y: clamp_one(self.y),
            z: clamp_one(self.z),
        }
    }

    /// Rotate in the XY plane by `angle_deg` (used for circular/spiral formation offsets).
    pub fn rotate_xy(self, angle_deg: f64) -> Self {
        let rad = angle_deg.to_radians();
        let (sin, cos) = rad.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
            z: self.z,
        }
    }

    /// Rotate in the XZ plane by `angle_deg`.
    pub fn rotate_xz(self, angle_deg: f64) -> Self {
        let rad = angle_deg.to_radians();
        let (sin, cos) = rad.sin_cos();
        Self {
            x: self.x * cos - self.z * sin,
            y: self.y,
            z: self.x * sin + self.z * cos,
        }
    }

    /// Rotate in the YZ plane by `angle_deg`.
    pub fn rotate_yz(self, angle_deg: f64) -> Self {
        let rad = angle_deg.to_radians();
        let (sin, cos) = rad.sin_cos();
        Self {
            x: self.x,
            y: self.y * cos - self.z * sin,
            z: self.y * sin + self.z * cos,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl std::ops::Add for Position {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f64> for Position {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// The plane a rotational model moves in, used by the transform pipeline
/// to rotate a precomputed `trackOffset` (§4.4 step 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationPlane {
    Xy,
    Xz,
    Yz,
}

impl RotationPlane {
    pub fn rotate(self, p: Position, angle_deg: f64) -> Position {
        match self {
            RotationPlane::Xy => p.rotate_xy(angle_deg),
            RotationPlane::Xz => p.rotate_xz(angle_deg),
            RotationPlane::Yz => p.rotate_yz(angle_deg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lerp_boundaries() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(4.0, 0.0, 0.0);
        assert_relative_eq!(a.lerp(b, 0.0).x, 0.0);
        assert_relative_eq!(a.lerp(b, 1.0).x, 4.0);
        assert_relative_eq!(a.lerp(b, 0.5).x, 2.0);
    }

    #[test]
    fn spherical_round_trip() {
        let p = Position::new(1.0, 0.0, 0.0);
        let (az, el, dist) = p.to_spherical();
        let back = Position::from_spherical(az, el, dist);
        assert_relative_eq!(back.x, p.x, epsilon = 1e-9);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-9);
        assert_relative_eq!(back.z, p.z, epsilon = 1e-9);
    }

    #[test]
    fn clamp_finite_substitutes_nan() {
        let p = Position::new(f64::NAN, f64::INFINITY, 5.0);
        let clamped = p.clamp_finite(Some(10.0));
        assert!(clamped.is_finite());
        assert_eq!(clamped.x, 0.0);
        assert_eq!(clamped.y, 0.0);
        assert_eq!(clamped.z, 5.0);
    }

    #[test]
    fn clamp_finite_respects_bound() {
        let p = Position::new(100.0, -100.0, 0.0);
        let clamped = p.clamp_finite(Some(10.0));
        assert_eq!(clamped.x, 10.0);
        assert_eq!(clamped.y, -10.0);
    }

    #[test]
    fn rotate_xy_quarter_turn() {
        let p = Position::new(1.0, 0.0, 0.0);
        let r = p.rotate_xy(90.0);
        assert_relative_eq!(r.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(r.y, 1.0, epsilon = 1e-9);
    }
}
