use std::ops::{Add, Mul, Sub};

/// A point (or displacement) in 3D space. Speaker positions, sweep
/// endpoints and goal points are all exactly three-dimensional.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Builds a point from host-supplied raw coordinates.
    /// Returns `None` unless exactly three values are given.
    pub fn from_slice(coords: &[f32]) -> Option<Self> {
        match coords {
            [x, y, z] => Some(Self::new(*x, *y, *z)),
            _ => None,
        }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Euclidean distance between two points.
    pub fn distance(self, other: Point3) -> f32 {
        (other - self).length()
    }
}

impl Add for Point3 {
    type Output = Point3;
    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Point3;
    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Point3 {
    type Output = Point3;
    fn mul(self, rhs: f32) -> Point3 {
        Point3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::Point3;

    #[test]
    fn distance_basics() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 4.0, 0.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
        assert!((b.distance(a) - 5.0).abs() < 1e-6);
        assert_eq!(a.distance(a), 0.0);
    }

    #[test]
    fn from_slice_requires_three_coords() {
        assert_eq!(
            Point3::from_slice(&[1.0, 2.0, 3.0]),
            Some(Point3::new(1.0, 2.0, 3.0))
        );
        assert_eq!(Point3::from_slice(&[1.0, 2.0]), None);
        assert_eq!(Point3::from_slice(&[1.0, 2.0, 3.0, 4.0]), None);
        assert_eq!(Point3::from_slice(&[]), None);
    }

    #[test]
    fn vector_interpolation() {
        let start = Point3::new(0.0, 0.0, 0.0);
        let end = Point3::new(2.0, -4.0, 6.0);
        let mid = start + (end - start) * 0.5;
        assert_eq!(mid, Point3::new(1.0, -2.0, 3.0));
    }
}
