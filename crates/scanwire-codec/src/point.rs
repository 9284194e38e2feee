/// A single 2D coordinate from a laser-scan profile.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when both components carry the same bit patterns as `other`.
    ///
    /// Unlike `==`, this treats identical NaNs as equal and `0.0` / `-0.0` as
    /// distinct, which is what a lossless wire round-trip promises.
    pub fn bit_eq(&self, other: &Point) -> bool {
        self.x.to_bits() == other.x.to_bits() && self.y.to_bits() == other.y.to_bits()
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(point: Point) -> Self {
        [point.x, point.y]
    }
}

/// A labelled point set, e.g. the "Flange" or "Tread" scan of a wheel.
///
/// Point order is the scan order and is preserved end to end.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Profile {
    pub label: String,
    pub points: Vec<Point>,
}

impl Profile {
    pub fn new(label: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        assert_eq!(Point::from([1.0, 2.0]), Point::new(1.0, 2.0));
        assert_eq!(Point::from((3.5, -4.25)), Point::new(3.5, -4.25));
        assert_eq!(<[f64; 2]>::from(Point::new(5.0, 6.0)), [5.0, 6.0]);
    }

    #[test]
    fn bit_eq_distinguishes_signed_zero() {
        assert_eq!(Point::new(0.0, 0.0), Point::new(-0.0, 0.0));
        assert!(!Point::new(0.0, 0.0).bit_eq(&Point::new(-0.0, 0.0)));
        assert!(Point::new(f64::NAN, 1.0).bit_eq(&Point::new(f64::NAN, 1.0)));
    }

    #[test]
    fn profile_len() {
        let profile = Profile::new("Tread", vec![Point::new(1.0, 1.0)]);
        assert_eq!(profile.len(), 1);
        assert!(!profile.is_empty());
        assert!(Profile::default().is_empty());
    }
}
