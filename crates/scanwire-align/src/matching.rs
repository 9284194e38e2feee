use scanwire_codec::Point;

/// A 2D rotation about the origin followed by a translation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RigidTransform {
    /// Rotation angle in radians, counter-clockwise.
    pub rotation: f64,
    pub tx: f64,
    pub ty: f64,
}

impl RigidTransform {
    pub fn apply(&self, point: Point) -> Point {
        let (sin, cos) = self.rotation.sin_cos();
        Point::new(
            cos * point.x - sin * point.y + self.tx,
            sin * point.x + cos * point.y + self.ty,
        )
    }

    /// Largest absolute translation component.
    pub fn max_translation(&self) -> f64 {
        self.tx.abs().max(self.ty.abs())
    }
}

/// Least-squares rigid transform mapping the first point of each pair onto
/// the second.
///
/// Closed-form solution from Lu & Milios, "Robot Pose Estimation in Unknown
/// Environments by Matching 2D Range Scans". Returns `None` for no pairs.
pub fn point_based_matching(pairs: &[(Point, Point)]) -> Option<RigidTransform> {
    if pairs.is_empty() {
        return None;
    }

    let n = pairs.len() as f64;
    let (mut x_mean, mut y_mean, mut xp_mean, mut yp_mean) = (0.0, 0.0, 0.0, 0.0);
    for (p, q) in pairs {
        x_mean += p.x;
        y_mean += p.y;
        xp_mean += q.x;
        yp_mean += q.y;
    }
    x_mean /= n;
    y_mean /= n;
    xp_mean /= n;
    yp_mean /= n;

    let (mut s_x_xp, mut s_y_yp, mut s_x_yp, mut s_y_xp) = (0.0, 0.0, 0.0, 0.0);
    for (p, q) in pairs {
        let (dx, dy) = (p.x - x_mean, p.y - y_mean);
        let (dxp, dyp) = (q.x - xp_mean, q.y - yp_mean);
        s_x_xp += dx * dxp;
        s_y_yp += dy * dyp;
        s_x_yp += dx * dyp;
        s_y_xp += dy * dxp;
    }

    let rotation = (s_x_yp - s_y_xp).atan2(s_x_xp + s_y_yp);
    let (sin, cos) = rotation.sin_cos();
    Some(RigidTransform {
        rotation,
        tx: xp_mean - (x_mean * cos - y_mean * sin),
        ty: yp_mean - (x_mean * sin + y_mean * cos),
    })
}

/// Index of and squared distance to the point of `targets` closest to `point`.
///
/// Brute force; ties go to the lowest index.
pub fn nearest(point: Point, targets: &[Point]) -> Option<(usize, f64)> {
    targets
        .iter()
        .enumerate()
        .map(|(index, target)| {
            let (dx, dy) = (target.x - point.x, target.y - point.y);
            (index, dx * dx + dy * dy)
        })
        .fold(None, |best, candidate| match best {
            Some((_, best_dist)) if best_dist <= candidate.1 => best,
            _ => Some(candidate),
        })
}
