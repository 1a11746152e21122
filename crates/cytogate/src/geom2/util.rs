use nalgebra::Vector2;

/// Cross product of `b - a` and `c - a` (twice the signed triangle area).
#[inline]
pub fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Unsigned area of triangle `(a, b, c)`.
#[inline]
pub fn triangle_area(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    0.5 * cross(a, b, c).abs()
}

/// Signed shoelace area of a ring; positive for CCW order.
pub fn polygon_area(ring: &[Vector2<f64>]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..n {
        let p = ring[i];
        let q = ring[(i + 1) % n];
        acc += p.x * q.y - p.y * q.x;
    }
    0.5 * acc
}

/// Point-in-convex-ring test with slack `eps` (either winding).
///
/// `eps > 0` is permissive: points up to `eps` outside an edge still count.
pub fn contains_point(ring: &[Vector2<f64>], p: Vector2<f64>, eps: f64) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let orient = polygon_area(ring).signum();
    (0..n).all(|i| {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        let len = (b - a).norm();
        if len == 0.0 {
            return true;
        }
        orient * cross(a, b, p) / len >= -eps
    })
}
