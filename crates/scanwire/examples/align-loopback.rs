//! Align a rotated, shifted copy of a synthetic tread back onto it.
//!
//! Run with:
//!   cargo run --example align-loopback

use scanwire::align::{align, AlignConfig, RigidTransform};
use scanwire::codec::Point;

fn main() {
    let tread: Vec<Point> = (0..60)
        .map(|i| {
            let x = i as f64 * 0.8;
            Point::new(x, 0.02 * x * x)
        })
        .collect();

    let offset = RigidTransform {
        rotation: 0.004,
        tx: 0.15,
        ty: -0.1,
    };
    let flange: Vec<Point> = tread.iter().map(|&p| offset.apply(p)).collect();

    let result = align(&flange, &tread, &AlignConfig::default());
    let worst = result
        .points
        .iter()
        .zip(&tread)
        .map(|(a, b)| ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt())
        .fold(0.0f64, f64::max);

    eprintln!(
        "stopped: {} after {} iterations, worst residual {worst:.2e}",
        result.stop.as_str(),
        result.iterations
    );
}
