use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use scanwire_codec::Point;
use tracing::warn;

/// Load a profile from a CSV file whose first two columns are x and y.
pub fn load_points(path: &Path) -> io::Result<Vec<Point>> {
    let file = File::open(path)?;
    parse_points(BufReader::new(file))
}

/// Parse `x,y[,...]` rows after a one-line header.
///
/// Rows with fewer than two fields, or with an empty second field such as
/// `1.0,`, are skipped silently; rows whose x or y is not a number are
/// skipped with a warning naming the 1-based line.
pub fn parse_points<R: BufRead>(reader: R) -> io::Result<Vec<Point>> {
    let mut points = Vec::new();
    for (index, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        let mut fields = line.split(',');
        let (Some(x), Some(y)) = (fields.next(), fields.next().filter(|y| !y.is_empty())) else {
            continue;
        };
        match (x.trim().parse::<f64>(), y.trim().parse::<f64>()) {
            (Ok(x), Ok(y)) => points.push(Point::new(x, y)),
            _ => warn!(line = index + 1, content = %line, "skipping unparsable row"),
        }
    }
    Ok(points)
}
