use crate::error::Result;
use crate::kmeans::{Clustering, Coordinate, Point};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Formats one output line (without the newline). Coordinates are truncated
/// toward zero.
pub fn format_record(point: &Point, centroid: Coordinate) -> String {
    let coordinate = point.coordinate();
    format!(
        "{}\t{} {}\t{}\t{} {}",
        point.id(),
        coordinate.x as i64,
        coordinate.y as i64,
        point.cluster(),
        centroid.x as i64,
        centroid.y as i64
    )
}

/// Writes one line per point, in the order of `clustering.points`.
pub fn write_clustering<W: Write>(writer: W, clustering: &Clustering) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    for point in &clustering.points {
        writeln!(writer, "{}", format_record(point, clustering.centroid_of(point)))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the clustering to `path`, replacing any existing file.
pub fn save_clustering<P: AsRef<Path>>(path: P, clustering: &Clustering) -> Result<()> {
    let file = File::create(path)?;
    write_clustering(file, clustering)
}
