//! Tests for point sampling

extern crate std;

use crate::coordinate::{CoordinateAxis, Orientation, Point};
use crate::extractor::{round_to, sample_point};
use crate::raster::Grid;

#[test]
fn test_sample_nearest_cell() {
    let lat = CoordinateAxis::new(std::vec![1.0, 0.0, -1.0], Orientation::Descending).unwrap();
    let lon = CoordinateAxis::new(std::vec![10.0, 11.0], Orientation::Ascending).unwrap();
    let grid = Grid::new(3, 2, std::vec![1.0, 2.0, 3.0, 4.0, f64::NAN, 6.0]).unwrap();

    std::assert_eq!(sample_point(&grid, &lat, &lon, &Point::new(10.9, 0.2)).unwrap(), 4.0);
    std::assert!(sample_point(&grid, &lat, &lon, &Point::new(10.1, -0.8)).unwrap().is_nan());
}

#[test]
fn test_round_to() {
    std::assert_eq!(round_to(0.31999, 2), 0.32);
    std::assert_eq!(round_to(-10.005001, 2), -10.01);
    std::assert!(round_to(f64::NAN, 2).is_nan());
}
