//! Tests for polygon containment

extern crate std;

use crate::coordinate::Point;
use crate::regions::{Polygon, Ring};

fn square(min: f64, max: f64) -> std::vec::Vec<Point> {
    std::vec![
        Point::new(min, min),
        Point::new(max, min),
        Point::new(max, max),
        Point::new(min, max),
    ]
}

#[test]
fn test_interior_and_exterior_points() {
    let poly = Polygon::from_coords(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]).unwrap();
    std::assert!(poly.contains(&Point::new(2.0, 2.0)));
    std::assert!(!poly.contains(&Point::new(5.0, 2.0)));
    std::assert!(!poly.contains(&Point::new(-0.1, 2.0)));
}

#[test]
fn test_boundary_and_vertices_are_inside() {
    let poly = Polygon::from_coords(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]).unwrap();
    std::assert!(poly.contains(&Point::new(0.0, 2.0)));
    std::assert!(poly.contains(&Point::new(4.0, 4.0)));
    std::assert!(poly.contains(&Point::new(2.0, 0.0)));
}

#[test]
fn test_concave_polygon() {
    // U shape opening to the north
    let poly = Polygon::from_coords(&[
        (0.0, 0.0),
        (3.0, 0.0),
        (3.0, 3.0),
        (2.0, 3.0),
        (2.0, 1.0),
        (1.0, 1.0),
        (1.0, 3.0),
        (0.0, 3.0),
    ])
    .unwrap();
    std::assert!(poly.contains(&Point::new(0.5, 2.0)));
    std::assert!(poly.contains(&Point::new(2.5, 2.0)));
    std::assert!(!poly.contains(&Point::new(1.5, 2.0)));
}

#[test]
fn test_hole_interior_excluded_but_hole_edge_kept() {
    let exterior = Ring::new(square(0.0, 10.0)).unwrap();
    let hole = Ring::new(square(4.0, 6.0)).unwrap();
    let poly = Polygon::new(exterior, std::vec![hole]);

    std::assert!(!poly.contains(&Point::new(5.0, 5.0)));
    std::assert!(poly.contains(&Point::new(4.0, 5.0)));
    std::assert!(poly.contains(&Point::new(2.0, 2.0)));
}

#[test]
fn test_closing_vertex_dropped() {
    let mut vertices = square(0.0, 1.0);
    vertices.push(Point::new(0.0, 0.0));
    let ring = Ring::new(vertices).unwrap();
    std::assert_eq!(ring.vertices().len(), 4);
}

#[test]
fn test_degenerate_ring_rejected() {
    std::assert!(Ring::new(std::vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).is_err());
    std::assert!(Polygon::from_coords(&[(0.0, 0.0), (1.0, f64::NAN), (1.0, 1.0)]).is_err());
}
