//! Tests for coordinate axes and nearest-index lookup

extern crate std;

use crate::coordinate::{nearest_index, CoordinateAxis, LongitudeConvention, Orientation};
use crate::raster::GridError;

fn axes() -> std::vec::Vec<CoordinateAxis> {
    std::vec![
        CoordinateAxis::new(std::vec![10.0, 5.0, 0.0, -5.0, -10.0], Orientation::Descending).unwrap(),
        CoordinateAxis::new(std::vec![-3.0, -1.5, 0.25, 2.0, 7.5, 8.0], Orientation::Ascending).unwrap(),
        CoordinateAxis::from_cell_centers(-92.99, 0.02, 300, Orientation::Ascending).unwrap(),
    ]
}

#[test]
fn test_nearest_index_is_optimal_inside_span() {
    for axis in axes() {
        let steps = 500;
        for k in 0..=steps {
            let v = axis.min() + (axis.max() - axis.min()) * k as f64 / steps as f64;
            let i = nearest_index(&axis, v).unwrap();
            let best = (axis.values()[i] - v).abs();
            for a in axis.values() {
                std::assert!(best <= (a - v).abs());
            }
        }
    }
}

#[test]
fn test_ties_resolve_to_lower_index() {
    let axis = CoordinateAxis::new(std::vec![0.0, 1.0, 2.0], Orientation::Ascending).unwrap();
    std::assert_eq!(axis.nearest_index(0.5).unwrap(), 0);

    let desc = CoordinateAxis::new(std::vec![2.0, 1.0, 0.0], Orientation::Descending).unwrap();
    std::assert_eq!(desc.nearest_index(1.5).unwrap(), 0);
}

#[test]
fn test_out_of_range_clamps_with_warning() {
    let axis = CoordinateAxis::new(std::vec![10.0, 5.0, 0.0], Orientation::Descending).unwrap();

    let (index, warning) = axis.nearest_lookup(80.0).unwrap();
    std::assert_eq!(index, 0);
    let warning = warning.unwrap();
    std::assert_eq!(warning.index, 0);
    std::assert_eq!(warning.max, 10.0);

    let (index, warning) = axis.nearest_lookup(-40.0).unwrap();
    std::assert_eq!(index, 2);
    std::assert!(warning.is_some());

    // within one spacing of the edge is not out of range
    let (_, warning) = axis.nearest_lookup(12.0).unwrap();
    std::assert!(warning.is_none());
}

#[test]
fn test_nan_lookup_fails() {
    let axis = CoordinateAxis::infer(std::vec![0.0, 1.0]).unwrap();
    std::assert!(std::matches!(axis.nearest_index(f64::NAN), Err(GridError::InvalidCoordinate(_))));
}

#[test]
fn test_declared_orientation_is_validated() {
    let result = CoordinateAxis::new(std::vec![0.0, 1.0, 2.0], Orientation::Descending);
    std::assert!(std::matches!(result, Err(GridError::NonMonotonicAxis(1))));

    let result = CoordinateAxis::new(std::vec![0.0, 1.0, 1.0], Orientation::Ascending);
    std::assert!(std::matches!(result, Err(GridError::NonMonotonicAxis(2))));

    let result = CoordinateAxis::new(std::vec![], Orientation::Ascending);
    std::assert!(std::matches!(result, Err(GridError::EmptyAxis)));
}

#[test]
fn test_infer_orientation() {
    let axis = CoordinateAxis::infer(std::vec![5.0, 0.0, -5.0]).unwrap();
    std::assert_eq!(axis.orientation(), Orientation::Descending);
    std::assert_eq!(axis.min(), -5.0);
    std::assert_eq!(axis.max(), 5.0);
}

#[test]
fn test_cell_centers_have_exact_count() {
    let res = 60.0 / 6720.0;
    let lats = CoordinateAxis::from_cell_centers(25.0 - res / 2.0, res, 9072, Orientation::Descending).unwrap();

    std::assert_eq!(lats.len(), 9072);
    std::assert!((lats.max() - (25.0 - res / 2.0)).abs() < 1e-9);
    std::assert!((lats.min() - (-56.0 + res / 2.0)).abs() < 1e-6);
}

#[test]
fn test_axis_slice_keeps_orientation() {
    let axis = CoordinateAxis::new(std::vec![10.0, 5.0, 0.0, -5.0, -10.0], Orientation::Descending).unwrap();
    let sub = axis.slice(1, 3).unwrap();

    std::assert_eq!(sub.values(), &[5.0, 0.0, -5.0]);
    std::assert_eq!(sub.orientation(), Orientation::Descending);
    std::assert!(axis.slice(3, 1).is_err());
}

#[test]
fn test_longitude_convention_detection() {
    let lons = CoordinateAxis::infer(std::vec![0.0, 90.0, 180.0, 270.0, 359.0]).unwrap();
    std::assert_eq!(lons.longitude_convention(), LongitudeConvention::Positive360);

    let lons = CoordinateAxis::infer(std::vec![-180.0, 0.0, 179.0]).unwrap();
    std::assert_eq!(lons.longitude_convention(), LongitudeConvention::Signed180);
}
