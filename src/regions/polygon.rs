//! Polygon geometry in lon/lat degrees
//!
//! Containment is closed: points on a ring edge or vertex count as inside.
//! Interior points are decided by ray casting.

use crate::coordinate::{BoundingBox, Point};
use crate::raster::{GridError, GridResult};

/// Absolute tolerance in degrees for on-edge tests
const EDGE_EPSILON: f64 = 1e-10;

/// Closed ring of vertices; the closing vertex is implicit
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    vertices: Vec<Point>,
    bounds: BoundingBox,
}

impl Ring {
    /// Create a ring from at least three vertices
    ///
    /// A repeated closing vertex is dropped.
    pub fn new(mut vertices: Vec<Point>) -> GridResult<Self> {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return Err(GridError::ConfigError(format!(
                "A ring needs at least 3 distinct vertices, got {}",
                vertices.len()
            )));
        }
        if vertices.iter().any(|p| !p.lon.is_finite() || !p.lat.is_finite()) {
            return Err(GridError::ConfigError("Ring has a non-finite vertex".to_string()));
        }

        let bounds = vertices.iter().fold(
            BoundingBox::new(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            |b, p| BoundingBox::new(b.min_lon.min(p.lon), b.min_lat.min(p.lat), b.max_lon.max(p.lon), b.max_lat.max(p.lat)),
        );

        Ok(Ring { vertices, bounds })
    }

    /// Vertices without the closing repeat
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Bounding box of the ring
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    fn edges(&self) -> impl Iterator<Item = (&Point, &Point)> {
        let n = self.vertices.len();
        (0..n).map(move |i| (&self.vertices[i], &self.vertices[(i + 1) % n]))
    }

    /// True if the point lies on one of the ring's edges
    pub fn on_boundary(&self, point: &Point) -> bool {
        self.edges().any(|(a, b)| on_segment(point, a, b))
    }

    /// True if the point is strictly inside the ring (ray casting)
    fn strictly_inside(&self, point: &Point) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.lat > point.lat) != (b.lat > point.lat)
                && point.lon < (b.lon - a.lon) * (point.lat - a.lat) / (b.lat - a.lat) + a.lon
            {
                inside = !inside;
            }
        }
        inside
    }

    /// True if the point is inside or on the ring
    pub fn contains(&self, point: &Point) -> bool {
        if !self.bounds.contains(point) {
            return false;
        }
        self.on_boundary(point) || self.strictly_inside(point)
    }
}

/// True if `p` lies on the segment `a`-`b`
fn on_segment(p: &Point, a: &Point, b: &Point) -> bool {
    let cross = (b.lon - a.lon) * (p.lat - a.lat) - (b.lat - a.lat) * (p.lon - a.lon);
    let length = ((b.lon - a.lon).powi(2) + (b.lat - a.lat).powi(2)).sqrt();
    if cross.abs() > EDGE_EPSILON * length.max(1.0) {
        return false;
    }
    p.lon >= a.lon.min(b.lon) - EDGE_EPSILON
        && p.lon <= a.lon.max(b.lon) + EDGE_EPSILON
        && p.lat >= a.lat.min(b.lat) - EDGE_EPSILON
        && p.lat <= a.lat.max(b.lat) + EDGE_EPSILON
}

/// Polygon with an exterior ring and optional holes
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    exterior: Ring,
    holes: Vec<Ring>,
}

impl Polygon {
    /// Create a polygon
    pub fn new(exterior: Ring, holes: Vec<Ring>) -> Self {
        Polygon { exterior, holes }
    }

    /// Create a polygon without holes from (lon, lat) pairs
    pub fn from_coords(coords: &[(f64, f64)]) -> GridResult<Self> {
        let ring = Ring::new(coords.iter().map(|&(lon, lat)| Point::new(lon, lat)).collect())?;
        Ok(Polygon::new(ring, Vec::new()))
    }

    /// Exterior ring
    pub fn exterior(&self) -> &Ring {
        &self.exterior
    }

    /// Interior rings
    pub fn holes(&self) -> &[Ring] {
        &self.holes
    }

    /// True if the point is inside the polygon or on any of its rings
    ///
    /// A hole's boundary belongs to the polygon; only a hole's strict
    /// interior is excluded.
    pub fn contains(&self, point: &Point) -> bool {
        if !self.exterior.contains(point) {
            return false;
        }
        !self
            .holes
            .iter()
            .any(|h| h.contains(point) && !h.on_boundary(point))
    }
}
