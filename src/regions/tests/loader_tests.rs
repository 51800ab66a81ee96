//! Tests for TOML region files

extern crate std;

use crate::coordinate::Point;
use crate::raster::GridError;
use crate::regions::regions_from_str;

const REGIONS: &str = r#"
[[region]]
name = "N"
abbrev = "Norte"

[[region.polygon]]
exterior = [[-74, -10], [-45, -10], [-45, 5], [-74, 5]]

[[region]]
name = "NE"
abbrev = "Nordeste"

[[region.polygon]]
exterior = [[-48.0, -18.0], [-35.0, -18.0], [-35.0, -1.0], [-48.0, -1.0]]
holes = [[[-42.0, -12.0], [-40.0, -12.0], [-40.0, -10.0], [-42.0, -10.0]]]
"#;

#[test]
fn test_regions_load_in_file_order() {
    let set = regions_from_str(REGIONS).unwrap();
    std::assert_eq!(set.names(), std::vec!["N", "NE"]);
    std::assert_eq!(set.index_of("NE").unwrap(), 1);
    std::assert_eq!(set.get(1).unwrap().abbrev.as_deref(), Some("Nordeste"));
    std::assert_eq!(set.get(1).unwrap().polygons[0].holes().len(), 1);
}

#[test]
fn test_loaded_regions_overlap_resolves_to_first() {
    let set = regions_from_str(REGIONS).unwrap();
    // Both N and NE cover (-46, -5)
    std::assert_eq!(set.first_containing(&Point::new(-46.0, -5.0)), Some(0));
    std::assert_eq!(set.first_containing(&Point::new(-38.0, -5.0)), Some(1));
    std::assert_eq!(set.first_containing(&Point::new(-41.0, -11.0)), None);
}

#[test]
fn test_missing_region_table() {
    std::assert!(std::matches!(regions_from_str("x = 1"), Err(GridError::ConfigError(_))));
}

#[test]
fn test_bad_vertex_rejected() {
    let content = r#"
[[region]]
name = "X"
[[region.polygon]]
exterior = [[0.0, 0.0], [1.0], [1.0, 1.0]]
"#;
    std::assert!(std::matches!(regions_from_str(content), Err(GridError::ConfigError(_))));
}
