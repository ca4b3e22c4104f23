//! Coordinate extraction from ArcGIS web-map links. Pure string parsing;
//! the geocoding HTTP client and map widget live outside this crate.

use once_cell::sync::Lazy;
use regex::Regex;

static CENTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[?&]center=([-+]?\d+\.?\d*),([-+]?\d+\.?\d*)").expect("valid center pattern")
});

static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"marker=([-+]?\d+\.?\d*);([-+]?\d+\.?\d*)").expect("valid marker pattern")
});

/// Extract `(lat, lon)` from ArcGIS web-map URL patterns. Both the
/// `?center=LON,LAT` and `marker=LON;LAT` forms carry longitude first.
pub fn parse_coordinates(url: &str) -> Option<(f64, f64)> {
    for re in [&*CENTER_RE, &*MARKER_RE] {
        if let Some(caps) = re.captures(url) {
            let lon: f64 = caps.get(1)?.as_str().parse().ok()?;
            let lat: f64 = caps.get(2)?.as_str().parse().ok()?;
            if (-180.0..=180.0).contains(&lon) && (-90.0..=90.0).contains(&lat) {
                return Some((lat, lon));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_center_parameter() {
        let url = "https://www.arcgis.com/apps/mapviewer/index.html?center=-79.3832,43.6532&level=15";
        assert_eq!(parse_coordinates(url), Some((43.6532, -79.3832)));
    }

    #[test]
    fn parses_marker_parameter() {
        let url = "https://arcgis.com/home/webmap/viewer.html?marker=-79.38;43.65";
        assert_eq!(parse_coordinates(url), Some((43.65, -79.38)));
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let url = "https://arcgis.com/?center=-200.0,43.65";
        assert_eq!(parse_coordinates(url), None);
    }

    #[test]
    fn rejects_links_without_coordinates() {
        assert_eq!(parse_coordinates("https://experience.arcgis.com/experience/abc"), None);
    }
}
