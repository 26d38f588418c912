use crate::models::{Coordinate, MapView, Waypoint};

const DEFAULT_CENTER: Coordinate = Coordinate {
    lat: 36.7783,
    lon: -97.4179,
};
const DEFAULT_ZOOM: u8 = 4;

/// Center the map on the markers and zoom to the start/destination spread.
pub fn map_view(markers: &[Waypoint]) -> MapView {
    let (Some(first), Some(last)) = (markers.first(), markers.last()) else {
        return MapView {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        };
    };

    let count = markers.len() as f64;
    let center = Coordinate {
        lat: markers.iter().map(|m| m.lat).sum::<f64>() / count,
        lon: markers.iter().map(|m| m.lon).sum::<f64>() / count,
    };

    let spread = (first.lat - last.lat).abs().max((first.lon - last.lon).abs());
    MapView {
        center,
        zoom: zoom_for_spread(spread),
    }
}

fn zoom_for_spread(degrees: f64) -> u8 {
    match degrees {
        d if d > 20.0 => 4,
        d if d > 10.0 => 5,
        d if d > 5.0 => 6,
        d if d > 2.0 => 7,
        d if d > 1.0 => 8,
        _ => 9,
    }
}
