use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use geo_types::Point;
use gpx::{Gpx, GpxVersion, Track, TrackSegment};

use crate::error::PlanError;
use crate::models::Waypoint;

const CREATOR: &str = "pluggist";

/// Base64 of [`write_trip_gpx`], the form embedded in JSON responses.
pub fn encode_trip_as_gpx(waypoints: &[Waypoint]) -> Result<String, PlanError> {
    Ok(BASE64.encode(write_trip_gpx(waypoints)?))
}

/// Directions export: one named waypoint per stop plus a track through them.
pub fn write_trip_gpx(waypoints: &[Waypoint]) -> Result<Vec<u8>, PlanError> {
    let mut gpx = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(CREATOR.into()),
        ..Default::default()
    };
    let mut track = Track {
        name: Some(trip_name(waypoints)),
        ..Default::default()
    };

    let mut segment = TrackSegment::new();
    for waypoint in waypoints {
        segment.points.push(to_gpx_point(waypoint));
        gpx.waypoints.push(to_gpx_point(waypoint));
    }
    track.segments.push(segment);
    gpx.tracks.push(track);

    let mut buffer = Vec::new();
    gpx::write(&gpx, &mut buffer)?;
    Ok(buffer)
}

fn trip_name(waypoints: &[Waypoint]) -> String {
    match (waypoints.first(), waypoints.last()) {
        (Some(start), Some(end)) if waypoints.len() > 1 => {
            format!("{} to {}", start.label, end.label)
        }
        _ => CREATOR.to_string(),
    }
}

fn to_gpx_point(waypoint: &Waypoint) -> gpx::Waypoint {
    let mut point = gpx::Waypoint::new(Point::new(waypoint.lon, waypoint.lat));
    point.name = Some(waypoint.label.clone());
    point
}
