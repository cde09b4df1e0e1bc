//! Geographic helpers: bounding boxes for the map viewport and great-circle
//! distances for the users-near query.

use crate::models::{Location, UserRecord};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// Axis-aligned bounding box over a set of locations.
///
/// Starts empty; every [`extend`](Bounds::extend) grows it to include the
/// given point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    corners: Option<(Location, Location)>,
}

impl Bounds {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, loc: Location) {
        self.corners = Some(match self.corners {
            None => (loc, loc),
            Some((sw, ne)) => (
                Location::new(sw.longitude.min(loc.longitude), sw.latitude.min(loc.latitude)),
                Location::new(ne.longitude.max(loc.longitude), ne.latitude.max(loc.latitude)),
            ),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.corners.is_none()
    }

    pub fn south_west(&self) -> Option<Location> {
        self.corners.map(|(sw, _)| sw)
    }

    pub fn north_east(&self) -> Option<Location> {
        self.corners.map(|(_, ne)| ne)
    }
}

impl FromIterator<Location> for Bounds {
    fn from_iter<I: IntoIterator<Item = Location>>(iter: I) -> Self {
        let mut bounds = Bounds::empty();
        for loc in iter {
            bounds.extend(loc);
        }
        bounds
    }
}

/// Great-circle distance between two points in meters (haversine formula).
pub fn haversine_distance(a: Location, b: Location) -> f64 {
    let (lat1, lat2) = (a.latitude.to_radians(), b.latitude.to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * h.sqrt().min(1.0).asin()
}

/// Users within `radius_meters` of `origin`, nearest first.
///
/// Users without a location are never near anything.
pub fn nearest_within(
    origin: Location,
    radius_meters: f64,
    users: impl IntoIterator<Item = UserRecord>,
) -> Vec<UserRecord> {
    let mut near: Vec<(f64, UserRecord)> = users
        .into_iter()
        .filter_map(|user| {
            let distance = haversine_distance(origin, user.loc?);
            (distance <= radius_meters).then_some((distance, user))
        })
        .collect();
    near.sort_by(|a, b| a.0.total_cmp(&b.0));
    near.into_iter().map(|(_, user)| user).collect()
}
