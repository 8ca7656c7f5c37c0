use std::fmt;

use kiddo::{KdTree, SquaredEuclidean};

/// k-d tree over located stations, keyed by station index.
///
/// Points live on the unit sphere so squared euclidean distance is a
/// monotone function of great-circle distance.
pub(crate) struct StationIndex {
    tree: KdTree<f64, 3>,
    len: usize,
}

impl Default for StationIndex {
    fn default() -> Self {
        Self {
            tree: KdTree::new(),
            len: 0,
        }
    }
}

impl fmt::Debug for StationIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StationIndex")
            .field("len", &self.len)
            .finish()
    }
}

impl StationIndex {
    pub fn add(&mut self, location: geo_types::Point<f64>, idx: usize) {
        self.tree
            .add(&to_unit(location.y(), location.x()), idx as u64);
        self.len += 1;
    }

    pub fn nearest(&self, lat: f64, lon: f64) -> Option<(usize, f64)> {
        if self.len == 0 {
            return None;
        }

        let found = self
            .tree
            .nearest_one::<SquaredEuclidean>(&to_unit(lat, lon));
        Some((found.item as usize, chord2_to_meters(found.distance)))
    }

    pub fn within_radius(
        &self,
        lat: f64,
        lon: f64,
        distance: f64,
    ) -> impl Iterator<Item = (usize, f64)> {
        self.tree
            .within::<SquaredEuclidean>(&to_unit(lat, lon), meters_to_chord2(distance))
            .into_iter()
            .map(|x| (x.item as usize, chord2_to_meters(x.distance)))
    }
}

/// Great-circle distance in meters between two lon/lat points.
pub fn great_circle_meters(a: geo_types::Point<f64>, b: geo_types::Point<f64>) -> f64 {
    let [ax, ay, az] = to_unit(a.y(), a.x());
    let [bx, by, bz] = to_unit(b.y(), b.x());
    let chord2 = (ax - bx).powi(2) + (ay - by).powi(2) + (az - bz).powi(2);
    chord2_to_meters(chord2)
}

const R_EARTH_M: f64 = 6_371_008.8;

fn to_unit(lat_deg: f64, lon_deg: f64) -> [f64; 3] {
    let (lat, lon) = (lat_deg.to_radians(), lon_deg.to_radians());
    let (clat, clon, slat, slon) = (lat.cos(), lon.cos(), lat.sin(), lon.sin());
    [clat * clon, clat * slon, slat]
}

#[inline]
fn chord2_to_meters(chord2: f64) -> f64 {
    let c = chord2.sqrt();
    let theta = 2.0 * (c / 2.0).asin();
    R_EARTH_M * theta
}

#[inline]
fn meters_to_chord2(d_m: f64) -> f64 {
    // numerically stable for small d
    let half = d_m / (2.0 * R_EARTH_M);
    4.0 * half.sin().powi(2)
}
