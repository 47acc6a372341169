use serde::{Deserialize, Serialize};

/// Mean earth radius used by the local metric plane and distance helpers
const EARTH_RADIUS: f64 = 6378137.0;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are finite and within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat >= -90.0
            && self.lat <= 90.0
            && self.lng >= -180.0
            && self.lng <= 180.0
    }

    /// Calculates the distance to another LatLng using the Haversine formula
    pub fn distance_to(&self, other: &LatLng) -> f64 {
        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS * c
    }

    /// Midpoint of two coordinates (plain average, fine at building scale)
    pub fn midpoint(&self, other: &LatLng) -> LatLng {
        LatLng::new((self.lat + other.lat) / 2.0, (self.lng + other.lng) / 2.0)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// A physical location together with the floor it sits on.
///
/// The floor index is only meaningful relative to a floor set; callers
/// validate it with [`CoordinateWithFloor::is_on_building`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateWithFloor {
    pub coordinate: LatLng,
    pub floor: usize,
}

impl CoordinateWithFloor {
    pub fn new(coordinate: LatLng, floor: usize) -> Self {
        Self { coordinate, floor }
    }

    pub fn is_on_building(&self, total_floors: usize) -> bool {
        self.floor < total_floors && self.coordinate.is_valid()
    }
}

/// Represents a point in authoring (floorplan) or planar coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A point in the floorplan artwork's own coordinate space
pub type AuthoringPoint = Point;

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Local east/south metric plane centred on a reference coordinate.
///
/// Equirectangular around the reference latitude. At building scale the
/// distortion is far below floorplan drawing accuracy, and the mapping is
/// linear so it inverts exactly up to rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalPlane {
    origin: LatLng,
    meters_per_degree_lat: f64,
    meters_per_degree_lng: f64,
}

impl LocalPlane {
    pub fn new(origin: LatLng) -> Self {
        let meters_per_degree_lat = EARTH_RADIUS.to_radians();
        Self {
            origin,
            meters_per_degree_lat,
            meters_per_degree_lng: meters_per_degree_lat * origin.lat.to_radians().cos(),
        }
    }

    pub fn origin(&self) -> LatLng {
        self.origin
    }

    /// Projects to metres east (x) and south (y) of the origin
    pub fn project(&self, lat_lng: &LatLng) -> Point {
        Point::new(
            (lat_lng.lng - self.origin.lng) * self.meters_per_degree_lng,
            (self.origin.lat - lat_lng.lat) * self.meters_per_degree_lat,
        )
    }

    pub fn unproject(&self, point: &Point) -> LatLng {
        LatLng::new(
            self.origin.lat - point.y / self.meters_per_degree_lat,
            self.origin.lng + point.x / self.meters_per_degree_lng,
        )
    }
}

/// Represents a bounding box of geographical coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(LatLng::new(south, west), LatLng::new(north, east))
    }

    /// Smallest bounds containing every point, `None` for an empty input
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a LatLng>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bounds = Self::new(first, first);
        for point in iter {
            bounds.extend(point);
        }
        Some(bounds)
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Extends the bounds to include a point
    pub fn extend(&mut self, point: &LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> LatLng {
        self.south_west.midpoint(&self.north_east)
    }

    /// Diagonal length in metres
    pub fn diagonal_meters(&self) -> f64 {
        self.south_west.distance_to(&self.north_east)
    }
}
