/// Latitude/longitude pair. The all-zero point stands for "no location".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const ZERO: GeoPoint = GeoPoint { lat: 0.0, lng: 0.0 };

    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}
