pub mod geocoder;
pub mod google;

pub use geocoder::{Address, GeocodeError, ReverseGeocoder};
pub use google::{GoogleGeocoder, GoogleGeocoderSettings};
