mod geolocation_lookup;

pub use geolocation_lookup::GeolocationLookup;
