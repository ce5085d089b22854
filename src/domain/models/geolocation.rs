/// Coordinates resolved for one address query
///
/// A lookup that produced no entries is reported as absent, so a value of
/// this type returned from a successful lookup always holds at least one.
#[derive(Debug, Clone, PartialEq)]
pub struct GeolocationData {
    pub data: Vec<GeolocationEntry>,
}

impl GeolocationData {
    /// Wrap resolved entries; `None` when there are none
    pub fn from_entries(entries: Vec<GeolocationEntry>) -> Option<Self> {
        if entries.is_empty() {
            None
        } else {
            Some(Self { data: entries })
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A single geocoding match
#[derive(Debug, Clone, PartialEq)]
pub struct GeolocationEntry {
    /// The queried address, echoed back
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Provider classification of the match (street, locality, ...)
    pub kind: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}
