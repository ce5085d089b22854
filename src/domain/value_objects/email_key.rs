/// Case-folded form of an email address used for uniqueness and lookups
///
/// Two addresses differing only in case share the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmailKey(String);

impl EmailKey {
    pub fn new(email: &str) -> Self {
        Self(email.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive exact comparison against a raw address
    pub fn matches(&self, email: &str) -> bool {
        self.0 == email.to_lowercase()
    }
}

impl From<&str> for EmailKey {
    fn from(email: &str) -> Self {
        Self::new(email)
    }
}

impl std::fmt::Display for EmailKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
