/// Card ids starting with this character are skipped unless `--include-z` is given.
pub const EXCLUDED_VARIANT_PREFIX: char = 'Z';

/// Roster ids always start with this character.
pub const ROSTER_PREFIX: char = '1';

// The id as read off the card. The first character is a variant marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Apid(pub String);

impl Apid {
    pub fn is_excluded_variant(&self) -> bool {
        self.0.starts_with(EXCLUDED_VARIANT_PREFIX)
    }

    /// Rewrites the variant marker to the roster prefix.
    pub fn to_pid(&self) -> Pid {
        let mut chars = self.0.chars();
        chars.next();
        Pid(std::iter::once(ROSTER_PREFIX).chain(chars).collect())
    }
}

impl std::fmt::Display for Apid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// The canonical id used as the roster key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pid(pub String);

impl std::fmt::Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
