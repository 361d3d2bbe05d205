use vdir_sql::Flavor;

/// Adapter settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    /// Maximum number of entries a search returns when the request does
    /// not set its own limit. `0` means unlimited.
    pub size_limit: usize,

    /// Hold source locks for the duration of every operation
    pub locking: bool,

    /// SQL dialect statements are rendered in for logging
    pub flavor: Flavor,
}

impl Config {
    /// The limit applying to a request asking for `requested` entries.
    pub fn size_limit(&self, requested: usize) -> usize {
        match requested {
            0 => self.size_limit,
            requested => requested,
        }
    }
}
