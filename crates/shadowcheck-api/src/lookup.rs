//! Answer-or-unavailable result of an authoritative lookup.

/// Result of a lookup that is allowed to fail softly.
///
/// `Unavailable` is not an error: it tells the caller the authoritative tier
/// has nothing to say and the observational tier should run instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The API answered
    Answered(T),
    /// The API could not answer (rate limited, unauthorized, non-200, transport fault)
    Unavailable(String),
}

impl<T> Lookup<T> {
    /// Transform the answer, keeping unavailability as is.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Lookup<U> {
        match self {
            Self::Answered(value) => Lookup::Answered(f(value)),
            Self::Unavailable(reason) => Lookup::Unavailable(reason),
        }
    }

    /// Whether the API answered.
    #[must_use]
    pub fn is_answered(&self) -> bool {
        matches!(self, Self::Answered(_))
    }
}
