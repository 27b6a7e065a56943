/// A derived value paired with a staleness marker.
///
/// The value is only reachable through [`Cached::get_or_update`], which
/// recomputes it first when stale, so a reader can never observe a value that
/// predates the last [`Cached::invalidate`].
#[derive(Debug, Clone)]
pub struct Cached<T> {
    value: T,
    stale: bool,
}

impl<T> Cached<T> {
    /// Starts stale: the placeholder is never returned.
    pub fn stale(placeholder: T) -> Self {
        Self { value: placeholder, stale: true }
    }

    #[inline]
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    #[inline]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Unconditionally replaces the value and clears the stale marker.
    pub fn refresh(&mut self, value: T) -> &T {
        self.value = value;
        self.stale = false;
        &self.value
    }

    /// Returns the value, recomputing it with `compute` if stale.
    pub fn get_or_update(&mut self, compute: impl FnOnce() -> T) -> &T {
        if self.stale {
            self.value = compute();
            self.stale = false;
        }
        &self.value
    }
}
