/// The four operations a lazily computed value needs from its storage.
///
/// Implementors must drop the cached value whenever the source is replaced. Nothing checks that
/// a cached value was actually derived from the current source, that is up to the caller of
/// `set_cached`.
pub trait CacheSlot<T> {
    fn source(&self) -> &T;
    fn set_source(&mut self, value: T);
    fn cached(&self) -> Option<&T>;
    fn set_cached(&mut self, value: T) -> &T;
}

/// A source value together with an optionally cached value derived from it.
///
/// Replacing the source always invalidates the cache, even if the new source is equal to the
/// previous one.
#[derive(Debug, Clone, Default)]
pub struct CacheCell<T> {
    source: T,
    cached: Option<T>,
}

impl<T> CacheCell<T> {
    pub fn new(source: T) -> Self {
        CacheCell {
            source,
            cached: None,
        }
    }

    pub fn source(&self) -> &T {
        &self.source
    }

    pub fn set_source(&mut self, source: T) {
        tracing::trace!(was_cached = self.is_cached(), "source replaced");
        self.source = source;
        self.cached = None;
    }

    /// Transform the source in place by value.
    ///
    /// The process aborts if `f` panics, because the source can't be left in a moved-out state.
    pub fn map_source(&mut self, f: impl FnOnce(T) -> T) {
        tracing::trace!(was_cached = self.is_cached(), "source mapped");
        self.cached = None;
        replace_with::replace_with_or_abort(&mut self.source, f);
    }

    pub fn cached(&self) -> Option<&T> {
        self.cached.as_ref()
    }

    /// Store a value as the cached result.
    ///
    /// The value is not checked against the current source.
    pub fn set_cached(&mut self, value: T) -> &T {
        self.cached.insert(value)
    }

    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }

    /// Drop the cached value, keeping the source.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Return the cached value, computing and storing it first if there is none.
    ///
    /// `compute` must be a pure function of the source. If it isn't, the cache may hand out
    /// values that don't correspond to the current source.
    pub fn get_or_compute(&mut self, compute: impl FnOnce(&T) -> T) -> &T {
        match &mut self.cached {
            Some(value) => &*value,
            slot => &*slot.insert(compute(&self.source)),
        }
    }

    /// Like [`get_or_compute`](Self::get_or_compute), but for computations that can fail.
    ///
    /// On error nothing is cached and the error is returned as is.
    pub fn get_or_try_compute<E>(
        &mut self,
        compute: impl FnOnce(&T) -> Result<T, E>,
    ) -> Result<&T, E> {
        match &mut self.cached {
            Some(value) => Ok(&*value),
            slot => {
                let value = compute(&self.source)?;
                Ok(&*slot.insert(value))
            }
        }
    }

    pub fn into_parts(self) -> (T, Option<T>) {
        (self.source, self.cached)
    }
}

impl<T> CacheSlot<T> for CacheCell<T> {
    fn source(&self) -> &T {
        CacheCell::source(self)
    }

    fn set_source(&mut self, value: T) {
        CacheCell::set_source(self, value)
    }

    fn cached(&self) -> Option<&T> {
        CacheCell::cached(self)
    }

    fn set_cached(&mut self, value: T) -> &T {
        CacheCell::set_cached(self, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        cell::Cell,
        panic::{self, AssertUnwindSafe},
    };

    #[test]
    fn new_cell_is_not_cached() {
        let cell = CacheCell::new(4);
        assert_eq!(*cell.source(), 4);
        assert_eq!(cell.cached(), None);
        assert!(!cell.is_cached());
    }

    #[test]
    fn default_uses_default_source() {
        let cell: CacheCell<Vec<u8>> = CacheCell::default();
        assert!(cell.source().is_empty());
        assert!(!cell.is_cached());
    }

    #[test]
    fn set_cached_does_not_touch_source() {
        let mut cell = CacheCell::new(2);
        assert_eq!(*cell.set_cached(10), 10);
        assert_eq!(*cell.source(), 2);
        assert_eq!(cell.cached(), Some(&10));
    }

    #[test]
    fn setting_an_equal_source_still_invalidates() {
        let mut cell = CacheCell::new(2);
        cell.set_cached(4);
        cell.set_source(2);
        assert_eq!(cell.cached(), None);
    }

    #[test]
    fn map_source_invalidates() {
        let mut cell = CacheCell::new(vec![1, 2]);
        cell.set_cached(vec![2, 1]);
        cell.map_source(|mut v| {
            v.push(3);
            v
        });
        assert_eq!(cell.source(), &[1, 2, 3]);
        assert!(!cell.is_cached());
    }

    #[test]
    fn invalidate_keeps_source() {
        let mut cell = CacheCell::new(3);
        cell.set_cached(9);
        cell.invalidate();
        assert_eq!(*cell.source(), 3);
        assert_eq!(cell.cached(), None);
    }

    #[test]
    fn get_or_compute_computes_once() {
        let calls = Cell::new(0);
        let square = |v: &i32| {
            calls.set(calls.get() + 1);
            v * v
        };
        let mut cell = CacheCell::new(5);
        assert_eq!(*cell.get_or_compute(square), 25);
        assert_eq!(*cell.get_or_compute(square), 25);
        assert_eq!(calls.get(), 1);

        cell.set_source(6);
        assert_eq!(*cell.get_or_compute(square), 36);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn get_or_try_compute_keeps_cache_empty_on_error() {
        let mut cell = CacheCell::new(0);
        let reciprocal = |v: &i32| if *v == 0 { Err("zero") } else { Ok(100 / v) };

        assert_eq!(cell.get_or_try_compute(reciprocal), Err("zero"));
        assert!(!cell.is_cached());

        cell.set_source(4);
        assert_eq!(cell.get_or_try_compute(reciprocal), Ok(&25));
        assert_eq!(cell.cached(), Some(&25));
    }

    #[test]
    fn panicking_compute_leaves_cache_empty() {
        let mut cell = CacheCell::new(1);
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            cell.get_or_compute(|_: &i32| -> i32 { panic!("compute failed") });
        }));
        assert!(result.is_err());
        assert_eq!(cell.cached(), None);

        assert_eq!(*cell.get_or_compute(|v| v + 1), 2);
        assert_eq!(cell.cached(), Some(&2));
    }

    #[test]
    fn debug_shows_both_slots() {
        let mut cell = CacheCell::new(1);
        assert_eq!(format!("{cell:?}"), "CacheCell { source: 1, cached: None }");
        cell.set_cached(2);
        assert_eq!(format!("{cell:?}"), "CacheCell { source: 1, cached: Some(2) }");
    }

    #[test]
    fn into_parts() {
        let mut cell = CacheCell::new("a");
        cell.set_cached("b");
        assert_eq!(cell.into_parts(), ("a", Some("b")));
    }
}
