//! The lazy compute-and-store protocol on top of a [`CacheSlot`].
//!
//! `compute` is expected to be a pure, deterministic function of the source. This is not and
//! can't be verified; a cache filled by an impure function may return values that no longer
//! match what `compute` would produce for the current source.

use crate::cell::CacheSlot;
use std::convert::Infallible;

/// Return the cached value of `slot`, or compute it from the source and cache it.
pub fn resolve<T, S>(slot: &mut S, compute: impl FnOnce(&T) -> T) -> T
where
    T: Clone,
    S: CacheSlot<T> + ?Sized,
{
    match try_resolve(slot, |source| Ok::<_, Infallible>(compute(source))) {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// Fallible version of [`resolve`].
///
/// The error of `compute` is returned unchanged and the slot is left without a cached value, so
/// the next call computes again.
pub fn try_resolve<T, E, S>(
    slot: &mut S,
    compute: impl FnOnce(&T) -> Result<T, E>,
) -> Result<T, E>
where
    T: Clone,
    S: CacheSlot<T> + ?Sized,
{
    if let Some(cached) = slot.cached() {
        tracing::debug!("getting cached data");
        return Ok(cached.clone());
    }

    tracing::debug!("no cached data, computing");
    let value = compute(slot.source()).inspect_err(|_| {
        tracing::debug!("computation failed, cache stays empty");
    })?;
    Ok(slot.set_cached(value).clone())
}
