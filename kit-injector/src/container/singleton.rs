//! Singleton cache
//!
//! One slot per singleton type. The slot map lock is only held long enough to
//! fetch or create a slot; the slot's own lock is held across the first
//! construction so that concurrent first calls build the instance once.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::InjectError;

type Slot = Arc<Mutex<Option<Arc<dyn Any + Send + Sync>>>>;

#[derive(Default)]
pub(crate) struct SingletonCache {
    slots: Mutex<HashMap<TypeId, Slot>>,
}

impl SingletonCache {
    fn slot(&self, key: TypeId) -> Result<Slot, InjectError> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| InjectError::poisoned("singleton cache"))?;
        Ok(slots.entry(key).or_default().clone())
    }

    /// Return the cached `K`, or build and cache it
    ///
    /// A failed `init` leaves the slot empty.
    pub(crate) fn get_or_try_init<K, F>(&self, init: F) -> Result<Arc<K>, InjectError>
    where
        K: Send + Sync + 'static,
        F: FnOnce() -> Result<Arc<K>, InjectError>,
    {
        let slot = self.slot(TypeId::of::<K>())?;
        let mut cached = slot
            .lock()
            .map_err(|_| InjectError::poisoned("singleton slot"))?;

        if let Some(existing) = cached.as_ref() {
            return existing.clone().downcast::<K>().map_err(|_| {
                InjectError::type_mismatch::<K>("singleton slot", std::any::type_name::<K>())
            });
        }

        let instance = init()?;
        debug!(singleton = std::any::type_name::<K>(), "Initialized singleton");
        *cached = Some(instance.clone() as Arc<dyn Any + Send + Sync>);
        Ok(instance)
    }

    pub(crate) fn contains<K: 'static>(&self) -> bool {
        let slot = match self.slots.lock() {
            Ok(slots) => slots.get(&TypeId::of::<K>()).cloned(),
            Err(_) => None,
        };
        slot.and_then(|slot| slot.lock().ok().map(|cached| cached.is_some()))
            .unwrap_or(false)
    }

    /// Drop every cached instance, returning how many were held
    pub(crate) fn clear(&self) -> Result<usize, InjectError> {
        let drained: Vec<Slot> = self
            .slots
            .lock()
            .map_err(|_| InjectError::poisoned("singleton cache"))?
            .drain()
            .map(|(_, slot)| slot)
            .collect();
        // Slot locks are taken after the map lock is released
        Ok(drained
            .iter()
            .filter(|slot| slot.lock().map(|cached| cached.is_some()).unwrap_or(false))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    struct Counter(usize);

    #[test]
    fn test_second_call_returns_cached_instance() {
        let cache = SingletonCache::default();

        let first = cache.get_or_try_init(|| Ok(Arc::new(Counter(1)))).unwrap();
        let second = cache.get_or_try_init(|| Ok(Arc::new(Counter(2)))).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.0, 1);
        assert!(cache.contains::<Counter>());
    }

    #[test]
    fn test_failed_init_leaves_slot_empty() {
        let cache = SingletonCache::default();

        let err = cache
            .get_or_try_init::<Counter, _>(|| Err(InjectError::construction::<Counter>("boom")))
            .err()
            .unwrap();
        assert!(matches!(err, InjectError::Construction { .. }));
        assert!(!cache.contains::<Counter>());

        let built = cache.get_or_try_init(|| Ok(Arc::new(Counter(3)))).unwrap();
        assert_eq!(built.0, 3);
    }

    #[test]
    fn test_clear() {
        let cache = SingletonCache::default();
        cache.get_or_try_init(|| Ok(Arc::new(Counter(1)))).unwrap();

        assert_eq!(cache.clear().unwrap(), 1);
        assert!(!cache.contains::<Counter>());

        let rebuilt = cache.get_or_try_init(|| Ok(Arc::new(Counter(2)))).unwrap();
        assert_eq!(rebuilt.0, 2);
    }

    #[test]
    fn test_concurrent_first_calls_build_once() {
        let cache = Arc::new(SingletonCache::default());
        let builds = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let builds = Arc::clone(&builds);
                thread::spawn(move || {
                    cache
                        .get_or_try_init(|| {
                            builds.fetch_add(1, Ordering::SeqCst);
                            thread::sleep(std::time::Duration::from_millis(5));
                            Ok(Arc::new(Counter(0)))
                        })
                        .unwrap()
                })
            })
            .collect();

        let instances: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert!(instances.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
