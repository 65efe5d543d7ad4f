use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::shape::{Shape, Shaped};

/// Shapes built once per type and shared afterwards.
///
/// Safe to use from several threads. Two threads racing on the same type may
/// both build its shape; the first one stored is the one every caller sees.
#[derive(Debug, Default)]
pub struct ShapeCache {
    shapes: RwLock<HashMap<TypeId, Arc<Shape>>>,
}

impl ShapeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<T: Shaped>(&self) -> Arc<Shape> {
        self.get_or_build::<T>(T::shape)
    }

    /// Shape registered for `T`, running `build` the first time.
    pub fn get_or_build<T: 'static>(&self, build: impl FnOnce() -> Shape) -> Arc<Shape> {
        let id = TypeId::of::<T>();
        {
            let shapes = self.shapes.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(shape) = shapes.get(&id) {
                return Arc::clone(shape);
            }
        }
        let built = Arc::new(build());
        let mut shapes = self.shapes.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(shapes.entry(id).or_insert(built))
    }

    pub fn len(&self) -> usize {
        self.shapes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn builds_once() {
        let cache = ShapeCache::new();
        let a = cache.get::<Vec<i32>>();
        let b = cache.get::<Vec<i32>>();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);

        let mut calls = 0;
        let c = cache.get_or_build::<Vec<i32>>(|| {
            calls += 1;
            Shape::Bool
        });
        assert_eq!(calls, 0);
        assert!(Arc::ptr_eq(&a, &c));
    }

    #[test]
    fn concurrent_lookups_agree() {
        let cache = Arc::new(ShapeCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.get::<Option<String>>())
            })
            .collect();
        let shapes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for shape in &shapes {
            assert!(Arc::ptr_eq(shape, &shapes[0]));
        }
        assert_eq!(cache.len(), 1);
    }
}
