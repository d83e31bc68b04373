//! Fixed-capacity, unordered projectile storage.
//!
//! Removal is swap-with-last: O(1), but it reorders the survivors. Order carries no
//! meaning for projectiles, so nothing depends on it.

use crate::entity::Entity;

pub struct ProjectilePool {
    live: Vec<Entity>,
    capacity: usize,
}

impl ProjectilePool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            live: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.live.len() >= self.capacity
    }

    /// Append a projectile. Returns `false` and drops it when the pool is full.
    pub fn try_push(&mut self, projectile: Entity) -> bool {
        if self.is_full() {
            return false;
        }
        self.live.push(projectile);
        true
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.live.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Entity> {
        self.live.iter_mut()
    }

    #[cfg(test)]
    pub fn as_slice(&self) -> &[Entity] {
        &self.live
    }

    /// Remove every projectile for which `keep` returns false, swapping the last
    /// live element into the hole. The swapped-in element is examined before the
    /// scan moves on. Returns the number removed.
    pub fn retain_unordered(&mut self, mut keep: impl FnMut(&Entity) -> bool) -> usize {
        let mut removed = 0;
        let mut i = 0;
        while i < self.live.len() {
            if keep(&self.live[i]) {
                i += 1;
            } else {
                self.live.swap_remove(i);
                removed += 1;
            }
        }
        removed
    }
}
