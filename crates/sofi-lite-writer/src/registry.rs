// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Deduplicating, numbering-aware entity registry
//!
//! One registry owns all entities of one kind. Registration deduplicates
//! against already-accepted entities (first match in insertion order),
//! resolves numbering within `(kind, group)`, and records a diagnostic
//! warning whenever an explicitly authored number has to be moved aside.
//!
//! Invariants held between calls:
//! - no two stored entities satisfy the kind's equality predicate
//! - no two stored entities share `(number, group)`
//! - every stored entity has a resolved number

use crate::entity::{EntityRef, ModelEntity};
use rustc_hash::FxHashSet;

/// Insertion-ordered collection owning entities of one kind
pub struct Registry<E> {
    entities: Vec<E>,
    warnings: Vec<String>,
    /// Occupied `(group, number)` pairs, kept in lockstep with `entities`
    taken: FxHashSet<(Option<u32>, u32)>,
}

impl<E: ModelEntity> Registry<E> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            warnings: Vec::new(),
            taken: FxHashSet::default(),
        }
    }

    /// Register an entity, returning the authoritative handle
    ///
    /// If an identical entity is already stored, its handle is returned and
    /// the incoming value is discarded without numbering. Otherwise the
    /// incoming entity is numbered (auto-assigned or conflict-resolved) and
    /// appended.
    ///
    /// Numbering conflicts never fail: an explicitly authored number beats
    /// an auto-assigned one silently, and loses against an earlier
    /// explicitly authored number with a recorded warning.
    pub fn register(&mut self, mut entity: E) -> EntityRef {
        if let Some(existing) = self.find_identical(&entity) {
            return existing;
        }

        let group = entity.core().group;
        match entity.core().number {
            None => {
                let number = self.lowest_free(group);
                entity.core_mut().number = Some(number);
                self.taken.insert((group, number));
            }
            Some(requested) => {
                match self.find_conflict(requested, group) {
                    Some(conflict) => self.resolve_conflict(conflict, &mut entity, requested),
                    None => {
                        self.taken.insert((group, requested));
                    }
                }
            }
        }

        let index = self.entities.len() as u32;
        self.entities.push(entity);
        EntityRef(index)
    }

    /// First stored entity identical to `entity`, in insertion order
    fn find_identical(&self, entity: &E) -> Option<EntityRef> {
        self.entities
            .iter()
            .position(|existing| entity.identical_to(existing))
            .map(|index| EntityRef(index as u32))
    }

    /// Stored entity occupying `(number, group)`, if any
    fn find_conflict(&self, number: u32, group: Option<u32>) -> Option<usize> {
        self.entities.iter().position(|existing| {
            existing.core().number == Some(number) && existing.core().group == group
        })
    }

    /// Lowest positive number not yet taken in `group`
    fn lowest_free(&self, group: Option<u32>) -> u32 {
        let mut number = 1;
        while self.taken.contains(&(group, number)) {
            number += 1;
        }
        number
    }

    /// Precedence rules for two entities claiming the same `(number, group)`
    ///
    /// The incoming entity always carries an explicit number here (auto
    /// assignment never collides). If the stored entity's number was NOT
    /// explicitly authored it is moved aside silently; if it was, the
    /// incoming entity yields instead and a warning records the change.
    fn resolve_conflict(&mut self, conflict: usize, entity: &mut E, requested: u32) {
        let group = entity.core().group;
        let free = self.lowest_free(group);
        if !self.entities[conflict].core().strict_numbering {
            self.entities[conflict].core_mut().number = Some(free);
            self.taken.insert((group, free));
            // `requested` stays occupied, now by the incoming entity
        } else {
            entity.core_mut().number = Some(free);
            self.taken.insert((group, free));
            self.warnings.push(format!(
                "Numbering conflict, {} number {} changed to {}.",
                entity.kind().token(),
                requested,
                free
            ));
        }
    }

    /// Entity behind a handle
    pub fn get(&self, handle: EntityRef) -> Option<&E> {
        self.entities.get(handle.index())
    }

    /// Resolved number behind a handle; 0 for a dangling handle
    pub fn number_of(&self, handle: EntityRef) -> u32 {
        self.entities
            .get(handle.index())
            .and_then(|entity| entity.core().number)
            .unwrap_or(0)
    }

    /// Iterate entities in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entities.iter()
    }

    /// Diagnostic warnings, in the order they were recorded
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl<E: ModelEntity> Default for Registry<E> {
    fn default() -> Self {
        Self::new()
    }
}
