use std::{
    cmp::{max, min},
    collections::VecDeque,
};

use crate::{ActionKind, CollectionError, NoParent, ObservableCollection, ParentHook, SeqDelegate};


pub type ObservableList<E, H = NoParent> = ObservableCollection<E, Vec<E>, H>;
pub type ObservableDeque<E, H = NoParent> = ObservableCollection<E, VecDeque<E>, H>;

/// Position-aware operations.
///
/// Removing or moving an element emits an [`ActionKind::Update`] for every element whose
/// position changed, so that listeners caching positions can repair them without rescanning.
impl<E, D: SeqDelegate<E>, H: ParentHook<E>> ObservableCollection<E, D, H> {
    pub fn get(&self, index: usize) -> Option<&E> {
        self.delegate.get(index)
    }
    pub fn first(&self) -> Option<&E> {
        self.delegate.get(0)
    }
    pub fn last(&self) -> Option<&E> {
        self.delegate.get(self.delegate.len().checked_sub(1)?)
    }
    pub fn index_of(&self, value: &E) -> Option<usize> {
        self.delegate.position(value)
    }
    pub fn last_index_of(&self, value: &E) -> Option<usize> {
        self.delegate.last_position(value)
    }

    /// Inserts `value` at `index` and emits [`ActionKind::Add`] at that index.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_at(&mut self, index: usize, value: E) {
        self.delegate.insert_at(index, value);
        self.emit_at(ActionKind::Add, index);
    }

    /// Inserts `values` starting at `index`, emitting [`ActionKind::AddAll`] at ascending positions.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_all_at(&mut self, index: usize, values: impl IntoIterator<Item = E>) -> bool {
        let count = self.delegate.insert_all_at(index, values);
        for n in index..index + count {
            self.emit_at(ActionKind::AddAll, n);
        }
        count != 0
    }

    /// Removes the element at `index`.
    ///
    /// Emits [`ActionKind::Remove`] at `index`, then [`ActionKind::Update`] for every
    /// element from `index` to the end.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> E {
        let old = self.delegate.remove_at(index);
        self.notifier.emit(ActionKind::Remove, &old, Some(index));
        for n in index..self.delegate.len() {
            self.emit_at(ActionKind::Update, n);
        }
        old
    }

    /// Removes the first element equal to `value` with the same events as [`remove_at`](Self::remove_at).
    pub fn remove_by_value(&mut self, value: &E) -> Option<E> {
        let index = self.delegate.position(value)?;
        Some(self.remove_at(index))
    }

    /// Replaces the element at `index`, emitting [`ActionKind::SetRemoved`] for the old
    /// element and then [`ActionKind::SetInsert`] for the new one.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn replace_at(&mut self, index: usize, value: E) -> E {
        let old = self.delegate.replace_at(index, value);
        self.notifier.emit(ActionKind::SetRemoved, &old, Some(index));
        self.emit_at(ActionKind::SetInsert, index);
        old
    }

    /// Moves `value` to `new_index`.
    ///
    /// Every position between the old and the new index (inclusive) receives an
    /// [`ActionKind::Update`] with the element now stored there.
    pub fn move_element(&mut self, value: &E, new_index: usize) -> Result<(), CollectionError> {
        let old_index = self
            .delegate
            .position(value)
            .ok_or(CollectionError::NotFound)?;
        self.move_at(old_index, new_index)
    }

    /// Moves the element at `old_index` to `new_index`, with the same events as
    /// [`move_element`](Self::move_element).
    pub fn move_at(&mut self, old_index: usize, new_index: usize) -> Result<(), CollectionError> {
        let len = self.delegate.len();
        for index in [old_index, new_index] {
            if index >= len {
                return Err(CollectionError::IndexOutOfBounds { index, len });
            }
        }
        if old_index == new_index {
            return Ok(());
        }
        self.delegate.move_item(old_index, new_index);
        for n in min(old_index, new_index)..=max(old_index, new_index) {
            self.emit_at(ActionKind::Update, n);
        }
        Ok(())
    }

    fn emit_at(&mut self, action: ActionKind, index: usize) {
        if let Some(element) = self.delegate.get(index) {
            self.notifier.emit(action, element, Some(index));
        }
    }
}
