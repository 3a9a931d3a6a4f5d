use std::{
    cmp::Ordering,
    collections::{btree_set, hash_set, vec_deque, BTreeSet, HashSet, VecDeque},
    hash::{BuildHasher, Hash},
    mem::replace,
    slice,
};


/// Storage that an observable collection forwards its mutations to.
pub trait Delegate<E>: Default {
    /// Whether elements are addressed by a zero-based position.
    const ORDERED: bool;

    type Iter<'a>: Iterator<Item = &'a E>
    where
        Self: 'a,
        E: 'a;

    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn contains(&self, value: &E) -> bool;
    fn iter(&self) -> Self::Iter<'_>;

    /// Position of the first element equal to `value`, always `None` for unordered storage.
    fn position(&self, value: &E) -> Option<usize>;

    /// Stores `value` and passes the stored element and its position to `on_inserted`.
    ///
    /// Returns `false` without calling `on_inserted` if the storage rejects the value.
    fn insert_with(&mut self, value: E, on_inserted: impl FnOnce(&E, Option<usize>)) -> bool;

    /// Removes one element equal to `value`, returning it with the position it had before removal.
    fn remove(&mut self, value: &E) -> Option<(E, Option<usize>)>;

    fn retain(&mut self, f: impl FnMut(&E) -> bool);
    fn clear(&mut self);
}

/// Order-addressable storage.
///
/// Positional methods panic if the index is out of bounds.
pub trait SeqDelegate<E>: Delegate<E> {
    fn get(&self, index: usize) -> Option<&E>;
    fn last_position(&self, value: &E) -> Option<usize>;
    fn insert_at(&mut self, index: usize, value: E);

    /// Returns the number of inserted elements.
    fn insert_all_at(&mut self, index: usize, values: impl IntoIterator<Item = E>) -> usize;
    fn remove_at(&mut self, index: usize) -> E;
    fn replace_at(&mut self, index: usize, value: E) -> E;

    /// Moves the element at `old_index` to `new_index`, shifting the elements in between by one.
    fn move_item(&mut self, old_index: usize, new_index: usize);
}

/// Storage that never holds two equal elements.
pub trait SetDelegate<E>: Delegate<E> {}

fn move_in_slice<E>(items: &mut [E], old_index: usize, new_index: usize) {
    match old_index.cmp(&new_index) {
        Ordering::Less => items[old_index..=new_index].rotate_left(1),
        Ordering::Greater => items[new_index..=old_index].rotate_right(1),
        Ordering::Equal => {}
    }
}

impl<E: PartialEq> Delegate<E> for Vec<E> {
    const ORDERED: bool = true;
    type Iter<'a>
        = slice::Iter<'a, E>
    where
        E: 'a;

    fn len(&self) -> usize {
        Vec::len(self)
    }
    fn contains(&self, value: &E) -> bool {
        <[E]>::contains(self, value)
    }
    fn iter(&self) -> Self::Iter<'_> {
        <[E]>::iter(self)
    }
    fn position(&self, value: &E) -> Option<usize> {
        <[E]>::iter(self).position(|x| x == value)
    }
    fn insert_with(&mut self, value: E, on_inserted: impl FnOnce(&E, Option<usize>)) -> bool {
        self.push(value);
        let index = Vec::len(self) - 1;
        on_inserted(&self[index], Some(index));
        true
    }
    fn remove(&mut self, value: &E) -> Option<(E, Option<usize>)> {
        let index = Delegate::position(self, value)?;
        Some((Vec::remove(self, index), Some(index)))
    }
    fn retain(&mut self, f: impl FnMut(&E) -> bool) {
        Vec::retain(self, f)
    }
    fn clear(&mut self) {
        Vec::clear(self)
    }
}
impl<E: PartialEq> SeqDelegate<E> for Vec<E> {
    fn get(&self, index: usize) -> Option<&E> {
        <[E]>::get(self, index)
    }
    fn last_position(&self, value: &E) -> Option<usize> {
        <[E]>::iter(self).rposition(|x| x == value)
    }
    fn insert_at(&mut self, index: usize, value: E) {
        Vec::insert(self, index, value)
    }
    fn insert_all_at(&mut self, index: usize, values: impl IntoIterator<Item = E>) -> usize {
        let len = Vec::len(self);
        self.splice(index..index, values);
        Vec::len(self) - len
    }
    fn remove_at(&mut self, index: usize) -> E {
        Vec::remove(self, index)
    }
    fn replace_at(&mut self, index: usize, value: E) -> E {
        replace(&mut self[index], value)
    }
    fn move_item(&mut self, old_index: usize, new_index: usize) {
        move_in_slice(self, old_index, new_index)
    }
}

impl<E: PartialEq> Delegate<E> for VecDeque<E> {
    const ORDERED: bool = true;
    type Iter<'a>
        = vec_deque::Iter<'a, E>
    where
        E: 'a;

    fn len(&self) -> usize {
        VecDeque::len(self)
    }
    fn contains(&self, value: &E) -> bool {
        VecDeque::contains(self, value)
    }
    fn iter(&self) -> Self::Iter<'_> {
        VecDeque::iter(self)
    }
    fn position(&self, value: &E) -> Option<usize> {
        VecDeque::iter(self).position(|x| x == value)
    }
    fn insert_with(&mut self, value: E, on_inserted: impl FnOnce(&E, Option<usize>)) -> bool {
        self.push_back(value);
        let index = VecDeque::len(self) - 1;
        on_inserted(&self[index], Some(index));
        true
    }
    fn remove(&mut self, value: &E) -> Option<(E, Option<usize>)> {
        let index = Delegate::position(self, value)?;
        VecDeque::remove(self, index).map(|old| (old, Some(index)))
    }
    fn retain(&mut self, f: impl FnMut(&E) -> bool) {
        VecDeque::retain(self, f)
    }
    fn clear(&mut self) {
        VecDeque::clear(self)
    }
}
impl<E: PartialEq> SeqDelegate<E> for VecDeque<E> {
    fn get(&self, index: usize) -> Option<&E> {
        VecDeque::get(self, index)
    }
    fn last_position(&self, value: &E) -> Option<usize> {
        VecDeque::iter(self).rposition(|x| x == value)
    }
    fn insert_at(&mut self, index: usize, value: E) {
        VecDeque::insert(self, index, value)
    }
    fn insert_all_at(&mut self, index: usize, values: impl IntoIterator<Item = E>) -> usize {
        let mut tail = self.split_off(index);
        let len = VecDeque::len(self);
        self.extend(values);
        let count = VecDeque::len(self) - len;
        self.append(&mut tail);
        count
    }
    fn remove_at(&mut self, index: usize) -> E {
        VecDeque::remove(self, index).expect("index out of bounds")
    }
    fn replace_at(&mut self, index: usize, value: E) -> E {
        replace(&mut self[index], value)
    }
    fn move_item(&mut self, old_index: usize, new_index: usize) {
        move_in_slice(self.make_contiguous(), old_index, new_index)
    }
}

// The uniqueness check happens before the value is moved in, so a set reports the
// value that is about to be stored; the insertion itself cannot fail after that point.
impl<E: Hash + Eq, S: BuildHasher + Default> Delegate<E> for HashSet<E, S> {
    const ORDERED: bool = false;
    type Iter<'a>
        = hash_set::Iter<'a, E>
    where
        E: 'a,
        S: 'a;

    fn len(&self) -> usize {
        HashSet::len(self)
    }
    fn contains(&self, value: &E) -> bool {
        HashSet::contains(self, value)
    }
    fn iter(&self) -> Self::Iter<'_> {
        HashSet::iter(self)
    }
    fn position(&self, _value: &E) -> Option<usize> {
        None
    }
    fn insert_with(&mut self, value: E, on_inserted: impl FnOnce(&E, Option<usize>)) -> bool {
        if HashSet::contains(self, &value) {
            return false;
        }
        on_inserted(&value, None);
        HashSet::insert(self, value)
    }
    fn remove(&mut self, value: &E) -> Option<(E, Option<usize>)> {
        HashSet::take(self, value).map(|old| (old, None))
    }
    fn retain(&mut self, f: impl FnMut(&E) -> bool) {
        HashSet::retain(self, f)
    }
    fn clear(&mut self) {
        HashSet::clear(self)
    }
}
impl<E: Hash + Eq, S: BuildHasher + Default> SetDelegate<E> for HashSet<E, S> {}

impl<E: Ord> Delegate<E> for BTreeSet<E> {
    const ORDERED: bool = false;
    type Iter<'a>
        = btree_set::Iter<'a, E>
    where
        E: 'a;

    fn len(&self) -> usize {
        BTreeSet::len(self)
    }
    fn contains(&self, value: &E) -> bool {
        BTreeSet::contains(self, value)
    }
    fn iter(&self) -> Self::Iter<'_> {
        BTreeSet::iter(self)
    }
    fn position(&self, _value: &E) -> Option<usize> {
        None
    }
    fn insert_with(&mut self, value: E, on_inserted: impl FnOnce(&E, Option<usize>)) -> bool {
        if BTreeSet::contains(self, &value) {
            return false;
        }
        on_inserted(&value, None);
        BTreeSet::insert(self, value)
    }
    fn remove(&mut self, value: &E) -> Option<(E, Option<usize>)> {
        BTreeSet::take(self, value).map(|old| (old, None))
    }
    fn retain(&mut self, f: impl FnMut(&E) -> bool) {
        BTreeSet::retain(self, f)
    }
    fn clear(&mut self) {
        BTreeSet::clear(self)
    }
}
impl<E: Ord> SetDelegate<E> for BTreeSet<E> {}
