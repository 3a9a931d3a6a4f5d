use std::{
    fmt::{self, Debug},
    ops::Deref,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{ActionKind, ChangeEvent, Delegate, NoParent, ParentHook};


pub(crate) type Listener<E> = Box<dyn FnMut(&ChangeEvent<'_, E>)>;

/// A collection that forwards every mutation to a delegate and reports each changed element.
///
/// At most one listener is installed at a time. Events are dispatched synchronously,
/// one per element, after the delegate accepted the mutation. The parent hook `H`
/// sees every event after the listener.
pub struct ObservableCollection<E, D = Vec<E>, H = NoParent> {
    pub(crate) delegate: D,
    pub(crate) notifier: Notifier<E, H>,
}

pub(crate) struct Notifier<E, H> {
    listener: Option<Listener<E>>,
    pub(crate) hook: H,
}

impl<E, H: ParentHook<E>> Notifier<E, H> {
    fn new(hook: H) -> Self {
        Self {
            listener: None,
            hook,
        }
    }
    pub(crate) fn emit(&mut self, action: ActionKind, element: &E, index: Option<usize>) {
        trace!(%action, ?index, "collection change");
        let event = ChangeEvent::new(action, element, index);
        if let Some(listener) = &mut self.listener {
            listener(&event);
        }
        self.hook.on_event(&event);
    }
}

fn indexed<'a, E: 'a, D: Delegate<E> + 'a>(
    delegate: &'a D,
) -> impl Iterator<Item = (Option<usize>, &'a E)> + 'a {
    use iter_n::iter2::*;
    if D::ORDERED {
        delegate
            .iter()
            .enumerate()
            .map(|(index, e)| (Some(index), e))
            .into_iter0()
    } else {
        delegate.iter().map(|e| (None, e)).into_iter1()
    }
}

impl<E, D: Delegate<E>> ObservableCollection<E, D> {
    pub fn new() -> Self {
        Self::from_collection(D::default())
    }
    /// Creates an empty collection with `listener` installed.
    ///
    /// For `Option` elements, wrap the listener with [`skip_none`](crate::skip_none)
    /// so that it never sees a `None` element.
    pub fn with_listener(listener: impl FnMut(&ChangeEvent<'_, E>) + 'static) -> Self {
        let mut this = Self::new();
        this.set_listener(listener);
        this
    }
    /// Wraps an existing delegate. No events are emitted for its current elements.
    pub fn from_collection(delegate: D) -> Self {
        Self::from_parts(delegate, NoParent)
    }
}

impl<E, D: Delegate<E>, H: ParentHook<E>> ObservableCollection<E, D, H> {
    pub(crate) fn from_parts(delegate: D, hook: H) -> Self {
        Self {
            delegate,
            notifier: Notifier::new(hook),
        }
    }

    /// Replaces the change listener. See [`with_listener`](ObservableCollection::with_listener)
    /// for `Option` elements.
    pub fn set_listener(&mut self, listener: impl FnMut(&ChangeEvent<'_, E>) + 'static) {
        self.notifier.listener = Some(Box::new(listener));
    }
    pub fn clear_listener(&mut self) {
        self.notifier.listener = None;
    }
    pub fn has_listener(&self) -> bool {
        self.notifier.listener.is_some()
    }

    pub fn collection(&self) -> &D {
        &self.delegate
    }
    pub fn into_collection(self) -> D {
        self.delegate
    }

    /// Replaces the delegate without emitting events and returns the previous one.
    ///
    /// `None` installs an empty default delegate.
    pub fn set_collection(&mut self, delegate: Option<D>) -> D {
        debug!(
            old_len = self.delegate.len(),
            new_len = delegate.as_ref().map_or(0, |d| d.len()),
            "replace delegate"
        );
        std::mem::replace(&mut self.delegate, delegate.unwrap_or_default())
    }

    pub fn len(&self) -> usize {
        self.delegate.len()
    }
    pub fn is_empty(&self) -> bool {
        self.delegate.is_empty()
    }
    pub fn contains(&self, value: &E) -> bool {
        self.delegate.contains(value)
    }
    pub fn contains_all<'a>(&self, values: impl IntoIterator<Item = &'a E>) -> bool
    where
        E: 'a,
    {
        values.into_iter().all(|value| self.delegate.contains(value))
    }
    pub fn iter(&self) -> D::Iter<'_> {
        self.delegate.iter()
    }

    /// Adds `value` and emits [`ActionKind::Add`].
    ///
    /// Returns `false` if the delegate rejected the value.
    pub fn add(&mut self, value: E) -> bool {
        let notifier = &mut self.notifier;
        self.delegate.insert_with(value, |element, index| {
            notifier.emit(ActionKind::Add, element, index)
        })
    }

    /// Removes one element equal to `value` and emits [`ActionKind::Remove`] with its former index.
    ///
    /// For ordered storage, every element that shifted down then receives an [`ActionKind::Update`].
    pub fn remove(&mut self, value: &E) -> Option<E> {
        let (old, index) = self.delegate.remove(value)?;
        self.notifier.emit(ActionKind::Remove, &old, index);
        if let Some(index) = index {
            for (n, element) in indexed(&self.delegate).skip(index) {
                self.notifier.emit(ActionKind::Update, element, n);
            }
        }
        Some(old)
    }

    /// Adds every value, emitting one [`ActionKind::AddAll`] per inserted element.
    ///
    /// Returns `true` if at least one value was inserted.
    pub fn add_all(&mut self, values: impl IntoIterator<Item = E>) -> bool {
        let notifier = &mut self.notifier;
        let mut changed = false;
        for value in values {
            changed |= self.delegate.insert_with(value, |element, index| {
                notifier.emit(ActionKind::AddAll, element, index)
            });
        }
        changed
    }

    /// Removes every element equal to one of `values`.
    ///
    /// Events follow the order of `values`. Each stored occurrence of a value gets one
    /// [`ActionKind::RemoveAll`] with its pre-removal index, and all events are emitted
    /// before the elements are dropped from the delegate. Repeated values are reported once.
    pub fn remove_all(&mut self, values: &[E]) -> bool
    where
        E: PartialEq,
    {
        let mut removed = false;
        for (n, value) in values.iter().enumerate() {
            if values[..n].contains(value) {
                continue;
            }
            for (index, element) in indexed(&self.delegate) {
                if element == value {
                    self.notifier.emit(ActionKind::RemoveAll, element, index);
                    removed = true;
                }
            }
        }
        if removed {
            self.delegate.retain(|element| !values.contains(element));
        }
        removed
    }

    /// Keeps only the elements equal to one of `values`, emitting [`ActionKind::RemoveAll`]
    /// in storage order for each element that is dropped.
    pub fn retain_all(&mut self, values: &[E]) -> bool
    where
        E: PartialEq,
    {
        let mut removed = false;
        for (index, element) in indexed(&self.delegate) {
            if !values.contains(element) {
                self.notifier.emit(ActionKind::RemoveAll, element, index);
                removed = true;
            }
        }
        if removed {
            self.delegate.retain(|element| values.contains(element));
        }
        removed
    }

    /// Emits [`ActionKind::Clear`] for every element, then clears the delegate.
    pub fn clear(&mut self) {
        for (index, element) in indexed(&self.delegate) {
            self.notifier.emit(ActionKind::Clear, element, index);
        }
        self.delegate.clear();
    }
}

impl<E, D: Delegate<E>> Default for ObservableCollection<E, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, D, H> Deref for ObservableCollection<E, D, H> {
    type Target = D;

    fn deref(&self) -> &Self::Target {
        &self.delegate
    }
}

impl<E, D: Delegate<E>> FromIterator<E> for ObservableCollection<E, D> {
    fn from_iter<T: IntoIterator<Item = E>>(iter: T) -> Self {
        let mut delegate = D::default();
        for value in iter {
            delegate.insert_with(value, |_, _| {});
        }
        Self::from_collection(delegate)
    }
}

impl<E, D: Delegate<E>, H: ParentHook<E>> Extend<E> for ObservableCollection<E, D, H> {
    fn extend<T: IntoIterator<Item = E>>(&mut self, iter: T) {
        self.add_all(iter);
    }
}

impl<'a, E, D: Delegate<E>, H> IntoIterator for &'a ObservableCollection<E, D, H> {
    type Item = &'a E;
    type IntoIter = D::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.delegate.iter()
    }
}

impl<E: Debug, D: Delegate<E>, H> Debug for ObservableCollection<E, D, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.delegate.iter()).finish()
    }
}

impl<E, D: PartialEq, H> PartialEq for ObservableCollection<E, D, H> {
    fn eq(&self, other: &Self) -> bool {
        self.delegate == other.delegate
    }
}

impl<E: Serialize, D: Delegate<E>, H> Serialize for ObservableCollection<E, D, H> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.delegate.iter())
    }
}

impl<'de, E, D> Deserialize<'de> for ObservableCollection<E, D>
where
    D: Delegate<E> + Deserialize<'de>,
{
    fn deserialize<De>(deserializer: De) -> Result<Self, De::Error>
    where
        De: serde::Deserializer<'de>,
    {
        D::deserialize(deserializer).map(Self::from_collection)
    }
}
