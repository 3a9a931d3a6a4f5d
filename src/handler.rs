use std::{any::Any, sync::Arc};

use derive_ex::{derive_ex, Ex};
use parking_lot::Mutex;
use parse_display::Display;
use serde::{Deserialize, Serialize};
use slabmap::SlabMap;
use tracing::debug;

use crate::{CollectionError, Subscription};

#[cfg(test)]
mod tests;

/// Priority given to listeners added without one.
pub const DEFAULT_PRIORITY: i32 = -1;

/// An event whose delivery can be stopped by a listener.
pub trait Propagation {
    fn is_propagated(&self) -> bool;
    fn stop_propagation(&mut self);
}

/// A general purpose event with a free-form kind.
#[derive(Clone, Debug, Display, PartialEq, Eq, Serialize, Deserialize, Ex)]
#[derive_ex(Default)]
#[default(Self::new(""))]
#[display("{kind}")]
pub struct EventParam {
    kind: String,
    propagated: bool,
}

impl EventParam {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            propagated: true,
        }
    }
    pub fn kind(&self) -> &str {
        &self.kind
    }
}
impl Propagation for EventParam {
    fn is_propagated(&self) -> bool {
        self.propagated
    }
    fn stop_propagation(&mut self) {
        self.propagated = false;
    }
}

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
#[display("{0}")]
pub struct ListenerKey(usize);

type HandlerFn<T> = dyn FnMut(Option<&dyn Any>, &mut T) + Send;

struct Entry<T> {
    listener: Arc<Mutex<Box<HandlerFn<T>>>>,
    priority: i32,
    order: u64,
}

struct Registry<T> {
    entries: SlabMap<Entry<T>>,
    next_order: u64,
    by_priority: Vec<Arc<Mutex<Box<HandlerFn<T>>>>>,
}

impl<T> Registry<T> {
    fn new() -> Self {
        Self {
            entries: SlabMap::new(),
            next_order: 0,
            by_priority: Vec::new(),
        }
    }
    fn insert(&mut self, listener: Box<HandlerFn<T>>, priority: i32) -> ListenerKey {
        let order = self.next_order;
        self.next_order += 1;
        let key = self.entries.insert(Entry {
            listener: Arc::new(Mutex::new(listener)),
            priority,
            order,
        });
        self.update();
        debug!(key, priority, "listener added");
        ListenerKey(key)
    }
    fn remove(&mut self, key: ListenerKey) -> bool {
        if self.entries.remove(key.0).is_none() {
            return false;
        }
        self.update();
        debug!(key = key.0, "listener removed");
        true
    }
    fn set_priority(&mut self, key: ListenerKey, priority: i32) -> Result<(), CollectionError> {
        let entry = self
            .entries
            .get_mut(key.0)
            .ok_or(CollectionError::UnknownListener)?;
        entry.priority = priority;
        self.update();
        Ok(())
    }

    // Higher priority first, registration order among equals.
    fn update(&mut self) {
        let mut entries: Vec<&Entry<T>> = self.entries.iter().map(|(_, e)| e).collect();
        entries.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.order.cmp(&b.order)));
        self.by_priority = entries.into_iter().map(|e| e.listener.clone()).collect();
    }
}

/// Dispatches events to listeners ordered by priority.
///
/// Clones share the same listeners. Registration is synchronized, so a handler can be
/// shared between threads. Listeners run on the thread that raises the event, outside
/// of the registry lock: a listener may add or remove listeners, and the change applies
/// from the next raise.
#[derive_ex(Clone, bound())]
pub struct EventHandler<T: 'static>(Arc<Mutex<Registry<T>>>);

impl<T: Propagation + 'static> EventHandler<T> {
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(Registry::new())))
    }

    pub fn add(
        &self,
        listener: impl FnMut(Option<&dyn Any>, &mut T) + Send + 'static,
    ) -> ListenerKey {
        self.add_with_priority(listener, DEFAULT_PRIORITY)
    }

    /// Adds a listener. Listeners with a higher priority are called sooner.
    pub fn add_with_priority(
        &self,
        listener: impl FnMut(Option<&dyn Any>, &mut T) + Send + 'static,
        priority: i32,
    ) -> ListenerKey {
        self.0.lock().insert(Box::new(listener), priority)
    }

    /// Adds a listener that is removed when the returned [`Subscription`] is dropped.
    pub fn subscribe(
        &self,
        listener: impl FnMut(Option<&dyn Any>, &mut T) + Send + 'static,
    ) -> Subscription {
        let key = self.add(listener);
        Subscription::from_weak_fn(Arc::downgrade(&self.0), move |registry| {
            registry.lock().remove(key);
        })
    }

    /// Changes the priority of a listener that has already been added.
    pub fn set_priority(&self, key: ListenerKey, priority: i32) -> Result<(), CollectionError> {
        self.0.lock().set_priority(key, priority)
    }

    pub fn contains(&self, key: ListenerKey) -> bool {
        self.0.lock().entries.get(key.0).is_some()
    }
    pub fn remove(&self, key: ListenerKey) -> bool {
        self.0.lock().remove(key)
    }
    pub fn len(&self) -> usize {
        self.0.lock().entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raises an event without a sender.
    ///
    /// Returns `true` if no listener stopped the propagation.
    pub fn raise(&self, event: &mut T) -> bool {
        self.raise_from(None, event)
    }

    /// Raises an event on behalf of `sender`.
    ///
    /// Returns `true` if no listener stopped the propagation.
    pub fn raise_from(&self, sender: Option<&dyn Any>, event: &mut T) -> bool {
        let listeners = self.0.lock().by_priority.clone();
        for listener in listeners {
            if !event.is_propagated() {
                break;
            }
            let mut listener = listener.lock();
            (*listener)(sender, event);
        }
        event.is_propagated()
    }
}

impl<T: Propagation + 'static> Default for EventHandler<T> {
    fn default() -> Self {
        Self::new()
    }
}
