use std::collections::{BTreeSet, HashSet};

use crate::{ActionCategory, ChangeEvent, Delegate, ObservableCollection};


/// Second subscriber of an observable collection, called after the change listener.
pub trait ParentHook<E> {
    fn on_event(&mut self, event: &ChangeEvent<'_, E>);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoParent;

impl<E> ParentHook<E> for NoParent {
    fn on_event(&mut self, _event: &ChangeEvent<'_, E>) {}
}

/// Keeps the back-reference of each element to the owner of the collection.
///
/// Added elements are told `Some(owner)`, removed elements are told `None`.
/// Index updates do not touch the back-reference.
pub struct ParentLink<P, E> {
    owner: P,
    on_parent_change: Option<Box<dyn FnMut(Option<&P>, &E)>>,
}

impl<P, E> ParentLink<P, E> {
    pub fn new(owner: P) -> Self {
        Self {
            owner,
            on_parent_change: None,
        }
    }
    pub fn with_listener(owner: P, on_parent_change: impl FnMut(Option<&P>, &E) + 'static) -> Self {
        Self {
            owner,
            on_parent_change: Some(Box::new(on_parent_change)),
        }
    }
    pub fn owner(&self) -> &P {
        &self.owner
    }
}

impl<P, E> ParentHook<E> for ParentLink<P, E> {
    fn on_event(&mut self, event: &ChangeEvent<'_, E>) {
        let Some(f) = &mut self.on_parent_change else {
            return;
        };
        match event.category() {
            ActionCategory::Add => f(Some(&self.owner), event.element()),
            ActionCategory::Remove => f(None, event.element()),
            ActionCategory::Update => {}
        }
    }
}

pub type ObservableParentList<P, E> = ObservableCollection<E, Vec<E>, ParentLink<P, E>>;
pub type ObservableParentSet<P, E> = ObservableCollection<E, HashSet<E>, ParentLink<P, E>>;
pub type ObservableParentTreeSet<P, E> = ObservableCollection<E, BTreeSet<E>, ParentLink<P, E>>;

impl<P, E, D: Delegate<E>> ObservableCollection<E, D, ParentLink<P, E>> {
    /// Creates an empty collection whose elements are linked to `owner`.
    pub fn with_parent(owner: P, on_parent_change: impl FnMut(Option<&P>, &E) + 'static) -> Self {
        Self::from_parts(
            D::default(),
            ParentLink::with_listener(owner, on_parent_change),
        )
    }
    pub fn with_owner(owner: P) -> Self {
        Self::from_parts(D::default(), ParentLink::new(owner))
    }

    pub fn parent(&self) -> &P {
        self.notifier.hook.owner()
    }
    pub fn set_parent_listener(&mut self, on_parent_change: impl FnMut(Option<&P>, &E) + 'static) {
        self.notifier.hook.on_parent_change = Some(Box::new(on_parent_change));
    }
}
