use std::fmt::{self, Display};

use derive_ex::derive_ex;
use parse_display::Display;
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// Fine-grained kind of a collection change.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Add,
    AddAll,
    Remove,
    RemoveAll,
    Clear,
    SetInsert,
    SetRemoved,
    Update,
}

impl ActionKind {
    pub const fn category(self) -> ActionCategory {
        match self {
            Self::Add | Self::AddAll | Self::SetInsert => ActionCategory::Add,
            Self::Remove | Self::RemoveAll | Self::Clear | Self::SetRemoved => {
                ActionCategory::Remove
            }
            Self::Update => ActionCategory::Update,
        }
    }
    pub const fn is_add(self) -> bool {
        matches!(self.category(), ActionCategory::Add)
    }
    pub const fn is_remove(self) -> bool {
        matches!(self.category(), ActionCategory::Remove)
    }
    pub const fn is_update(self) -> bool {
        matches!(self.category(), ActionCategory::Update)
    }
}

/// Coarse direction of a change, for subscribers that do not care which operation caused it.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionCategory {
    Add,
    Remove,
    Update,
}

/// A single element-level change of an observable collection.
///
/// `index` is only present when the underlying collection is order-addressable.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[derive_ex(Clone, Copy, bound())]
pub struct ChangeEvent<'a, E> {
    action: ActionKind,
    element: &'a E,
    index: Option<usize>,
}

impl<'a, E> ChangeEvent<'a, E> {
    pub fn new(action: ActionKind, element: &'a E, index: Option<usize>) -> Self {
        Self {
            action,
            element,
            index,
        }
    }
    pub fn action(&self) -> ActionKind {
        self.action
    }
    pub fn category(&self) -> ActionCategory {
        self.action.category()
    }
    pub fn element(&self) -> &'a E {
        self.element
    }
    pub fn index(&self) -> Option<usize> {
        self.index
    }
}

impl<'a, T> ChangeEvent<'a, Option<T>> {
    /// Returns `None` if the element is `None`.
    pub fn transpose(self) -> Option<ChangeEvent<'a, T>> {
        Some(ChangeEvent {
            action: self.action,
            element: self.element.as_ref()?,
            index: self.index,
        })
    }
}

impl<E: Display> Display for ChangeEvent<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}@{}({})", self.action, index, self.element),
            None => write!(f, "{}({})", self.action, self.element),
        }
    }
}

/// Adapts a listener so that it is never called for a `None` element.
pub fn skip_none<T>(
    mut listener: impl FnMut(&ChangeEvent<'_, T>),
) -> impl FnMut(&ChangeEvent<'_, Option<T>>) {
    move |event| {
        if let Some(event) = event.transpose() {
            listener(&event)
        }
    }
}
