use std::{
    any::Any,
    mem::take,
    sync::{Arc, Weak},
};


/// Detaches a listener when dropped.
#[derive(Default)]
#[must_use]
pub struct Subscription(RawSubscription);

impl Subscription {
    pub fn empty() -> Self {
        Subscription(RawSubscription::Empty)
    }
    pub fn from_fn(f: impl FnOnce() + Send + 'static) -> Self {
        Subscription(RawSubscription::Fn(Box::new(f)))
    }
    pub fn from_weak_fn<T: Send + Sync + 'static>(
        this: Weak<T>,
        unsubscribe: impl Fn(Arc<T>) + Copy + Send + Sync + 'static,
    ) -> Self {
        Subscription(RawSubscription::WeakFn {
            this,
            unsubscribe: Box::new(move |this| {
                if let Some(this) = this.upgrade() {
                    if let Ok(this) = this.downcast() {
                        unsubscribe(this)
                    }
                }
            }),
        })
    }

    /// Keeps the listener attached for the rest of its owner's lifetime.
    pub fn detach(mut self) {
        self.0 = RawSubscription::Empty;
    }
}
impl Drop for Subscription {
    fn drop(&mut self) {
        match take(&mut self.0) {
            RawSubscription::Empty => {}
            RawSubscription::Fn(f) => f(),
            RawSubscription::WeakFn { this, unsubscribe } => unsubscribe(this),
        }
    }
}

#[derive(Default)]
enum RawSubscription {
    #[default]
    Empty,
    Fn(Box<dyn FnOnce() + Send + 'static>),
    WeakFn {
        this: Weak<dyn Any + Send + Sync>,
        unsubscribe: Box<dyn Fn(Weak<dyn Any + Send + Sync>) + Send + Sync>,
    },
}
