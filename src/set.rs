use std::collections::{BTreeSet, HashSet};

use crate::{NoParent, ObservableCollection};


/// Observable collection over a hash set. A duplicate `add` returns `false` and emits nothing.
pub type ObservableSet<E, H = NoParent> = ObservableCollection<E, HashSet<E>, H>;

/// Observable collection over an ordered set. Events carry no index.
pub type ObservableTreeSet<E, H = NoParent> = ObservableCollection<E, BTreeSet<E>, H>;
