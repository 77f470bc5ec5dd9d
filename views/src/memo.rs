use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;
use tracing::trace;

/// How a memo decides its inputs did not change.
///
/// `Arc` inputs compare by pointer: a slice that was not replaced in the new
/// snapshot is the same allocation. Scalars compare by value.
pub trait MemoKey: Clone {
    fn same(&self, other: &Self) -> bool;
}

impl<T: ?Sized> MemoKey for Arc<T> {
    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

macro_rules! value_key {
    ($($t:ty),* $(,)?) => {
        $(
            impl MemoKey for $t {
                fn same(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

value_key!(bool, u64, i64, usize, String, &'static str);

impl<T: MemoKey> MemoKey for Option<T> {
    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl MemoKey for () {
    fn same(&self, _other: &Self) -> bool {
        true
    }
}

macro_rules! tuple_key {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: MemoKey),+> MemoKey for ($($name,)+) {
            fn same(&self, other: &Self) -> bool {
                $(self.$idx.same(&other.$idx))&&+
            }
        }
    };
}

tuple_key!(A 0);
tuple_key!(A 0, B 1);
tuple_key!(A 0, B 1, C 2);
tuple_key!(A 0, B 1, C 2, D 3);
tuple_key!(A 0, B 1, C 2, D 3, E 4);
tuple_key!(A 0, B 1, C 2, D 3, E 4, F 5);

/// Single-slot memoization cell.
///
/// Holds the last input key and the value computed from it. A call with a key
/// that is [`MemoKey::same`] as the stored one returns the stored `Arc`
/// without running the computation.
pub struct Memo<K, V> {
    name: &'static str,
    slot: Mutex<Option<(K, Arc<V>)>>,
    recomputations: AtomicUsize,
}

impl<K: MemoKey, V> Memo<K, V> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: Mutex::new(None),
            recomputations: AtomicUsize::new(0),
        }
    }

    pub fn get(&self, key: K, compute: impl FnOnce(&K) -> V) -> Arc<V> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((last, value)) = slot.as_ref()
            && last.same(&key)
        {
            return Arc::clone(value);
        }

        let value = Arc::new(compute(&key));
        self.bump();
        *slot = Some((key, Arc::clone(&value)));
        value
    }

    /// Like [`Memo::get`], but when a recomputation yields a value equal to
    /// the cached one the cached `Arc` is kept. Callers holding the old
    /// result see no change.
    pub fn get_ids(&self, key: K, compute: impl FnOnce(&K) -> V) -> Arc<V>
    where
        V: PartialEq,
    {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((last, value)) = slot.as_ref()
            && last.same(&key)
        {
            return Arc::clone(value);
        }

        let fresh = compute(&key);
        self.bump();
        let value = match slot.take() {
            Some((_, previous)) if *previous == fresh => previous,
            _ => Arc::new(fresh),
        };
        *slot = Some((key, Arc::clone(&value)));
        value
    }

    /// Number of times the computation has run.
    pub fn recomputations(&self) -> usize {
        self.recomputations.load(Ordering::Relaxed)
    }

    fn bump(&self) {
        let n = self.recomputations.fetch_add(1, Ordering::Relaxed) + 1;
        trace!(selector = self.name, recomputations = n, "selector recomputed");
    }
}

/// One [`Memo`] per parameter value, created on first use.
///
/// Entries are never evicted; the parameter space (channels, teams, groups
/// seen in a session) is small.
pub struct KeyedMemo<P, K, V> {
    name: &'static str,
    cells: DashMap<P, Arc<Memo<K, V>>>,
}

impl<P: Eq + Hash + Clone, K: MemoKey, V> KeyedMemo<P, K, V> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            cells: DashMap::new(),
        }
    }

    /// The cell for `param`. The map guard is released before the caller
    /// computes, so a computation may consult other keyed memos freely.
    pub fn cell(&self, param: &P) -> Arc<Memo<K, V>> {
        if let Some(cell) = self.cells.get(param) {
            return Arc::clone(cell.value());
        }
        let cell = self
            .cells
            .entry(param.clone())
            .or_insert_with(|| Arc::new(Memo::new(self.name)));
        Arc::clone(cell.value())
    }

    pub fn get(&self, param: &P, key: K, compute: impl FnOnce(&K) -> V) -> Arc<V> {
        self.cell(param).get(key, compute)
    }

    pub fn get_ids(&self, param: &P, key: K, compute: impl FnOnce(&K) -> V) -> Arc<V>
    where
        V: PartialEq,
    {
        self.cell(param).get_ids(key, compute)
    }

    /// Number of parameter values seen so far.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
