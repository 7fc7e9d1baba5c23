use alloc::collections::TryReserveError;

/// The error returned by [`BstMap::try_put`] and [`BstMap::try_insert`] when a
/// new node cannot be allocated.
///
/// The rejected key and value travel inside the error so that nothing is lost;
/// recover them with [`TryInsertError::into_parts`]. The map is left exactly as
/// it was before the call.
///
/// [`BstMap::try_put`]: crate::BstMap::try_put
/// [`BstMap::try_insert`]: crate::BstMap::try_insert
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TryInsertError<K, V> {
    /// The allocator could not grow the node storage.
    #[error("failed to allocate a tree node")]
    AllocFailed {
        key: K,
        value: V,
        #[source]
        source: TryReserveError,
    },
    /// Every node handle is in use.
    #[error("tree is at maximum capacity ({max} nodes)")]
    CapacityExceeded { key: K, value: V, max: usize },
}

impl<K, V> TryInsertError<K, V> {
    /// Returns the key and value that could not be inserted.
    pub fn into_parts(self) -> (K, V) {
        match self {
            Self::AllocFailed { key, value, .. } | Self::CapacityExceeded { key, value, .. } => (key, value),
        }
    }

    /// The key that could not be inserted.
    pub const fn key(&self) -> &K {
        match self {
            Self::AllocFailed { key, .. } | Self::CapacityExceeded { key, .. } => key,
        }
    }
}
