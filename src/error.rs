/// Errors reported by [`HashMap`](crate::HashMap) lookups.
///
/// Every other operation treats a missing key as a legal outcome (`remove`
/// is a no-op, `get` returns `None`), so this is only produced by
/// [`HashMap::at`](crate::HashMap::at).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Error {
    /// The requested key is not present in the map.
    #[error("key not found in map")]
    KeyNotFound,
}
