use fxhash::{FxHashMap, FxHashSet};

/**
 * Hash map with a fast non-cryptographically secure hash function.
 */
pub type HashMap<K, V> = FxHashMap<K, V>;

/**
 * Hash set with a fast non-cryptographically secure hash function.
 */
pub type HashSet<V> = FxHashSet<V>;
