use fnv::FnvHasher;
use rand::{self, SeedableRng, XorShiftRng};
use std::{
    collections::{HashMap, HashSet},
    hash::{BuildHasherDefault, Hash}
};

pub type FnvHashSet<T> = HashSet<T, BuildHasherDefault<FnvHasher>>;
pub type FnvHashMap<K, V> = HashMap<K, V, BuildHasherDefault<FnvHasher>>;

/// Construct a hash set with the specified capacity.
/// FNV is much faster than the default SipHash on small keys like cell positions, and its
/// iteration order only depends on the insertion history, never on a per-process random key.
pub fn fnv_hashset<T: Hash + Eq>(capacity: usize) -> FnvHashSet<T> {
    HashSet::with_capacity_and_hasher(capacity, BuildHasherDefault::<FnvHasher>::default())
}

/// Construct a hash map with the specified capacity. See `fnv_hashset`.
pub fn fnv_hashmap<K: Hash + Eq, V>(capacity: usize) -> FnvHashMap<K, V> {
    HashMap::with_capacity_and_hasher(capacity, BuildHasherDefault::<FnvHasher>::default())
}

/// Expand a 64 bit seed into xorshift state words.
///
/// An all zero xorshift state never leaves zero and `from_seed` panics on it, so the upper two
/// words are mixed with fixed odd constants.
pub fn seed_words(seed: u64) -> [u32; 4] {
    let lo = seed as u32;
    let hi = (seed >> 32) as u32;
    [lo, hi, lo ^ 0x9E37_79B9, hi ^ 0x7F4A_7C15]
}

/// A reproducible random source.
pub fn seeded_rng(seed: u64) -> XorShiftRng {
    XorShiftRng::from_seed(seed_words(seed))
}

/// A random source seeded from the thread local generator.
pub fn entropy_rng() -> XorShiftRng {
    rand::weak_rng()
}
