//! Process-global key interning.
//!
//! Every name used by a pushdown system — control states, stack symbols, and
//! the pair keys generated for product states and mid-states — is interned
//! once into a [`KeySpace`] and referred to by its [`Key`] afterwards. The
//! space guarantees `get_key(n) == get_key(n)` and
//! `get_key_pair(a, b) == get_key_pair(a, b)`, and that distinct sources map
//! to distinct keys.
//!
//! Keys are shared across all automata and pushdown systems in the process,
//! so the space lives behind a lock in a global and entries are never freed.

use std::sync::OnceLock;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::key::{Key, EPSILON};

/// What a key was interned from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum KeySource {
    /// A plain name.
    Name(SmolStr),
    /// A pair of previously interned keys.
    Pair(Key, Key),
}

/// Interner mapping names and key pairs to compact [`Key`]s.
///
/// Index 0 is always the reserved epsilon key, printed as `*`.
#[derive(Debug)]
pub struct KeySpace {
    sources: Vec<KeySource>,
    index: FxHashMap<KeySource, Key>,
}

impl KeySpace {
    pub fn new() -> Self {
        let epsilon = KeySource::Name(SmolStr::new_static("*"));
        let mut index = FxHashMap::default();
        index.insert(epsilon.clone(), EPSILON);
        Self {
            sources: vec![epsilon],
            index,
        }
    }

    /// Intern a name, returning the existing key if the name is known.
    pub fn get_key(&mut self, name: &str) -> Key {
        if let Some(&k) = self.index.get(&KeySource::Name(SmolStr::new(name))) {
            return k;
        }
        self.insert(KeySource::Name(SmolStr::new(name)))
    }

    /// Intern a pair of keys, used for product states and mid-states.
    pub fn get_key_pair(&mut self, a: Key, b: Key) -> Key {
        if let Some(&k) = self.index.get(&KeySource::Pair(a, b)) {
            return k;
        }
        self.insert(KeySource::Pair(a, b))
    }

    /// Render a key back to a readable name.
    ///
    /// Pair keys render as `(left,right)`. Unknown keys (never possible for
    /// keys produced by this space) render as `?<index>`.
    pub fn key_str(&self, key: Key) -> SmolStr {
        match self.sources.get(key.index()) {
            Some(KeySource::Name(s)) => s.clone(),
            Some(KeySource::Pair(a, b)) => {
                SmolStr::new(format!("({},{})", self.key_str(*a), self.key_str(*b)))
            }
            None => SmolStr::new(format!("?{}", key.index())),
        }
    }

    /// Number of interned keys, including epsilon.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        // Epsilon is always present.
        false
    }

    fn insert(&mut self, source: KeySource) -> Key {
        let key = Key(self.sources.len() as u32);
        self.sources.push(source.clone());
        self.index.insert(source, key);
        key
    }
}

impl Default for KeySpace {
    fn default() -> Self {
        Self::new()
    }
}

fn key_space() -> &'static RwLock<KeySpace> {
    static SPACE: OnceLock<RwLock<KeySpace>> = OnceLock::new();
    SPACE.get_or_init(|| RwLock::new(KeySpace::new()))
}

/// Intern `name` in the process-global key space.
pub fn get_key(name: &str) -> Key {
    key_space().write().get_key(name)
}

/// Intern the pair `(a, b)` in the process-global key space.
pub fn get_key_pair(a: Key, b: Key) -> Key {
    key_space().write().get_key_pair(a, b)
}

/// Readable name for `key` from the process-global key space.
pub fn key_str(key: Key) -> SmolStr {
    key_space().read().key_str(key)
}
