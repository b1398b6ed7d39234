//! Interned concrete class names.

use rustc_hash::FxHashMap;

/// Interned front-end class name (`"PointerType"`, `"CallExpr"`, ...).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ClassName(u32);

/// Append-only interner for [`ClassName`]s.
#[derive(Clone, Debug, Default)]
pub struct ClassNames {
    map: FxHashMap<Box<str>, ClassName>,
    names: Vec<Box<str>>,
}

impl ClassNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, name: &str) -> ClassName {
        if let Some(&existing) = self.map.get(name) {
            return existing;
        }
        let index = u32::try_from(self.names.len())
            .unwrap_or_else(|_| panic!("class name table exceeded u32::MAX entries"));
        let interned = ClassName(index);
        self.names.push(name.into());
        self.map.insert(name.into(), interned);
        interned
    }

    /// Resolve an interned name.
    ///
    /// # Panics
    /// Panics if `name` came from a different table.
    pub fn lookup(&self, name: ClassName) -> &str {
        &self.names[name.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
