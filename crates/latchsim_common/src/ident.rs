//! Interned signal names.
//!
//! Every signal in a circuit (inputs, latch outputs, update targets) is named
//! by an [`Ident`]. Comparing and hashing an `Ident` never touches the string,
//! which keeps the per-cycle signal store cheap to read and write.

use std::fmt;

use lasso::ThreadedRodeo;
use serde::{Deserialize, Serialize};

/// An interned signal name.
///
/// A `u32` index into an [`Interner`]. Two idents from the same interner are
/// equal exactly when their names are equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct Ident(u32);

impl Ident {
    /// Creates an `Ident` from a raw index.
    ///
    /// Intended for tests and deserialization; names should normally come
    /// from [`Interner::get_or_intern`].
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index of this ident.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

// SAFETY: `try_from_usize` rejects any index that does not fit in a `u32`,
// and `into_usize` widens losslessly on every supported platform.
unsafe impl lasso::Key for Ident {
    fn into_usize(self) -> usize {
        self.0 as usize
    }

    fn try_from_usize(int: usize) -> Option<Self> {
        u32::try_from(int).ok().map(Ident)
    }
}

/// Signal name table backed by [`lasso::ThreadedRodeo`].
///
/// A circuit and the signal store of its run share one interner (behind an
/// `Arc`) so that errors raised deep inside evaluation can still name the
/// offending signal.
pub struct Interner {
    rodeo: ThreadedRodeo<Ident>,
}

impl Interner {
    /// Creates an empty interner.
    pub fn new() -> Self {
        Self {
            rodeo: ThreadedRodeo::new(),
        }
    }

    /// Interns a signal name, returning the existing ident if it was seen before.
    pub fn get_or_intern(&self, name: &str) -> Ident {
        self.rodeo.get_or_intern(name)
    }

    /// Looks up a name without interning it.
    pub fn get(&self, name: &str) -> Option<Ident> {
        self.rodeo.get(name)
    }

    /// Resolves an ident back to its signal name.
    ///
    /// # Panics
    ///
    /// Panics if the ident was not created by this interner.
    pub fn resolve(&self, ident: Ident) -> &str {
        self.rodeo.resolve(&ident)
    }

    /// Number of distinct names interned so far.
    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    /// Returns `true` if no name has been interned.
    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl fmt::Debug for Interner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interner").field("len", &self.len()).finish()
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}
