// this_file: crates/fontmat-core/src/handle.rs

//! One matrix, two homes
//!
//! A glyph matrix either lives on the heap as its own allocation or
//! sits at a fixed position inside a frozen [`MatrixStore`]. The
//! handle names both cases, plus the shared identity constant, so
//! pattern-matching code can pass matrices around without caring where
//! they live. Only `Owned` handles ever touch the allocator; dropping
//! an `Indexed` or `Identity` handle is a no-op because the store and
//! the constant outlive every handle that points at them.

use crate::matrix::Matrix;
use crate::mem;
use crate::store::MatrixStore;

/// Where a matrix lives
#[derive(Debug, PartialEq)]
pub enum MatrixHandle {
    /// Exclusively owns its heap allocation; freed on drop
    Owned(Box<Matrix>),
    /// A position inside an externally owned [`MatrixStore`]
    ///
    /// The position is meaningless outside the store that assigned it,
    /// and keeping it in range is that store owner's contract.
    Indexed(usize),
    /// The process-wide identity constant; never allocated, never freed
    Identity,
}

impl MatrixHandle {
    /// Move a finished matrix onto the heap and take ownership of it
    pub fn owned(matrix: Matrix) -> Self {
        mem::note_alloc();
        MatrixHandle::Owned(Box::new(matrix))
    }

    /// Handle to the shared identity constant
    pub fn identity() -> Self {
        MatrixHandle::Identity
    }

    /// Non-owning handle to a store position
    pub fn indexed(pos: usize) -> Self {
        MatrixHandle::Indexed(pos)
    }

    /// Dereference against the store that backs `Indexed` handles
    ///
    /// `Owned` and `Identity` handles ignore the store. An out-of-range
    /// position yields `None` rather than panicking.
    pub fn resolve<'a>(&'a self, store: &'a MatrixStore) -> Option<&'a Matrix> {
        match self {
            MatrixHandle::Owned(matrix) => Some(matrix),
            MatrixHandle::Indexed(pos) => store.get(*pos),
            MatrixHandle::Identity => Some(&Matrix::IDENTITY),
        }
    }

    /// Dereference without a store
    ///
    /// `Indexed` handles have no local value, so callers that never
    /// froze a store can still read everything they own.
    pub fn local(&self) -> Option<&Matrix> {
        match self {
            MatrixHandle::Owned(matrix) => Some(matrix),
            MatrixHandle::Indexed(_) => None,
            MatrixHandle::Identity => Some(&Matrix::IDENTITY),
        }
    }

    /// Fresh heap copy of whatever this handle points at
    ///
    /// The copy is always `Owned`, even when duplicating the identity
    /// or a store entry. A handle that does not resolve produces no
    /// copy.
    pub fn duplicate(&self, store: &MatrixStore) -> Option<MatrixHandle> {
        let matrix = *self.resolve(store)?;
        log::trace!("duplicating {matrix:?} onto the heap");
        Some(MatrixHandle::owned(matrix))
    }

    /// Do two handles name the same transform?
    ///
    /// The same handle always agrees with itself. Otherwise both must
    /// resolve and compare field-equal; a resolvable handle never
    /// equals an unresolvable one, and two unresolvable handles count
    /// as equal (there is only one way to be absent).
    pub fn same_matrix(&self, other: &MatrixHandle, store: &MatrixStore) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        match (self.resolve(store), other.resolve(store)) {
            (Some(a), Some(b)) => a == b,
            (None, None) => true,
            _ => false,
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, MatrixHandle::Identity)
    }
}

impl Drop for MatrixHandle {
    fn drop(&mut self) {
        // Only Owned handles return memory. Identity in particular
        // must never reach the free path.
        if let MatrixHandle::Owned(_) = self {
            mem::note_free();
        }
    }
}
