//! The contiguous array matrices retire into
//!
//! A frozen store backs every `Indexed` handle produced by the
//! serialization cycle that built it; positions from one store mean
//! nothing to another. The store grows densely during the assignment
//! pass and is read-shared afterwards, for as long as its owner keeps
//! it alive.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{Error, StoreError};
use crate::handle::MatrixHandle;
use crate::matrix::Matrix;
use crate::serialize::SerializeSession;

/// Contiguous, index-addressed matrix storage
#[derive(Debug, Default)]
pub struct MatrixStore {
    slots: Vec<Matrix>,
}

impl MatrixStore {
    /// Allocate backing space for the counted target
    pub fn with_capacity(target: usize) -> Self {
        log::debug!("matrix store sized for {target} entries");
        Self {
            slots: Vec::with_capacity(target),
        }
    }

    /// Copy a matrix into the slot a `serialize` call assigned
    ///
    /// Positions arrive densely in assignment order. Re-placing an
    /// already filled slot overwrites it; a position past the dense
    /// frontier is an error.
    pub fn place(&mut self, pos: usize, matrix: &Matrix) -> Result<(), StoreError> {
        use std::cmp::Ordering;

        match pos.cmp(&self.slots.len()) {
            Ordering::Less => {
                self.slots[pos] = *matrix;
                Ok(())
            },
            Ordering::Equal => {
                self.slots.push(*matrix);
                Ok(())
            },
            Ordering::Greater => Err(StoreError::PositionOutOfBounds {
                pos,
                len: self.slots.len(),
            }),
        }
    }

    /// The matrix at `pos`, if the store has grown that far
    pub fn get(&self, pos: usize) -> Option<&Matrix> {
        self.slots.get(pos)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Run one full serialization cycle over a working set
    ///
    /// Counts every matrix, sizes the store, assigns every position,
    /// and copies the values in, all in input order. Returns the
    /// frozen store together with one `Indexed` handle per input.
    /// This is the path a cache writer takes right before committing.
    pub fn compact(matrices: &[Matrix]) -> Result<(MatrixStore, Vec<MatrixHandle>), Error> {
        let mut session = SerializeSession::new();

        session.begin_count()?;
        for matrix in matrices {
            session.prepare(matrix)?;
        }

        let mut store = MatrixStore::with_capacity(session.counted());
        session.begin_assign()?;

        let mut handles = Vec::with_capacity(matrices.len());
        for matrix in matrices {
            let handle = session.serialize(matrix)?;
            if let MatrixHandle::Indexed(pos) = &handle {
                store.place(*pos, matrix)?;
            }
            handles.push(handle);
        }
        session.finish()?;

        log::debug!("compacted {} matrices into static storage", store.len());
        Ok((store, handles))
    }
}

/// A frozen store shared across readers
pub type SharedMatrixStore = Arc<RwLock<MatrixStore>>;
