//! Fontmat Core: glyph matrices and where they live
//!
//! A font cache wants two things from a transform matrix: cheap 2x2
//! algebra while glyph patterns are being built, and a relocatable,
//! index-addressed resting place once the cache is written out. This
//! crate provides both halves and the protocol that moves matrices
//! from one to the other.
//!
//! ## The Pieces
//!
//! - [`Matrix`] - four scalars, exact equality, pre-multiplying
//!   rotate/scale/shear builders
//! - [`MatrixHandle`] - one name for a heap-owned matrix, a position
//!   in a frozen [`MatrixStore`], or the shared identity constant
//! - [`SerializeSession`] - the two-pass count-then-place cycle that
//!   turns a heap population into contiguous storage
//! - [`MatrixStore`] - the contiguous array `Indexed` handles point
//!   into
//! - [`mem`] - observational allocation counters for heap matrices
//!
//! ## From Heap to Store
//!
//! ```
//! use fontmat_core::{Matrix, MatrixStore};
//!
//! let mut m = Matrix::IDENTITY;
//! m.scale(2.0, 3.0);
//! m.rotate(0.0, 1.0); // quarter turn
//!
//! let (store, handles) = MatrixStore::compact(&[m])?;
//! assert_eq!(
//!     handles[0].resolve(&store),
//!     Some(&Matrix::new(0.0, -3.0, 2.0, 0.0))
//! );
//! # Ok::<(), fontmat_core::Error>(())
//! ```
//!
//! Driving the passes by hand (what [`MatrixStore::compact`] does
//! internally) lets the store owner interleave its own bookkeeping:
//! open the counting pass, `prepare` every candidate, size the store
//! to `counted()`, open the assignment pass, `serialize` each matrix
//! for its position and copy the fields into the slot, then `finish`.
//! Out-of-order calls come back as [`SerializeError::PhaseMismatch`];
//! serializing more matrices than were counted comes back as
//! [`SerializeError::StorageExhausted`], and the caller keeps its heap
//! copy.

pub mod error;
pub mod handle;
pub mod matrix;
pub mod mem;
pub mod serialize;
pub mod store;

pub use error::{Error, Result, SerializeError, StoreError};
pub use handle::MatrixHandle;
pub use matrix::Matrix;
pub use serialize::{Phase, SerializeSession};
pub use store::{MatrixStore, SharedMatrixStore};
