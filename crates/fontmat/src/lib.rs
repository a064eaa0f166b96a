//! Fontmat - glyph transform matrices for font caches
//!
//! One matrix type, two storage backings:
//!
//! 1. **Heap** - every matrix starts life as its own allocation while
//!    patterns are built and matched
//! 2. **Static store** - a cache build compacts the working set into
//!    one contiguous, index-addressed array
//!
//! The [`MatrixHandle`] names both homes (plus the shared identity
//! constant), and the two-pass [`SerializeSession`] moves matrices
//! from the first into the second without invalidating anything a
//! caller holds mid-conversion.
//!
//! # Example
//!
//! ```
//! use fontmat::prelude::*;
//!
//! let mut m = Matrix::IDENTITY;
//! m.scale(2.0, 3.0);
//!
//! let (store, handles) = MatrixStore::compact(&[m])?;
//! assert_eq!(handles[0].resolve(&store), Some(&m));
//! # Ok::<(), Error>(())
//! ```

pub use fontmat_core::{error, handle, matrix, mem, serialize, store};

pub use fontmat_core::{
    Error, Matrix, MatrixHandle, MatrixStore, Phase, Result, SerializeError, SerializeSession,
    SharedMatrixStore, StoreError,
};

/// Common imports for typical usage
pub mod prelude {
    pub use fontmat_core::{
        error::{Error, Result, SerializeError, StoreError},
        mem::MemStats,
        serialize::{Phase, SerializeSession},
        Matrix, MatrixHandle, MatrixStore, SharedMatrixStore,
    };
}
