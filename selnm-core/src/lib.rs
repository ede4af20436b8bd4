//! # selnm core library
//!
//! Two small building blocks for numeric code:
//!
//! * [`IndexedList`]: an append-only list addressable by insertion position or
//!   by a unique string ID, with a plain-text table rendering.
//! * [`DenseMatrix`]: a fixed-shape, row-major dense matrix with checked and
//!   unchecked access, scalar/matrix arithmetic and tolerance-aware equality.
//!
//! Both types are single-threaded values; the library only reports failures
//! through [`SelnmError`] and leaves log output to the application.

// Declare modules
pub mod dense_matrix;
pub mod error;
pub mod indexed_list;
pub mod traits;

// Re-export public types
pub use dense_matrix::{equal, DenseMatrix};
pub use error::{Result, SelnmError};
pub use indexed_list::IndexedList;
pub use traits::{Matrix, Scalar};
