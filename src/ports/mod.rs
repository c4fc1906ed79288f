//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the compositing core and an
//! external capability. Implementations live in `src/adapters/`.

pub mod qr_matrix;

pub use qr_matrix::{EcLevel, QrMatrix, QrMatrixProvider};
