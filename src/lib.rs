//! qrstyler - styled QR code images.
//!
//! A URL is encoded by a [`ports::QrMatrixProvider`], laid out by one of the
//! [`designs::Design`] strategies on a [`canvas::Canvas`], decorated with text
//! using fonts from [`fonts::FontResolver`], and written out by
//! [`generator::generate`].

pub mod adapters;
pub mod canvas;
pub mod cli;
pub mod config;
pub mod context;
pub mod designs;
pub mod error;
pub mod fonts;
pub mod generator;
pub mod logging;
pub mod output;
pub mod ports;
pub mod request;
pub mod text;

pub use error::GenerateError;
pub use generator::generate;
pub use request::GenerationRequest;
