//! Adapter implementations for port traits.
//!
//! - `qrcode_provider`: QR matrices from the `qrcode` crate

pub mod qrcode_provider;

pub use qrcode_provider::QrcodeProvider;
