//! QR matrix adapter backed by the `qrcode` crate.

use qrcode::{Color, QrCode};

use crate::error::GenerateError;
use crate::ports::qr_matrix::{EcLevel, QrMatrix, QrMatrixProvider};

/// Encodes payloads with `qrcode`, letting it pick the smallest fitting version.
#[derive(Debug, Default, Clone, Copy)]
pub struct QrcodeProvider;

impl QrMatrixProvider for QrcodeProvider {
    fn encode(&self, payload: &str, level: EcLevel) -> Result<QrMatrix, GenerateError> {
        let level = match level {
            EcLevel::L => qrcode::EcLevel::L,
            EcLevel::M => qrcode::EcLevel::M,
            EcLevel::Q => qrcode::EcLevel::Q,
            EcLevel::H => qrcode::EcLevel::H,
        };
        let code = QrCode::with_error_correction_level(payload.as_bytes(), level)
            .map_err(|e| GenerateError::Encode(e.to_string()))?;
        let modules = code.to_colors().into_iter().map(|c| c == Color::Dark).collect();
        QrMatrix::new(code.width(), modules)
    }
}
