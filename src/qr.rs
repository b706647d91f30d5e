use image::{ImageFormat, Rgba, RgbaImage};
use qrcode::QrCode;
use std::io::Cursor;
use thiserror::Error;

pub const MIN_SIZE_PX: u32 = 150;
pub const MAX_SIZE_PX: u32 = 500;
pub const SIZE_STEP_PX: u32 = 50;
pub const DEFAULT_SIZE_PX: u32 = 300;

const QUIET_ZONE_MODULES: usize = 2;
// Emerald modules on the gray-800 panel color.
const DARK: [u8; 4] = [0x10, 0xB9, 0x81, 0xFF];
const LIGHT: [u8; 4] = [0x1F, 0x29, 0x37, 0xFF];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorCorrection {
    Low,
    #[default]
    Medium,
    Quartile,
    High,
}

impl ErrorCorrection {
    pub const ALL: [ErrorCorrection; 4] = [
        ErrorCorrection::Low,
        ErrorCorrection::Medium,
        ErrorCorrection::Quartile,
        ErrorCorrection::High,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ErrorCorrection::Low => "Low (7%)",
            ErrorCorrection::Medium => "Medium (15%)",
            ErrorCorrection::Quartile => "Quartile (25%)",
            ErrorCorrection::High => "High (30%)",
        }
    }

    fn to_ec_level(self) -> qrcode::EcLevel {
        match self {
            ErrorCorrection::Low => qrcode::EcLevel::L,
            ErrorCorrection::Medium => qrcode::EcLevel::M,
            ErrorCorrection::Quartile => qrcode::EcLevel::Q,
            ErrorCorrection::High => qrcode::EcLevel::H,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrRequest {
    pub text: String,
    pub level: ErrorCorrection,
    pub size_px: u32,
}

#[derive(Debug, Clone)]
pub struct QrImage {
    pub side_px: usize,
    pub rgba: Vec<u8>,
    pub png: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum QrError {
    #[error("failed to encode QR data: {0:?}")]
    Encode(qrcode::types::QrError),
    #[error("failed to render QR image: {0}")]
    Render(#[from] image::ImageError),
}

/// Encodes the request into module colors (the external encoder's job) and
/// scales them into an RGBA bitmap plus its PNG encoding. The quiet zone is
/// two modules on every side; the module scale is the largest whole number
/// that keeps the bitmap within the requested size.
pub fn encode(request: &QrRequest) -> Result<QrImage, QrError> {
    let code = QrCode::with_error_correction_level(
        request.text.as_bytes(),
        request.level.to_ec_level(),
    )
    .map_err(QrError::Encode)?;

    let width = code.width();
    let modules = code.to_colors();
    let total = width + 2 * QUIET_ZONE_MODULES;
    let scale = (request.size_px as usize / total).max(1);
    let side = total * scale;

    let bitmap = RgbaImage::from_fn(side as u32, side as u32, |x, y| {
        let module_x = (x as usize / scale).checked_sub(QUIET_ZONE_MODULES);
        let module_y = (y as usize / scale).checked_sub(QUIET_ZONE_MODULES);
        let dark = match (module_x, module_y) {
            (Some(mx), Some(my)) if mx < width && my < width => {
                modules[my * width + mx] == qrcode::Color::Dark
            }
            _ => false,
        };
        Rgba(if dark { DARK } else { LIGHT })
    });

    let mut png = Vec::new();
    bitmap.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    Ok(QrImage {
        side_px: side,
        rgba: bitmap.into_raw(),
        png,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str, size_px: u32) -> QrRequest {
        QrRequest {
            text: text.to_string(),
            level: ErrorCorrection::Medium,
            size_px,
        }
    }

    #[test]
    fn encode_produces_a_square_bitmap_within_the_requested_size() {
        let image = encode(&request("https://example.com", 300)).expect("encode should succeed");
        assert!(image.side_px > 0);
        assert!(image.side_px <= 300);
        assert_eq!(image.rgba.len(), image.side_px * image.side_px * 4);
    }

    #[test]
    fn encode_uses_both_module_colors() {
        let image = encode(&request("hello", 200)).expect("encode should succeed");
        let mut saw_dark = false;
        let mut saw_light = false;
        for pixel in image.rgba.chunks_exact(4) {
            if pixel == DARK {
                saw_dark = true;
            } else if pixel == LIGHT {
                saw_light = true;
            }
        }
        assert!(saw_dark, "bitmap should contain dark modules");
        assert!(saw_light, "bitmap should contain the quiet zone");
    }

    #[test]
    fn encode_emits_png_bytes() {
        let image = encode(&request("hello", 150)).expect("encode should succeed");
        assert!(image.png.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn tiny_size_requests_still_render_at_module_scale_one() {
        let image = encode(&request("a very long payload that needs a bigger symbol", 1))
            .expect("encode should succeed");
        // scale clamps to 1, so the bitmap is the module count plus quiet zone
        assert!(image.side_px > 1);
    }

    #[test]
    fn error_correction_labels_match_their_tolerances() {
        assert_eq!(ErrorCorrection::Low.label(), "Low (7%)");
        assert_eq!(ErrorCorrection::Medium.label(), "Medium (15%)");
        assert_eq!(ErrorCorrection::Quartile.label(), "Quartile (25%)");
        assert_eq!(ErrorCorrection::High.label(), "High (30%)");
        assert_eq!(ErrorCorrection::default(), ErrorCorrection::Medium);
    }
}
