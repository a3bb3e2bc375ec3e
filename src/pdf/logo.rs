use std::path::Path;

use lopdf::{Object, Stream, dictionary};

/// Decoded logo pixels, flattened onto white.
#[derive(Debug, Clone)]
pub struct Logo {
    pub width: u32,
    pub height: u32,
    rgb: Vec<u8>,
}

impl Logo {
    /// Load a PNG or JPEG logo.
    ///
    /// A missing or undecodable file yields `None` and a warning; a receipt
    /// is never refused because of its logo.
    pub fn load(path: &Path) -> Option<Self> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "logo not found, rendering without it");
            return None;
        }
        match image::open(path) {
            Ok(img) => Some(Self::from_rgba(img.to_rgba8())),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "logo could not be decoded, rendering without it"
                );
                None
            }
        }
    }

    pub(crate) fn from_rgba(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
        for px in img.pixels() {
            let [r, g, b, a] = px.0;
            let a = u16::from(a);
            for c in [r, g, b] {
                // composite over white
                let v = (u16::from(c) * a + 255 * (255 - a)) / 255;
                rgb.push(v as u8);
            }
        }
        Self { width, height, rgb }
    }

    /// Height in mm when printed `width_mm` wide.
    pub fn height_for(&self, width_mm: f32) -> f32 {
        width_mm * self.height as f32 / self.width.max(1) as f32
    }

    /// Image XObject for this logo.
    pub fn to_xobject(&self) -> Stream {
        let mut stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => Object::Integer(i64::from(self.width)),
                "Height" => Object::Integer(i64::from(self.height)),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => Object::Integer(8),
            },
            self.rgb.clone(),
        );
        // An uncompressed image stream is still valid, only larger.
        if let Err(e) = stream.compress() {
            tracing::debug!(error = %e, "logo stream left uncompressed");
        }
        stream
    }
}
