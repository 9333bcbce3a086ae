use crate::refs::{ObjectReferences, RefType};
use crate::PDFError;
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::path::Path;

/// How the pixels get into the PDF
pub enum RasterData {
    /// Baseline RGB JPEGs are valid PDF image streams as they are
    Jpeg(Vec<u8>),
    /// Everything else is decoded and re-compressed
    Decoded(DynamicImage),
}

/// A raster image, such as a logo, that pages can draw
pub struct Image {
    pub data: RasterData,
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl Image {
    /// Load an image from disk, in any format the [image] crate understands
    pub fn new_from_disk<P: AsRef<Path>>(path: P) -> Result<Image, PDFError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let format = match ImageFormat::from_path(path) {
            Ok(format) => format,
            Err(_) => image::guess_format(&bytes)?,
        };
        Self::from_bytes(bytes, format)
    }

    /// Load an already-read image
    pub fn from_bytes(bytes: Vec<u8>, format: ImageFormat) -> Result<Image, PDFError> {
        let decoded = image::load_from_memory_with_format(&bytes, format)?;
        let (width, height) = decoded.dimensions();
        let data = match (format, decoded.color()) {
            (ImageFormat::Jpeg, ColorType::Rgb8) => RasterData::Jpeg(bytes),
            _ => RasterData::Decoded(decoded),
        };

        Ok(Image {
            data,
            width: width as f32,
            height: height as f32,
        })
    }

    /// Wrap an image that was produced in memory
    pub fn new_raster(image: DynamicImage) -> Image {
        let (width, height) = image.dimensions();
        Image {
            data: RasterData::Decoded(image),
            width: width as f32,
            height: height as f32,
        }
    }

    /// Width over height
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, image_index: usize, writer: &mut Pdf) {
        let id = refs.gen(RefType::Image(image_index));
        let level = CompressionLevel::DefaultLevel as u8;

        let (filter, bytes, mask) = match &self.data {
            RasterData::Jpeg(bytes) => (Filter::DctDecode, bytes.clone(), None),
            RasterData::Decoded(image) => {
                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<u8> = image.to_rgba8().pixels().map(|p| p.0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });
                let rgb = compress_to_vec_zlib(image.to_rgb8().as_raw(), level);
                (Filter::FlateDecode, rgb, mask)
            }
        };

        let mask_id = mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));

        let mut xobject = writer.image_xobject(id, &bytes);
        xobject.filter(filter);
        xobject.width(self.width as i32);
        xobject.height(self.height as i32);
        xobject.color_space().device_rgb();
        xobject.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            xobject.s_mask(mask_id);
        }
        xobject.finish();

        if let (Some(mask_id), Some(mask)) = (mask_id, mask) {
            let mut s_mask = writer.image_xobject(mask_id, &mask);
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn decoded_images_keep_their_size() {
        let logo = Image::new_raster(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            40,
            10,
            Rgba([255, 0, 0, 128]),
        )));
        assert_eq!(logo.width, 40.0);
        assert_eq!(logo.aspect_ratio(), 4.0);

        let mut refs = ObjectReferences::new();
        let mut pdf = Pdf::new();
        logo.write(&mut refs, 0, &mut pdf);
        assert!(refs.get(RefType::Image(0)).is_some());
        assert!(refs.get(RefType::ImageMask(0)).is_some());
    }
}
