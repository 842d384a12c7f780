use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::{Gray8, GrayColor},
    prelude::*,
};
use image::{codecs::jpeg::JpegEncoder, GrayImage, Luma};

use crate::error::{PanelError, Result};

/// 8-bit grayscale canvas in host memory. Pixels drawn outside the canvas are discarded.
pub struct Framebuffer {
    image: GrayImage,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PanelError::RenderResource(format!(
                "canvas must not be empty, got {width}x{height}"
            )));
        }
        Ok(Self {
            image: GrayImage::from_pixel(width, height, Luma([u8::MAX])),
        })
    }

    pub fn luma_at(&self, x: u32, y: u32) -> Option<u8> {
        self.image.get_pixel_checked(x, y).map(|pixel| pixel.0[0])
    }

    pub fn encode_jpeg(&self, quality: u8) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
        encoder.encode_image(&self.image)?;
        Ok(bytes)
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }
}

impl DrawTarget for Framebuffer {
    type Color = Gray8;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
                continue;
            };
            if let Some(pixel) = self.image.get_pixel_mut_checked(x, y) {
                *pixel = Luma([color.luma()]);
            }
        }
        Ok(())
    }
}
