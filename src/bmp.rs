//! Uncompressed 24-bit Windows bitmap with a `BITMAPINFOHEADER`.
//!
//! Rows are stored bottom to top, pixels as BGR, each row padded to a
//! multiple of four bytes.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use image::RgbImage;
use tracing::info;

use crate::error::{Error, Result};

const FILE_HEADER_LEN: u32 = 14;
const INFO_HEADER_LEN: u32 = 40;
/// Offset of the first pixel row.
pub const PIXEL_OFFSET: u32 = FILE_HEADER_LEN + INFO_HEADER_LEN;
/// 72 dpi.
const PIXELS_PER_METER: u32 = 2835;
const BITS_PER_PIXEL: u16 = 24;

/// Bytes per stored row, padding included.
#[inline]
pub fn row_stride(width: u32) -> usize {
    (width as usize * 3 + 3) & !3
}

pub fn encode(image: &RgbImage) -> Vec<u8> {
    let (width, height) = image.dimensions();
    let stride = row_stride(width);
    let data_len = (stride * height as usize) as u32;
    let file_len = PIXEL_OFFSET + data_len;

    let mut buf = Vec::with_capacity(file_len as usize);

    buf.extend_from_slice(b"BM");
    buf.extend_from_slice(&file_len.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes());
    buf.extend_from_slice(&PIXEL_OFFSET.to_le_bytes());

    buf.extend_from_slice(&INFO_HEADER_LEN.to_le_bytes());
    buf.extend_from_slice(&width.to_le_bytes());
    buf.extend_from_slice(&height.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes());
    buf.extend_from_slice(&BITS_PER_PIXEL.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes());
    buf.extend_from_slice(&data_len.to_le_bytes());
    buf.extend_from_slice(&PIXELS_PER_METER.to_le_bytes());
    buf.extend_from_slice(&PIXELS_PER_METER.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes());

    let padding = stride - width as usize * 3;
    for row in image.rows().rev() {
        for pixel in row {
            let [r, g, b] = pixel.0;
            buf.extend_from_slice(&[b, g, r]);
        }
        buf.extend(std::iter::repeat(0u8).take(padding));
    }

    buf
}

/// Writes the bitmap in one go; a short write is an error.
pub fn write<P: AsRef<Path>>(path: P, image: &RgbImage) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode(image);

    let mut file = File::create(path).map_err(|err| Error::io("creating", path, err))?;
    file.write_all(&bytes).map_err(|err| Error::io("writing", path, err))?;
    file.flush().map_err(|err| Error::io("writing", path, err))?;
    file.sync_all().map_err(|err| Error::io("closing", path, err))?;

    info!(path = %path.display(), bytes = bytes.len(), "bitmap written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;

    fn u32_at(buf: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([buf[offset], buf[offset + 1], buf[offset + 2], buf[offset + 3]])
    }

    fn u16_at(buf: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes([buf[offset], buf[offset + 1]])
    }

    /// 3x2 image, every pixel distinct.
    fn sample() -> RgbImage {
        RgbImage::from_fn(3, 2, |x, y| Rgb([10 * x as u8 + 1, 100 + y as u8, 200 + x as u8]))
    }

    #[test]
    fn stride_is_padded_to_four() {
        assert_eq!(4, row_stride(1));
        assert_eq!(12, row_stride(3));
        assert_eq!(12, row_stride(4));
        assert_eq!(2100, row_stride(700));
    }

    #[test]
    fn header_fields() {
        let buf = encode(&sample());

        assert_eq!(b"BM", &buf[0..2]);
        assert_eq!(buf.len() as u32, u32_at(&buf, 2));
        assert_eq!(54 + 2 * 12, buf.len());
        assert_eq!(0, u32_at(&buf, 6));
        assert_eq!(54, u32_at(&buf, 10));
        assert_eq!(40, u32_at(&buf, 14));
        assert_eq!(3, u32_at(&buf, 18));
        assert_eq!(2, u32_at(&buf, 22));
        assert_eq!(1, u16_at(&buf, 26));
        assert_eq!(24, u16_at(&buf, 28));
        assert_eq!(0, u32_at(&buf, 30));
        assert_eq!(24, u32_at(&buf, 34));
        assert_eq!(2835, u32_at(&buf, 38));
        assert_eq!(2835, u32_at(&buf, 42));
        assert_eq!(0, u32_at(&buf, 46));
        assert_eq!(0, u32_at(&buf, 50));
    }

    #[test]
    fn first_stored_row_is_bottom_row_in_bgr() {
        let image = sample();
        let buf = encode(&image);

        let bottom_left = image.get_pixel(0, 1);
        assert_eq!([bottom_left[2], bottom_left[1], bottom_left[0]], buf[54..57]);
        // Padding after three pixels.
        assert_eq!([0, 0, 0], buf[63..66]);

        let top_right = image.get_pixel(2, 0);
        assert_eq!([top_right[2], top_right[1], top_right[0]], buf[72..75]);
    }

    #[test]
    fn standard_reader_decodes_same_pixels() {
        let image = RgbImage::from_fn(5, 3, |x, y| Rgb([x as u8 * 40, y as u8 * 80, 7]));
        let buf = encode(&image);

        let decoded = image::load_from_memory_with_format(&buf, image::ImageFormat::Bmp)
            .unwrap()
            .to_rgb8();
        assert_eq!(image.dimensions(), decoded.dimensions());
        assert_eq!(image, decoded);
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bmp");

        write(&path, &sample()).unwrap();
        assert_eq!(encode(&sample()), std::fs::read(&path).unwrap());
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.bmp");

        let err = write(&path, &sample()).unwrap_err();
        assert!(matches!(err, Error::Io { action: "creating", .. }));
        assert_ne!(0, err.exit_code());
    }
}
