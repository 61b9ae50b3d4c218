//! Raw PGM ("P5") codec over arbitrary byte streams.
//!
//! Layout:
//!
//! ```text
//! P5\n
//! <width> <height>\n
//! <maxval>\n
//! <width*height raw bytes, row-major>
//! ```
//!
//! - Any run of whitespace separates the magic and the three header numbers.
//! - Comment lines (`#` up to and including the next newline) may precede each
//!   header number and are discarded.
//! - Exactly one whitespace byte follows `maxval`; the pixel data starts right
//!   after it, so a first pixel equal to a whitespace code is read correctly.
//! - Only 8-bit images are accepted (`0 < maxval <= 255`).
//! - Bytes after the pixel data are left unread.
use std::io::{self, BufRead, ErrorKind, Write};

use log::debug;

use crate::diagnostics::counters::{self, Counter};
use crate::error::{ImageError, Result};
use crate::image::gray::{GrayImage, PIX_MAX};

/// Parsed PGM header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PgmHeader {
    pub width: usize,
    pub height: usize,
    pub maxval: u8,
}

impl PgmHeader {
    /// Number of raw pixel bytes that follow the header.
    pub fn pixel_count(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }
}

/// `isspace` in the C locale: space, `\t`, `\n`, `\v`, `\f`, `\r`.
#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Byte-level cursor over a buffered reader used while parsing the header.
struct HeaderReader<'r, R: BufRead> {
    inner: &'r mut R,
}

impl<'r, R: BufRead> HeaderReader<'r, R> {
    fn peek(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.inner.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let b = self.peek()?;
        if b.is_some() {
            self.inner.consume(1);
        }
        Ok(b)
    }

    fn skip_whitespace(&mut self) -> io::Result<()> {
        while let Some(b) = self.peek()? {
            if !is_space(b) {
                break;
            }
            self.inner.consume(1);
        }
        Ok(())
    }

    /// Skip zero or more `#` comment lines (and the whitespace after each).
    /// Returns how many were skipped.
    fn skip_comments(&mut self) -> io::Result<usize> {
        let mut skipped = 0;
        while self.peek()? == Some(b'#') {
            while let Some(b) = self.next_byte()? {
                if b == b'\n' {
                    break;
                }
            }
            skipped += 1;
            self.skip_whitespace()?;
        }
        Ok(skipped)
    }

    /// Parse an unsigned decimal field, preceded by optional whitespace and
    /// comment lines. A leading `+` is accepted; anything else that is not a
    /// digit, or a value that overflows `usize`, yields `err`.
    fn field(&mut self, err: fn() -> ImageError) -> Result<usize> {
        self.skip_whitespace()?;
        self.skip_comments()?;
        if self.peek()? == Some(b'+') {
            self.inner.consume(1);
        }
        let mut value: usize = 0;
        let mut digits = 0usize;
        while let Some(b) = self.peek()? {
            if !b.is_ascii_digit() {
                break;
            }
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(usize::from(b - b'0')))
                .ok_or_else(err)?;
            digits += 1;
            self.inner.consume(1);
        }
        if digits == 0 {
            return Err(err());
        }
        Ok(value)
    }
}

/// Parse the header, leaving `reader` positioned at the first pixel byte.
pub fn read_header<R: BufRead>(reader: &mut R) -> Result<PgmHeader> {
    let mut hr = HeaderReader { inner: reader };

    if hr.next_byte()? != Some(b'P') || hr.next_byte()? != Some(b'5') {
        return Err(ImageError::InvalidMagic);
    }

    let width = hr.field(|| ImageError::InvalidWidth)?;
    let height = hr.field(|| ImageError::InvalidHeight)?;
    let maxval = hr.field(|| ImageError::InvalidMaxval)?;
    if maxval == 0 || maxval > usize::from(PIX_MAX) {
        return Err(ImageError::InvalidMaxval);
    }

    match hr.next_byte()? {
        Some(b) if is_space(b) => {}
        _ => return Err(ImageError::WhitespaceExpected),
    }

    Ok(PgmHeader {
        width,
        height,
        maxval: maxval as u8,
    })
}

/// Read up to `expected` raster bytes. The buffer grows with the data that
/// actually arrives, so a header that overstates the size costs nothing.
fn read_pixels<R: BufRead>(reader: &mut R, expected: usize) -> Result<Vec<u8>> {
    let mut pixels = Vec::new();
    while pixels.len() < expected {
        let chunk = match reader.fill_buf() {
            Ok(chunk) => chunk,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        if chunk.is_empty() {
            break;
        }
        let n = chunk.len().min(expected - pixels.len());
        pixels.try_reserve(n).map_err(|source| {
            counters::bump(Counter::MemAllocFailures);
            ImageError::Alloc {
                bytes: expected,
                source,
            }
        })?;
        pixels.extend_from_slice(&chunk[..n]);
        reader.consume(n);
    }
    Ok(pixels)
}

/// Decode a complete P5 image from `reader`.
///
/// On failure no image is returned and no image buffer is created.
pub fn decode<R: BufRead>(reader: &mut R) -> Result<GrayImage> {
    let header = read_header(reader)?;
    debug!(
        "pgm::decode header {}x{} maxval={}",
        header.width, header.height, header.maxval
    );
    let expected = header
        .pixel_count()
        .ok_or(ImageError::DimensionsOverflow {
            width: header.width,
            height: header.height,
        })?;
    let pixels = read_pixels(reader, expected)?;
    let got = pixels.len();
    counters::add(Counter::PixMem, got as u64);
    if got != expected {
        return Err(ImageError::TruncatedPixels { expected, got });
    }
    GrayImage::from_raw(header.width, header.height, header.maxval, pixels)
}

/// Encode `img` as P5 into `writer`.
pub fn encode<W: Write>(img: &GrayImage, writer: &mut W) -> Result<()> {
    write!(
        writer,
        "P5\n{} {}\n{}\n",
        img.width(),
        img.height(),
        img.maxval()
    )
    .map_err(ImageError::WriteHeader)?;
    writer
        .write_all(img.pixels())
        .map_err(ImageError::WritePixels)?;
    counters::add(Counter::PixMem, img.len() as u64);
    writer.flush().map_err(ImageError::WritePixels)?;
    Ok(())
}
