//! SVG writing operations.

use std::io::Write;

use anyhow::{Context, Result};

use crate::map::Extent;

/// String-based SVG writer, usable without a filesystem.
pub(crate) struct SvgStringWriter {
    buffer: Vec<u8>
}

/// Implement std::io::Write so `write!` / `writeln!` work.
impl Write for SvgStringWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        std::io::Result::Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> { std::io::Result::Ok(()) }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.buffer.extend_from_slice(buf);
        std::io::Result::Ok(())
    }
}

impl SvgStringWriter {
    pub(crate) fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Get the SVG string
    pub(crate) fn into_string(self) -> Result<String> {
        String::from_utf8(self.buffer)
            .context("[io::svg] SVG output is not valid UTF-8")
    }

    /// Write the XML declaration, the opening <svg> tag and a white background.
    pub(crate) fn write_header(&mut self, width: f64, height: f64, margin: f64, scale: f64, bounds: &Extent) -> Result<()> {
        write_svg_header(self, width, height, margin, scale, bounds)
    }

    /// Write the closing </svg> tag.
    pub(crate) fn write_footer(&mut self) -> Result<()> {
        writeln!(self, "</svg>")?;
        Ok(())
    }
}

/// Write SVG header to any writer.
pub(crate) fn write_svg_header<W: Write>(writer: &mut W, width: f64, height: f64, margin: f64, scale: f64, bounds: &Extent) -> Result<()> {
    writeln!(writer, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
    writeln!(writer, r##"<svg xmlns="http://www.w3.org/2000/svg"
        width="{width:.0}" height="{height:.0}"
        viewBox="0 0 {width:.0} {height:.0}"
        data-x-min="{x_min}" data-x-max="{x_max}"
        data-y-min="{y_min}" data-y-max="{y_max}"
        data-margin="{margin}" data-scale="{scale}">"##,
        x_min = bounds.min_x,
        x_max = bounds.max_x,
        y_min = bounds.min_y,
        y_max = bounds.max_y,
    )?;
    writeln!(writer, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
    Ok(())
}
