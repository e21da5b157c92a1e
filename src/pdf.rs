//! PDF Document Generator Module
//! Writes a single-page PDF holding one full-page JPEG image.
//!
//! The file is assembled directly (objects, cross-reference table, trailer);
//! a raster page needs nothing more than an image XObject and a content
//! stream that paints it.

use std::fs::File;
use std::io::Write;
use std::path::Path;

/// PDF user space: 72 points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

pub struct PdfGenerator;

impl PdfGenerator {
    /// Write `jpeg` (of `pixel_size`) stretched over a page of `page_size` points.
    pub fn write_image_page(
        output_path: &Path,
        jpeg: &[u8],
        pixel_size: (u32, u32),
        page_size: (f64, f64),
        title: &str,
    ) -> std::io::Result<()> {
        let bytes = Self::image_page_bytes(jpeg, pixel_size, page_size, title);
        let mut file = File::create(output_path)?;
        file.write_all(&bytes)?;
        file.flush()
    }

    pub fn image_page_bytes(
        jpeg: &[u8],
        pixel_size: (u32, u32),
        page_size: (f64, f64),
        title: &str,
    ) -> Vec<u8> {
        let (page_w, page_h) = page_size;
        let content = format!("q\n{page_w:.2} 0 0 {page_h:.2} 0 0 cm\n/Im1 Do\nQ\n");

        let objects: Vec<Vec<u8>> = vec![
            b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
            b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_vec(),
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {page_w:.2} {page_h:.2}] \
                 /Resources << /XObject << /Im1 4 0 R >> >> /Contents 5 0 R >>"
            )
            .into_bytes(),
            Self::stream(
                &format!(
                    "<< /Type /XObject /Subtype /Image /Width {} /Height {} \
                     /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /DCTDecode /Length {} >>",
                    pixel_size.0,
                    pixel_size.1,
                    jpeg.len()
                ),
                jpeg,
            ),
            Self::stream(
                &format!("<< /Length {} >>", content.len()),
                content.as_bytes(),
            ),
            format!(
                "<< /Title ({}) /Producer (assignment_charts) >>",
                Self::escape_text(title)
            )
            .into_bytes(),
        ];

        // Binary marker comment tells readers the file carries 8-bit data.
        let mut out: Vec<u8> = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
            out.extend_from_slice(body);
            out.extend_from_slice(b"\nendobj\n");
        }

        let xref_start = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
        out.extend_from_slice(b"0000000000 65535 f \n");
        for offset in &offsets {
            out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R /Info 6 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref_start
            )
            .as_bytes(),
        );

        out
    }

    fn stream(dict: &str, data: &[u8]) -> Vec<u8> {
        let mut body = Vec::with_capacity(dict.len() + data.len() + 20);
        body.extend_from_slice(dict.as_bytes());
        body.extend_from_slice(b"\nstream\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\nendstream");
        body
    }

    /// Escape a PDF literal string.
    fn escape_text(text: &str) -> String {
        text.chars()
            .filter(|c| c.is_ascii())
            .fold(String::with_capacity(text.len()), |mut s, c| {
                if matches!(c, '(' | ')' | '\\') {
                    s.push('\\');
                }
                s.push(c);
                s
            })
    }
}
