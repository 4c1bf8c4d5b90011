//! PDF text extraction
//!
//! Pages are read in page order and their text concatenated. A page whose
//! content cannot be decoded (scanned images, exotic fonts) contributes an
//! empty string rather than failing the whole document.

use crate::ExtractError;
use tracing::{debug, warn};

/// Extract the text of every page of a PDF held in memory
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    let document =
        lopdf::Document::load_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))?;

    let pages = document.get_pages();
    debug!(pages = pages.len(), "Loaded PDF");

    let mut text = String::new();
    for page_number in pages.keys() {
        match document.extract_text(&[*page_number]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => {
                warn!(page = page_number, error = %e, "No extractable text on page");
            }
        }
    }

    Ok(text)
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// Build a PDF whose pages show the given strings; `None` yields a page with no content stream
    pub fn pdf_with_pages(pages: &[Option<&str>]) -> Vec<u8> {
        let page_count = pages.len();
        // 1: catalog, 2: pages, 3: font, then one page object and one optional stream per page
        let mut objects: Vec<String> = Vec::new();
        objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());

        let kids: Vec<String> = (0..page_count).map(|i| format!("{} 0 R", 4 + i * 2)).collect();
        objects.push(format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_count
        ));
        objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());

        for (i, page) in pages.iter().enumerate() {
            let page_id = 4 + i * 2;
            let stream_id = page_id + 1;
            match page {
                Some(_) => objects.push(format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents {} 0 R /Resources << /Font << /F1 3 0 R >> >> >>",
                    stream_id
                )),
                None => objects.push(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] >>".to_string(),
                ),
            }
            let content = match page {
                Some(phrase) => format!("BT /F1 12 Tf 100 700 Td ({}) Tj ET", phrase),
                None => String::new(),
            };
            objects.push(format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                content.len(),
                content
            ));
        }

        let mut out = Vec::new();
        out.extend_from_slice(b"%PDF-1.4\n");
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj {} endobj\n", i + 1, body).as_bytes());
        }

        let xref_start = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
        out.extend_from_slice(format!("{:010} 65535 f \n", 0).as_bytes());
        for offset in offsets {
            out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer << /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref_start
            )
            .as_bytes(),
        );
        out
    }
}
