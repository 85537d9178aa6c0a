//! Page text sources.
//!
//! Both sources return one item per page. A page that fails to yield text is
//! an `Err` item, which the extractor skips; only a document that cannot be
//! opened at all is an error here.

use formscribe_core::pdf::split_pages;

use crate::prelude::*;

pub type PageText = std::result::Result<String, String>;

/// Plain text of every page of a PDF, in page order.
pub fn pdf_page_texts(bytes: &[u8]) -> Result<Vec<PageText>> {
    let doc = lopdf::Document::load_mem(bytes).map_err(|e| Error::PdfLoad(e.to_string()))?;

    if doc.is_encrypted() {
        return Err(Error::Encrypted.into());
    }

    let pages = doc
        .get_pages()
        .keys()
        .map(|&page_number| {
            doc.extract_text(&[page_number])
                .map_err(|e| format!("text extraction failed: {e}"))
        })
        .collect();

    Ok(pages)
}

/// Pages of a UTF-8 text dump, split on form feeds.
pub fn text_page_texts(bytes: &[u8]) -> Result<Vec<PageText>> {
    let text = std::str::from_utf8(bytes).map_err(|e| eyre!("Input is not valid UTF-8: {e}"))?;

    Ok(split_pages(text)
        .into_iter()
        .map(|page| Ok(page.to_string()))
        .collect())
}
