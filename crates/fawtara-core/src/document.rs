//! Assembly of per-page OCR output into one document text.

/// Concatenate page texts in order and trim surrounding whitespace.
///
/// Pages are joined as-is; OCR engines end each page with a newline or form
/// feed, which keeps the last line of one page apart from the next.
pub fn assemble_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for page in pages {
        text.push_str(page.as_ref());
    }
    text.trim().to_string()
}
