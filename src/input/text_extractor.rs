//! Text extraction from various file formats

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::FileType;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use tokio::fs;

/// Text pulled out of a document together with its page count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub pages: usize,
}

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<ExtractedText>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<ExtractedText> {
        let bytes = fs::read(path).await?;

        let extracted = tokio::task::spawn_blocking(move || PdfExtractor.extract_bytes(&bytes))
            .await
            .map_err(|e| ScreenerError::PdfExtraction(format!("extraction task failed: {}", e)))?;

        extracted.map_err(|e| match e {
            ScreenerError::PdfExtraction(msg) => {
                ScreenerError::PdfExtraction(format!("'{}': {}", path.display(), msg))
            }
            other => other,
        })
    }
}

impl PdfExtractor {
    /// pdf-extract panics on some malformed fonts and encodings; those
    /// panics surface as `PdfExtraction` errors.
    pub fn extract_bytes(&self, bytes: &[u8]) -> Result<ExtractedText> {
        let text = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
            .map_err(|payload| {
                ScreenerError::PdfExtraction(format!("Failed to extract text: {}", panic_message(&*payload)))
            })?
            .map_err(|e| ScreenerError::PdfExtraction(format!("Failed to extract text: {}", e)))?;
        let pages = count_pdf_pages(bytes)?;

        Ok(ExtractedText { text, pages })
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "document could not be decoded".to_string()
    }
}

/// Number of pages in the PDF page tree.
pub fn count_pdf_pages(bytes: &[u8]) -> Result<usize> {
    let document = lopdf::Document::load_mem(bytes)
        .map_err(|e| ScreenerError::PdfExtraction(format!("Failed to read page tree: {}", e)))?;
    Ok(document.get_pages().len())
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<ExtractedText> {
        let content = fs::read_to_string(path).await?;
        Ok(ExtractedText {
            text: content,
            pages: 1,
        })
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<ExtractedText> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(ExtractedText {
            text: self.markdown_to_text(&markdown_content),
            pages: 1,
        })
    }
}

impl MarkdownExtractor {
    pub fn markdown_to_text(&self, markdown: &str) -> String {
        let parser = Parser::new(markdown);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        self.html_to_text(&html_output)
    }

    fn html_to_text(&self, html: &str) -> String {
        let text = html
            .replace("<br>", "\n")
            .replace("<br />", "\n")
            .replace("</p>", "\n\n")
            .replace("</li>", "\n")
            .replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        let tag_regex = Regex::new(r"<[^>]*>").expect("Invalid tag regex");
        let clean_text = tag_regex.replace_all(&text, "");
        // decoded last so an escaped `&lt;` never turns into a tag
        let clean_text = clean_text.replace("&amp;", "&");

        clean_text
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Extract an in-memory document of a known type.
///
/// This is synchronous; async callers should run it on a blocking thread for PDFs.
pub fn extract_from_bytes(file_type: FileType, bytes: &[u8]) -> Result<ExtractedText> {
    match file_type {
        FileType::Pdf => PdfExtractor.extract_bytes(bytes),
        FileType::Text => Ok(ExtractedText {
            text: String::from_utf8_lossy(bytes).into_owned(),
            pages: 1,
        }),
        FileType::Markdown => Ok(ExtractedText {
            text: MarkdownExtractor.markdown_to_text(&String::from_utf8_lossy(bytes)),
            pages: 1,
        }),
        FileType::Unknown => Err(ScreenerError::UnsupportedFormat(
            "cannot extract text from an unknown file type".to_string(),
        )),
    }
}

/// Small generated PDFs shared by the extraction and queue tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    pub(crate) fn build_pdf(page_count: usize, encoding: Option<&str>) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let mut font = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        };
        if let Some(encoding) = encoding {
            font.set("Encoding", Object::Name(encoding.as_bytes().to_vec()));
        }
        let font_id = doc.add_object(font);
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for index in 0..page_count {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(format!("Page {}", index + 1))]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::build_pdf;
    use super::*;

    #[test]
    fn test_count_pdf_pages() {
        assert_eq!(count_pdf_pages(&build_pdf(1, None)).unwrap(), 1);
        assert_eq!(count_pdf_pages(&build_pdf(3, None)).unwrap(), 3);
    }

    #[test]
    fn test_invalid_pdf_is_an_extraction_error() {
        let result = PdfExtractor.extract_bytes(b"definitely not a pdf");
        assert!(matches!(result, Err(ScreenerError::PdfExtraction(_))));
    }

    #[test]
    fn test_undecodable_pdf_is_an_extraction_error() {
        let bytes = build_pdf(1, Some("BogusEncoding"));

        let result = PdfExtractor.extract_bytes(&bytes);
        assert!(matches!(result, Err(ScreenerError::PdfExtraction(_))));
    }

    #[tokio::test]
    async fn test_undecodable_pdf_file_is_an_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, build_pdf(1, Some("BogusEncoding"))).unwrap();

        let result = PdfExtractor.extract(&path).await;
        match result {
            Err(ScreenerError::PdfExtraction(msg)) => assert!(msg.contains("broken.pdf")),
            other => panic!("expected extraction error, got {:?}", other),
        }
    }

    #[test]
    fn test_markdown_is_stripped() {
        let text = MarkdownExtractor.markdown_to_text("# Jane Roe\n\n**Skills**: Rust &amp; Go\n\n- Docker\n- Linux");

        assert!(text.contains("Jane Roe"));
        assert!(text.contains("Rust & Go"));
        assert!(text.contains("Docker"));
        assert!(!text.contains("**"));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_extract_plain_bytes() {
        let extracted = extract_from_bytes(FileType::Text, b"Python and SQL").unwrap();
        assert_eq!(extracted.text, "Python and SQL");
        assert_eq!(extracted.pages, 1);

        assert!(extract_from_bytes(FileType::Unknown, b"x").is_err());
    }
}
