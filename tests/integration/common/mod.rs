//! Shared helpers for pdfmeld integration tests.
//!
//! Tests synthesize their own PDFs instead of shipping binary fixtures.
//! Each synthesized document gets a caller-chosen page width, so a merged
//! output can be checked page by page for which source it came from.

use std::path::{Path, PathBuf};

use lopdf::{Document, Object, dictionary};

/// Build an in-memory PDF with `pages` pages, each `width` points wide.
pub fn build_pdf_bytes(pages: usize, width: i64) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut page_ids = Vec::new();
    for _ in 0..pages {
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), 792.into()],
        });
        page_ids.push(page_id);
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|&id| Object::Reference(id)).collect::<Vec<Object>>(),
            "Count" => pages as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// Write a synthesized PDF into `dir` and return its path.
pub fn write_pdf(dir: &Path, name: &str, pages: usize, width: i64) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, build_pdf_bytes(pages, width)).unwrap();
    path
}

/// Write a non-PDF file into `dir` and return its path.
pub fn write_text_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"plain text, not a pdf").unwrap();
    path
}

/// MediaBox widths of a serialized document's pages, in page order.
pub fn page_widths(bytes: &[u8]) -> Vec<i64> {
    let doc = Document::load_mem(bytes).expect("output must be a loadable PDF");
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let Object::Dictionary(dict) = doc.get_object(page_id).unwrap() else {
                panic!("page is not a dictionary");
            };
            let Object::Array(media_box) = dict.get(b"MediaBox").unwrap() else {
                panic!("MediaBox is not an array");
            };
            media_box[2].as_i64().unwrap()
        })
        .collect()
}
