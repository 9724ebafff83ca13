//! PDF engine seam.
//!
//! The session treats the PDF library as an opaque collaborator with five
//! primitives: parse a document from bytes, create an empty document, copy
//! all pages of a source into a destination's object space, append a copied
//! page to the destination's page tree, and serialize. [`PdfEngine`] is that
//! contract; [`LopdfEngine`] implements it on `lopdf`.

use lopdf::{Document, Object, ObjectId, dictionary};

use crate::error::{PdfMeldError, Result};

/// The set of document operations the merge pipeline consumes.
///
/// Implementations are trusted primitives; callers never inspect documents
/// beyond what this trait exposes.
pub trait PdfEngine {
    /// Opaque in-memory document representation.
    type Doc;

    /// Opaque reference to a page copied into a destination document.
    type Page: Copy;

    /// Parse a document from raw bytes.
    ///
    /// `name` is the display name used in error context only.
    ///
    /// # Errors
    ///
    /// Fails on malformed input, encrypted documents, and documents
    /// without pages.
    fn parse_document(&self, bytes: &[u8], name: &str) -> Result<Self::Doc>;

    /// Create a fresh, empty output document.
    fn create_document(&self) -> Self::Doc;

    /// Copy every page of `source` into `dest`'s object space.
    ///
    /// Returns the copied pages in the source's original page order. The
    /// pages are not yet linked into `dest`'s page tree; call
    /// [`append_page`](Self::append_page) for each, in order.
    ///
    /// # Errors
    ///
    /// Fails if the source's page objects cannot be transplanted.
    fn copy_all_pages(&self, source: &Self::Doc, dest: &mut Self::Doc) -> Result<Vec<Self::Page>>;

    /// Append one copied page to `dest`'s page tree.
    ///
    /// # Errors
    ///
    /// Fails if the destination page tree is malformed.
    fn append_page(&self, dest: &mut Self::Doc, page: Self::Page) -> Result<()>;

    /// Number of pages in a document.
    fn page_count(&self, doc: &Self::Doc) -> usize;

    /// Serialize a document to a byte buffer.
    ///
    /// # Errors
    ///
    /// Fails if the document cannot be written.
    fn serialize(&self, doc: &mut Self::Doc) -> Result<Vec<u8>>;
}

/// [`PdfEngine`] implementation backed by `lopdf`.
#[derive(Debug, Clone, Default)]
pub struct LopdfEngine;

impl LopdfEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self
    }
}

impl PdfEngine for LopdfEngine {
    type Doc = Document;
    type Page = ObjectId;

    fn parse_document(&self, bytes: &[u8], name: &str) -> Result<Document> {
        let doc = Document::load_mem(bytes).map_err(|e| {
            let reason = e.to_string();
            if reason.contains("encrypt") || reason.contains("password") {
                PdfMeldError::EncryptedDocument {
                    name: name.to_string(),
                }
            } else {
                PdfMeldError::parse_failed(name, reason)
            }
        })?;

        if doc.is_encrypted() {
            return Err(PdfMeldError::EncryptedDocument {
                name: name.to_string(),
            });
        }

        if doc.get_pages().is_empty() {
            return Err(PdfMeldError::parse_failed(name, "document has no pages"));
        }

        Ok(doc)
    }

    fn create_document(&self) -> Document {
        let mut doc = Document::with_version("1.7");

        let pages_id = doc.new_object_id();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Object::Array(Vec::new()),
                "Count" => 0,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        doc
    }

    fn copy_all_pages(&self, source: &Document, dest: &mut Document) -> Result<Vec<ObjectId>> {
        // Renumber the source into the destination's id space so the two
        // object sets cannot collide, then move everything across. Orphaned
        // source objects (its catalog, its pages root) are pruned at
        // serialization time.
        let mut source = source.clone();
        source.renumber_objects_with(dest.max_id + 1);
        dest.max_id = source.max_id;

        let pages: Vec<ObjectId> = source.get_pages().into_values().collect();
        if pages.is_empty() {
            return Err(PdfMeldError::merge_failed("source document has no pages"));
        }

        dest.objects.extend(source.objects);

        Ok(pages)
    }

    fn append_page(&self, dest: &mut Document, page: ObjectId) -> Result<()> {
        let pages_id = dest
            .catalog()
            .map_err(|e| PdfMeldError::merge_failed(format!("Failed to get catalog: {e}")))?
            .get(b"Pages")
            .and_then(|p| p.as_reference())
            .map_err(|e| {
                PdfMeldError::merge_failed(format!("Failed to get pages reference: {e}"))
            })?;

        let pages_obj = dest
            .get_object_mut(pages_id)
            .map_err(|e| PdfMeldError::merge_failed(format!("Failed to get pages object: {e}")))?;

        if let Object::Dictionary(dict) = pages_obj {
            let kids = dict
                .get_mut(b"Kids")
                .map_err(|_| PdfMeldError::merge_failed("Pages dictionary missing Kids array"))?;

            if let Object::Array(kids_array) = kids {
                kids_array.push(Object::Reference(page));
            } else {
                return Err(PdfMeldError::merge_failed("Kids is not an array"));
            }

            let current_count = dict.get(b"Count").and_then(|c| c.as_i64()).unwrap_or(0);
            dict.set("Count", Object::Integer(current_count + 1));
        } else {
            return Err(PdfMeldError::merge_failed(
                "Pages object is not a dictionary",
            ));
        }

        // Re-parent the page so the tree stays consistent; its old parent
        // was left behind in the source document.
        let page_obj = dest
            .get_object_mut(page)
            .map_err(|e| PdfMeldError::merge_failed(format!("Failed to get page: {e}")))?;

        if let Object::Dictionary(dict) = page_obj {
            dict.set("Parent", Object::Reference(pages_id));
        } else {
            return Err(PdfMeldError::merge_failed("Page object is not a dictionary"));
        }

        Ok(())
    }

    fn page_count(&self, doc: &Document) -> usize {
        doc.get_pages().len()
    }

    fn serialize(&self, doc: &mut Document) -> Result<Vec<u8>> {
        doc.prune_objects();
        doc.compress();
        doc.renumber_objects();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).map_err(|e| {
            PdfMeldError::merge_failed(format!("Failed to serialize merged document: {e}"))
        })?;

        Ok(buffer)
    }
}
