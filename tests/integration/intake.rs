//! Intake behavior: drop filtering and preview-handle lifecycle.

use pdfmeld::session::MergeSession;
use tempfile::TempDir;

use crate::common::{write_pdf, write_text_file};

#[test]
fn test_drop_keeps_only_pdfs_in_relative_order() {
    let dir = TempDir::new().unwrap();
    let batch = vec![
        write_text_file(dir.path(), "readme.md"),
        write_pdf(dir.path(), "first.pdf", 1, 100),
        write_text_file(dir.path(), "photo.png"),
        write_pdf(dir.path(), "second.pdf", 1, 200),
        write_pdf(dir.path(), "third.pdf", 1, 300),
    ];

    let mut session = MergeSession::new().unwrap();
    let accepted = session.drop_files(&batch).unwrap();

    assert_eq!(accepted, 3);
    let names: Vec<&str> = session.items().iter().map(|i| i.name()).collect();
    assert_eq!(names, vec!["first.pdf", "second.pdf", "third.pdf"]);
}

#[tokio::test]
async fn test_drop_without_pdfs_leaves_everything_untouched() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", 1, 100);
    let b = write_pdf(dir.path(), "b.pdf", 1, 200);
    let txt = write_text_file(dir.path(), "notes.txt");

    let mut session = MergeSession::new().unwrap();
    session.select(&[a, b]).unwrap();
    session.merge().await.unwrap();

    let item_previews: Vec<_> = session
        .items()
        .iter()
        .map(|i| i.preview().clone())
        .collect();
    let artifact_handle = session.result().unwrap().handle().clone();

    let accepted = session.drop_files(&[txt]).unwrap();
    assert_eq!(accepted, 0);

    // Selection, previews, and the merge result all survive
    assert_eq!(session.items().len(), 2);
    for preview in &item_previews {
        assert!(preview.is_live());
    }
    assert!(session.result().is_some());
    assert!(artifact_handle.is_live());
}

#[test]
fn test_replacing_selection_revokes_all_previous_handles() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", 1, 100);
    let b = write_pdf(dir.path(), "b.pdf", 1, 200);
    let c = write_pdf(dir.path(), "c.pdf", 1, 300);

    let mut session = MergeSession::new().unwrap();
    session.select(&[a, b]).unwrap();

    let old_previews: Vec<_> = session
        .items()
        .iter()
        .map(|i| i.preview().clone())
        .collect();

    session.select(&[c]).unwrap();

    for preview in &old_previews {
        assert!(!preview.is_live());
    }
    assert!(session.items()[0].preview().is_live());
}

#[tokio::test]
async fn test_new_drop_supersedes_merge_result() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", 1, 100);
    let b = write_pdf(dir.path(), "b.pdf", 1, 200);
    let c = write_pdf(dir.path(), "c.pdf", 1, 300);
    let d = write_pdf(dir.path(), "d.pdf", 1, 400);

    let mut session = MergeSession::new().unwrap();
    session.select(&[a, b]).unwrap();
    session.merge().await.unwrap();

    let artifact_handle = session.result().unwrap().handle().clone();

    let accepted = session.drop_files(&[c, d]).unwrap();
    assert_eq!(accepted, 2);

    assert!(session.result().is_none());
    assert!(!artifact_handle.is_live());
}

#[test]
fn test_every_selected_item_has_a_live_preview() {
    let dir = TempDir::new().unwrap();
    let paths = vec![
        write_pdf(dir.path(), "a.pdf", 1, 100),
        write_pdf(dir.path(), "b.pdf", 2, 200),
        write_pdf(dir.path(), "c.pdf", 3, 300),
    ];

    let mut session = MergeSession::new().unwrap();
    session.select(&paths).unwrap();

    for (item, source) in session.items().iter().zip(&paths) {
        assert!(item.preview().is_live());
        assert_eq!(
            std::fs::read(item.preview().path()).unwrap(),
            std::fs::read(source).unwrap()
        );
    }
}
