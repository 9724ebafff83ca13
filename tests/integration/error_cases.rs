//! Failure behavior: validation errors, pipeline errors, recovery.

use pdfmeld::error::{ErrorKind, PdfMeldError};
use pdfmeld::session::MergeSession;
use tempfile::TempDir;

use crate::common::{page_widths, write_pdf, write_text_file};

#[tokio::test]
async fn test_merge_with_empty_selection_is_validation_error() {
    let mut session = MergeSession::new().unwrap();

    let result = session.merge().await;
    assert!(matches!(
        result,
        Err(PdfMeldError::TooFewDocuments { count: 0 })
    ));

    let error = session.error().unwrap();
    assert_eq!(error.kind, ErrorKind::Validation);
    assert!(session.result().is_none());
}

#[tokio::test]
async fn test_merge_with_one_file_is_validation_error() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", 3, 100);

    let mut session = MergeSession::new().unwrap();
    session.select(&[a]).unwrap();

    let result = session.merge().await;
    assert!(matches!(
        result,
        Err(PdfMeldError::TooFewDocuments { count: 1 })
    ));

    // The selection itself is untouched by the failed merge
    assert_eq!(session.items().len(), 1);
    assert!(session.items()[0].preview().is_live());
    assert!(session.result().is_none());
}

#[tokio::test]
async fn test_malformed_pdf_fails_merge_and_selection_survives() {
    let dir = TempDir::new().unwrap();
    let good = write_pdf(dir.path(), "good.pdf", 2, 100);
    // Declared type says PDF, content says otherwise
    let bad = dir.path().join("bad.pdf");
    std::fs::write(&bad, b"this is not a pdf").unwrap();

    let mut session = MergeSession::new().unwrap();
    session.select(&[good, bad]).unwrap();

    let result = session.merge().await;
    assert!(result.is_err());

    let error = session.error().unwrap();
    assert_eq!(error.kind, ErrorKind::Merge);
    assert!(!error.message.contains('\n'));
    // The diagnostic detail is richer than the user message
    assert!(error.detail.contains("bad.pdf"));

    assert_eq!(session.items().len(), 2);
    assert!(session.result().is_none());
    assert!(!session.is_merging());
}

#[tokio::test]
async fn test_file_deleted_between_select_and_merge() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", 1, 100);
    let b = write_pdf(dir.path(), "b.pdf", 1, 200);

    let mut session = MergeSession::new().unwrap();
    session.select(&[a, b.clone()]).unwrap();

    std::fs::remove_file(&b).unwrap();

    let result = session.merge().await;
    assert!(result.is_err());
    assert_eq!(session.error().unwrap().kind, ErrorKind::Merge);
    assert!(!session.is_merging());
}

#[tokio::test]
async fn test_session_recovers_after_failed_merge() {
    let dir = TempDir::new().unwrap();
    let good_a = write_pdf(dir.path(), "good_a.pdf", 2, 100);
    let good_b = write_pdf(dir.path(), "good_b.pdf", 1, 200);
    let bad = dir.path().join("bad.pdf");
    std::fs::write(&bad, b"garbage").unwrap();

    let mut session = MergeSession::new().unwrap();
    session.select(&[good_a.clone(), bad]).unwrap();
    assert!(session.merge().await.is_err());

    // Replace the selection and merge again; the error clears
    session.select(&[good_a, good_b]).unwrap();
    assert!(session.error().is_none());

    let stats = session.merge().await.unwrap();
    assert_eq!(stats.total_pages, 3);
    assert_eq!(
        page_widths(session.result().unwrap().bytes()),
        vec![100, 100, 200]
    );
}

#[tokio::test]
async fn test_rejected_drop_keeps_result_alive() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", 1, 100);
    let b = write_pdf(dir.path(), "b.pdf", 1, 200);

    let mut session = MergeSession::new().unwrap();
    session.select(&[a, b]).unwrap();
    session.merge().await.unwrap();
    assert!(session.result().is_some());

    let txt = write_text_file(dir.path(), "ignore.txt");
    session.drop_files(&[txt]).unwrap();
    assert!(session.result().is_some());
    assert!(session.result().unwrap().handle().is_live());
}

#[test]
fn test_select_missing_file_reports_not_found() {
    let mut session = MergeSession::new().unwrap();
    let result = session.select(&[std::path::PathBuf::from("/no/such/file.pdf")]);
    assert!(matches!(result, Err(PdfMeldError::FileNotFound { .. })));
    assert!(session.items().is_empty());
}
