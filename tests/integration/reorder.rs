//! Reordering behavior of the pending selection.

use pdfmeld::session::MergeSession;
use rstest::rstest;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::write_pdf;

fn session_with_files(dir: &TempDir, count: usize) -> MergeSession {
    let paths: Vec<PathBuf> = (0..count)
        .map(|i| write_pdf(dir.path(), &format!("f{i}.pdf"), 1, 100 + i as i64))
        .collect();

    let mut session = MergeSession::new().unwrap();
    session.select(&paths).unwrap();
    session
}

fn order(session: &MergeSession) -> Vec<String> {
    session
        .items()
        .iter()
        .map(|item| item.name().to_string())
        .collect()
}

#[test]
fn test_move_up_first_is_noop() {
    let dir = TempDir::new().unwrap();
    let mut session = session_with_files(&dir, 3);
    let before = order(&session);

    assert!(!session.move_up(0));
    assert_eq!(order(&session), before);
}

#[test]
fn test_move_down_last_is_noop() {
    let dir = TempDir::new().unwrap();
    let mut session = session_with_files(&dir, 3);
    let before = order(&session);

    assert!(!session.move_down(2));
    assert_eq!(order(&session), before);
}

#[test]
fn test_move_out_of_range_is_noop() {
    let dir = TempDir::new().unwrap();
    let mut session = session_with_files(&dir, 3);
    let before = order(&session);

    assert!(!session.move_up(10));
    assert!(!session.move_down(10));
    assert_eq!(order(&session), before);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(4)]
fn test_move_up_then_down_restores_order(#[case] index: usize) {
    let dir = TempDir::new().unwrap();
    let mut session = session_with_files(&dir, 5);
    let before = order(&session);

    assert!(session.move_up(index));
    assert!(session.move_down(index - 1));
    assert_eq!(order(&session), before);
}

#[test]
fn test_swap_moves_exactly_one_pair() {
    let dir = TempDir::new().unwrap();
    let mut session = session_with_files(&dir, 4);

    assert!(session.move_down(1));
    assert_eq!(order(&session), vec!["f0.pdf", "f2.pdf", "f1.pdf", "f3.pdf"]);

    assert!(session.move_up(3));
    assert_eq!(order(&session), vec!["f0.pdf", "f2.pdf", "f3.pdf", "f1.pdf"]);
}

#[test]
fn test_reorder_preserves_identity_and_previews() {
    let dir = TempDir::new().unwrap();
    let mut session = session_with_files(&dir, 3);

    let ids: Vec<u64> = session.items().iter().map(|i| i.id()).collect();
    let previews: Vec<_> = session
        .items()
        .iter()
        .map(|i| i.preview().clone())
        .collect();

    session.move_down(0);
    session.move_down(1);
    // f0 moved to the back: [f1, f2, f0]

    let reordered_ids: Vec<u64> = session.items().iter().map(|i| i.id()).collect();
    assert_eq!(reordered_ids, vec![ids[1], ids[2], ids[0]]);

    for preview in &previews {
        assert!(preview.is_live());
    }
    assert_eq!(session.items()[2].preview(), &previews[0]);
}
