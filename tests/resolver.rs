mod common;

use std::sync::Arc;

use common::{Failure, FakeDrive, report_store, resolver};
use drivelink::drive::RemoteNode;
use drivelink::error::ResolveError;
use drivelink::providers::{CredentialProvider, MemoryStore};
use drivelink::resolver::{MatchResult, MatchType, PathResolver};

fn full(id: &str) -> MatchResult {
    MatchResult::Full {
        file_id: id.to_string(),
    }
}

fn partial(id: &str, depth: usize) -> MatchResult {
    MatchResult::Partial {
        file_id: id.to_string(),
        depth,
    }
}

#[tokio::test]
async fn test_full_match_through_snapshot() {
    let drive = Arc::new(FakeDrive::new(report_store()));
    let (resolver, _) = resolver(drive.clone(), None);

    let result = resolver.resolve("/Users/me/report.pdf").await.unwrap();
    assert_eq!(result, full("F1"));
    assert_eq!(drive.searches(), 1);
    assert_eq!(drive.gets(), 0);
}

#[tokio::test]
async fn test_full_match_ignores_result_order() {
    let mut store = report_store();
    store.insert(0, RemoteNode::folder("X1", "me").with_parent("X0"));
    store.insert(1, RemoteNode::file("X2", "unrelated.txt").with_parent("P1"));
    store.reverse();

    let drive = Arc::new(FakeDrive::new(store));
    let (resolver, _) = resolver(drive, None);

    assert_eq!(resolver.resolve("/Users/me/report.pdf").await.unwrap(), full("F1"));
}

#[tokio::test]
async fn test_missing_ancestor_is_partial() {
    let store = vec![
        RemoteNode::file("F1", "report.pdf").with_parent("P1"),
        RemoteNode::folder("P1", "me").with_parent("P9"),
        RemoteNode::folder("P0", "Users").at_root(),
    ];
    let drive = Arc::new(FakeDrive::new(store));
    let (resolver, _) = resolver(drive.clone(), None);

    let result = resolver.resolve("/Users/me/report.pdf").await.unwrap();
    assert_eq!(result, partial("F1", 1));
    assert_eq!(drive.looked_up(), ["P9"]);
}

#[tokio::test]
async fn test_missing_leaf_is_none() {
    let store = vec![
        RemoteNode::folder("A", "a").at_root(),
        RemoteNode::folder("B", "b").with_parent("A"),
        RemoteNode::folder("M", "missing.txt").with_parent("B"),
    ];
    let drive = Arc::new(FakeDrive::new(store));
    let (resolver, _) = resolver(drive, None);

    let result = resolver.resolve("/a/b/missing.txt").await.unwrap();
    assert_eq!(result, MatchResult::None);
    assert_eq!(result.file_id(), None);
}

#[tokio::test]
async fn test_empty_search_is_none() {
    let drive = Arc::new(FakeDrive::new(Vec::new()));
    let (resolver, _) = resolver(drive.clone(), None);

    assert_eq!(resolver.resolve("/nothing/here.txt").await.unwrap(), MatchResult::None);
    assert_eq!(drive.searches(), 1);
}

#[tokio::test]
async fn test_no_usable_segments_makes_no_requests() {
    let drive = Arc::new(FakeDrive::new(report_store()));
    let (resolver, _) = resolver(drive.clone(), None);

    for path in ["", "/", "//", "C:", "/C:/", "/d:/E:/"] {
        assert_eq!(resolver.resolve(path).await.unwrap(), MatchResult::None, "{path:?}");
    }
    assert_eq!(drive.calls(), 0);
}

#[tokio::test]
async fn test_no_credential_is_login_without_requests() {
    let drive = Arc::new(FakeDrive::new(report_store()));
    let store = Arc::new(MemoryStore::default());
    let resolver = PathResolver::new(drive.clone(), store.clone(), store);

    for path in ["/Users/me/report.pdf", "", "/C:/"] {
        assert_eq!(resolver.resolve(path).await.unwrap(), MatchResult::Login);
    }
    assert_eq!(drive.calls(), 0);
}

#[tokio::test]
async fn test_drive_letter_is_skipped() {
    let drive = Arc::new(FakeDrive::new(report_store()));
    let (resolver, _) = resolver(drive, None);

    assert_eq!(resolver.resolve("/C:/Users/me/report.pdf").await.unwrap(), full("F1"));
}

#[tokio::test]
async fn test_configured_root_anchors_chain_early() {
    // Local prefix "/home/alice/Drive" does not exist remotely.
    let store = vec![
        RemoteNode::file("F1", "report.pdf").with_parent("P1"),
        RemoteNode::folder("P1", "me").with_parent("ROOT"),
        RemoteNode::folder("ROOT", "My Drive"),
    ];
    let drive = Arc::new(FakeDrive::new(store));
    let (resolver, _) = resolver(drive.clone(), Some("ROOT"));

    let result = resolver.resolve("/home/alice/Drive/me/report.pdf").await.unwrap();
    assert_eq!(result, full("F1"));
    assert_eq!(drive.gets(), 0);
}

#[tokio::test]
async fn test_looked_up_root_level_parent_is_full() {
    let store = vec![
        RemoteNode::file("F1", "report.pdf").with_parent("P1"),
        RemoteNode::folder("P1", "me").with_parent("ROOT"),
        RemoteNode::folder("ROOT", "My Drive").at_root(),
    ];
    let drive = Arc::new(FakeDrive::new(store));
    let (resolver, _) = resolver(drive.clone(), None);

    let result = resolver.resolve("/Users/alice/me/report.pdf").await.unwrap();
    assert_eq!(result, full("F1"));
    assert_eq!(drive.looked_up(), ["ROOT"]);
}

#[tokio::test]
async fn test_looked_up_parent_with_unknown_parents_is_partial() {
    let store = vec![
        RemoteNode::file("F1", "report.pdf").with_parent("P1"),
        RemoteNode::folder("P1", "me").with_parent("S1"),
        RemoteNode::folder("S1", "Shared"),
    ];
    let drive = Arc::new(FakeDrive::new(store));
    let (resolver, _) = resolver(drive, None);

    let result = resolver.resolve("/Users/me/report.pdf").await.unwrap();
    assert_eq!(result, partial("F1", 1));
}

#[tokio::test]
async fn test_looked_up_parent_with_parents_is_partial() {
    let store = vec![
        RemoteNode::file("F1", "report.pdf").with_parent("P1"),
        RemoteNode::folder("P1", "me").with_parent("Q1"),
        RemoteNode::folder("Q1", "Projects").with_parent("Q0"),
        RemoteNode::folder("Q0", "Work").at_root(),
    ];
    let drive = Arc::new(FakeDrive::new(store));
    let (resolver, _) = resolver(drive, None);

    let result = resolver.resolve("/Users/me/report.pdf").await.unwrap();
    assert_eq!(result, partial("F1", 1));
}

#[tokio::test]
async fn test_name_mismatch_is_partial() {
    // x.txt lives directly in "a", but the path expects "b" there.
    let store = vec![
        RemoteNode::folder("A", "a").at_root(),
        RemoteNode::folder("B", "b").with_parent("A"),
        RemoteNode::file("X", "x.txt").with_parent("A"),
    ];
    let drive = Arc::new(FakeDrive::new(store));
    let (resolver, _) = resolver(drive.clone(), None);

    assert_eq!(resolver.resolve("/a/b/x.txt").await.unwrap(), partial("X", 0));
    assert_eq!(drive.gets(), 0);
}

#[tokio::test]
async fn test_single_segment_is_full() {
    let store = vec![RemoteNode::file("F", "notes.txt").with_parent("SOMEWHERE")];
    let drive = Arc::new(FakeDrive::new(store));
    let (resolver, _) = resolver(drive.clone(), None);

    assert_eq!(resolver.resolve("/notes.txt").await.unwrap(), full("F"));
    assert_eq!(drive.gets(), 0);
}

#[tokio::test]
async fn test_duplicate_names_disambiguated_by_structure() {
    // Two report.pdf files; only the second sits under Users/me.
    let store = vec![
        RemoteNode::file("WRONG", "report.pdf").with_parent("T1"),
        RemoteNode::folder("T1", "me").with_parent("T0"),
        RemoteNode::folder("T0", "Archive").with_parent("R"),
        RemoteNode::file("RIGHT", "report.pdf").with_parent("P1"),
        RemoteNode::folder("P1", "me").with_parent("P0"),
        RemoteNode::folder("P0", "Users").at_root(),
    ];
    let drive = Arc::new(FakeDrive::new(store));
    let (resolver, _) = resolver(drive, None);

    assert_eq!(resolver.resolve("/Users/me/report.pdf").await.unwrap(), full("RIGHT"));
}

#[tokio::test]
async fn test_first_full_candidate_wins() {
    let store = vec![
        RemoteNode::file("FIRST", "a.txt").at_root(),
        RemoteNode::file("SECOND", "a.txt").with_parent("D"),
        RemoteNode::folder("D", "dir").at_root(),
    ];
    let drive = Arc::new(FakeDrive::new(store));
    let (resolver, _) = resolver(drive, None);

    assert_eq!(resolver.resolve("/dir/a.txt").await.unwrap(), full("FIRST"));
}

#[tokio::test]
async fn test_deepest_partial_wins_and_is_stable() {
    // Path /x/y/z/f.txt; candidate A breaks at depth 0, B reaches depth 2,
    // C also reaches depth 2 but was discovered later.
    let store = vec![
        RemoteNode::file("A", "f.txt").with_parent("Z_ELSEWHERE"),
        RemoteNode::file("B", "f.txt").with_parent("Z1"),
        RemoteNode::file("C", "f.txt").with_parent("Z2"),
        RemoteNode::folder("Z1", "z").with_parent("Y1"),
        RemoteNode::folder("Y1", "y").with_parent("GONE"),
        RemoteNode::folder("Z2", "z").with_parent("Y2"),
        RemoteNode::folder("Y2", "y").with_parent("GONE"),
        RemoteNode::folder("Z_ELSEWHERE", "other").with_parent("GONE"),
    ];
    let drive = Arc::new(FakeDrive::new(store).hide_from_search("Z_ELSEWHERE"));
    let (resolver, _) = resolver(drive, None);

    for _ in 0..5 {
        let result = resolver.resolve("/x/y/z/f.txt").await.unwrap();
        assert_eq!(result, partial("B", 2));
        assert_eq!(result.match_type(), MatchType::Partial);
    }
}

#[tokio::test]
async fn test_unauthorized_search_invalidates_token() {
    let drive = Arc::new(FakeDrive::new(report_store()).fail_search(Failure::Unauthorized));
    let (resolver, store) = resolver(drive, None);

    assert_eq!(resolver.resolve("/Users/me/report.pdf").await.unwrap(), MatchResult::Login);
    assert_eq!(store.token().await, None);
}

#[tokio::test]
async fn test_unauthorized_parent_lookup_is_login_not_partial() {
    let store = vec![
        RemoteNode::file("F1", "report.pdf").with_parent("P1"),
        RemoteNode::folder("P1", "me").with_parent("P9"),
    ];
    let drive = Arc::new(FakeDrive::new(store).fail_get(Failure::Unauthorized));
    let (resolver, store) = resolver(drive.clone(), None);

    assert_eq!(resolver.resolve("/Users/me/report.pdf").await.unwrap(), MatchResult::Login);
    assert!(!store.has_token());

    // Signed out now: no further requests.
    let before = drive.calls();
    assert_eq!(resolver.resolve("/Users/me/report.pdf").await.unwrap(), MatchResult::Login);
    assert_eq!(drive.calls(), before);
}

#[tokio::test]
async fn test_service_error_propagates() {
    let drive = Arc::new(FakeDrive::new(report_store()).fail_search(Failure::Status(500)));
    let (resolver, store) = resolver(drive, None);

    let err = resolver.resolve("/Users/me/report.pdf").await.unwrap_err();
    assert!(matches!(err, ResolveError::Service { status: 500, .. }));
    assert!(store.has_token());
}

#[tokio::test]
async fn test_parent_lookup_service_error_propagates() {
    let store = vec![
        RemoteNode::file("F1", "report.pdf").with_parent("P1"),
        RemoteNode::folder("P1", "me").with_parent("P9"),
    ];
    let drive = Arc::new(FakeDrive::new(store).fail_get(Failure::Status(503)));
    let (resolver, _) = resolver(drive, None);

    let err = resolver.resolve("/Users/me/report.pdf").await.unwrap_err();
    assert!(matches!(err, ResolveError::Service { status: 503, .. }));
}
