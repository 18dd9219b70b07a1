use git_promote::boundary::BoundaryWarning;
use git_promote::domain::ReleaseTags;
use git_promote::domain::TagRef;

// ============================================================================
// BoundaryWarning Display Tests
// ============================================================================

#[test]
fn test_boundary_warning_no_release_display() {
    let display_msg = BoundaryWarning::NoReleaseVersion.to_string();
    assert!(
        display_msg.contains("No release version"),
        "Message should mention the missing release, got: {}",
        display_msg
    );
    assert!(display_msg.contains("v0.0.0"));
}

#[test]
fn test_boundary_warning_no_prerelease_display() {
    let warning = BoundaryWarning::NoPrereleaseVersion {
        identifier: "drc".to_string(),
    };
    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("'drc'"),
        "Message should name the identifier, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_unparsable_tag_display() {
    let warning = BoundaryWarning::UnparsableTag {
        tag: "release-123".to_string(),
    };
    let display_msg = warning.to_string();
    assert!(display_msg.contains("release-123"));
    assert!(display_msg.contains("not a semantic version"));
}

#[test]
fn test_boundary_warning_nothing_to_release_display() {
    let warning = BoundaryWarning::NothingToRelease {
        head: "develop".to_string(),
        base: "staging".to_string(),
        commits: 3,
    };
    let display_msg = warning.to_string();
    assert!(display_msg.contains("'develop'"));
    assert!(display_msg.contains("'staging'"));
    assert!(display_msg.contains("3 commit(s)"));
}

#[test]
fn test_boundary_warning_equality() {
    assert_eq!(BoundaryWarning::NoReleaseVersion, BoundaryWarning::NoReleaseVersion);
    assert_ne!(
        BoundaryWarning::NoPrereleaseVersion {
            identifier: "drc".to_string()
        },
        BoundaryWarning::NoPrereleaseVersion {
            identifier: "src".to_string()
        }
    );
}

// ============================================================================
// Boundary conditions in tag lineage
// ============================================================================

#[test]
fn test_unparsable_tags_are_ignored() {
    let tags = ReleaseTags::from_tags(vec![
        TagRef::new("nightly", "a"),
        TagRef::new("release-123", "b"),
        TagRef::new("v1.0.0", "c"),
    ]);
    assert_eq!(tags.latest_release().unwrap().tag.commit_id, "c");
}

#[test]
fn test_missing_lineage_is_not_found() {
    let tags = ReleaseTags::from_tags(Vec::new());
    assert!(tags.latest_release().unwrap_err().is_not_found());
    assert!(tags.latest_prerelease("drc").unwrap_err().is_not_found());

    let lineage = tags.lineage(Some("drc"));
    assert_eq!(lineage.latest_release, None);
    assert_eq!(lineage.latest_prerelease, None);
}
