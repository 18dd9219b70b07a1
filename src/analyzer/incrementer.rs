use crate::domain::{Increment, PreRelease, Version, VersionLineage};
use crate::error::Result;

/// Compute the next version for a target branch.
///
/// The base version is the latest release bumped by `increment`, or `0.0.0`
/// when nothing has been released yet. Release targets get the base version
/// as-is. Prerelease targets get `<base>-<identifier>.<n>` where `n` continues
/// the current prerelease when it shares the base's major.minor and the same
/// identifier, and restarts at 0 otherwise.
///
/// Fails with `InvalidPrereleaseState` when the current prerelease's sequence
/// number cannot be read.
pub fn next_version(
    lineage: &VersionLineage,
    is_prerelease_target: bool,
    prerelease_identifier: &str,
    increment: Increment,
) -> Result<Version> {
    let base = match &lineage.latest_release {
        Some(current) => current.bump(increment),
        None => Version::zero(),
    };

    if !is_prerelease_target {
        return Ok(base);
    }

    let next = match &lineage.latest_prerelease {
        Some(current) if current.same_minor_line(&base) => {
            let state = current.prerelease()?;
            if state.identifier == prerelease_identifier {
                state.increment()
            } else {
                PreRelease::new(prerelease_identifier, 0)
            }
        }
        _ => PreRelease::new(prerelease_identifier, 0),
    };

    base.with_prerelease(&next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GitPromoteError;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn lineage(release: Option<&str>, prerelease: Option<&str>) -> VersionLineage {
        VersionLineage::new(release.map(v), prerelease.map(v))
    }

    #[test]
    fn test_next_version_table() {
        struct Case {
            name: &'static str,
            release: Option<&'static str>,
            prerelease: Option<&'static str>,
            prerelease_target: bool,
            increment: Increment,
            identifier: &'static str,
            want: &'static str,
        }

        let cases = vec![
            Case { name: "initial bump", release: None, prerelease: None, prerelease_target: false, increment: Increment::Patch, identifier: "prerelease", want: "0.0.0" },
            Case { name: "initial major ignored", release: None, prerelease: None, prerelease_target: false, increment: Increment::Major, identifier: "prerelease", want: "0.0.0" },
            Case { name: "no increment", release: Some("1.2.3"), prerelease: None, prerelease_target: false, increment: Increment::None, identifier: "prerelease", want: "1.2.3" },
            Case { name: "release patch", release: Some("1.2.3"), prerelease: None, prerelease_target: false, increment: Increment::Patch, identifier: "prerelease", want: "1.2.4" },
            Case { name: "release minor", release: Some("1.2.3"), prerelease: None, prerelease_target: false, increment: Increment::Minor, identifier: "prerelease", want: "1.3.0" },
            Case { name: "release major", release: Some("1.2.3"), prerelease: None, prerelease_target: false, increment: Increment::Major, identifier: "prerelease", want: "2.0.0" },
            Case { name: "prerelease patch", release: Some("1.2.3"), prerelease: None, prerelease_target: true, increment: Increment::Patch, identifier: "prerelease", want: "1.2.4-prerelease.0" },
            Case { name: "prerelease minor", release: Some("1.2.3"), prerelease: None, prerelease_target: true, increment: Increment::Minor, identifier: "prerelease", want: "1.3.0-prerelease.0" },
            Case { name: "prerelease major", release: Some("1.2.3"), prerelease: None, prerelease_target: true, increment: Increment::Major, identifier: "prerelease", want: "2.0.0-prerelease.0" },
            Case { name: "prerelease patch increment", release: Some("1.2.3"), prerelease: Some("1.2.4-prerelease.0"), prerelease_target: true, increment: Increment::Patch, identifier: "prerelease", want: "1.2.4-prerelease.1" },
            Case { name: "prerelease minor increment", release: Some("1.2.3"), prerelease: Some("1.3.0-prerelease.0"), prerelease_target: true, increment: Increment::Minor, identifier: "prerelease", want: "1.3.0-prerelease.1" },
            Case { name: "prerelease major increment", release: Some("1.2.3"), prerelease: Some("2.0.0-prerelease.0"), prerelease_target: true, increment: Increment::Major, identifier: "prerelease", want: "2.0.0-prerelease.1" },
            Case { name: "minor from patch lineage", release: Some("1.2.3"), prerelease: Some("1.2.4-prerelease.0"), prerelease_target: true, increment: Increment::Minor, identifier: "prerelease", want: "1.3.0-prerelease.0" },
            Case { name: "major from patch lineage", release: Some("1.2.3"), prerelease: Some("1.2.4-prerelease.0"), prerelease_target: true, increment: Increment::Major, identifier: "prerelease", want: "2.0.0-prerelease.0" },
            Case { name: "identifier change", release: Some("1.2.3"), prerelease: Some("1.2.4-prerelease.0"), prerelease_target: true, increment: Increment::Patch, identifier: "alpha", want: "1.2.4-alpha.0" },
            Case { name: "identifier change with increment", release: Some("1.2.3"), prerelease: Some("1.2.4-prerelease.0"), prerelease_target: true, increment: Increment::Minor, identifier: "alpha", want: "1.3.0-alpha.0" },
            Case { name: "first prerelease of empty repo", release: None, prerelease: None, prerelease_target: true, increment: Increment::Minor, identifier: "drc", want: "0.0.0-drc.0" },
        ];

        for case in cases {
            let got = next_version(
                &lineage(case.release, case.prerelease),
                case.prerelease_target,
                case.identifier,
                case.increment,
            )
            .unwrap_or_else(|e| panic!("{}: {}", case.name, e));
            assert_eq!(got.to_string(), case.want, "{}", case.name);
        }
    }

    #[test]
    fn test_prerelease_lineage_sequence() {
        let first = next_version(&lineage(Some("1.2.3"), None), true, "rc", Increment::Patch).unwrap();
        assert_eq!(first.to_string(), "1.2.4-rc.0");

        let second = next_version(
            &VersionLineage::new(Some(v("1.2.3")), Some(first)),
            true,
            "rc",
            Increment::Patch,
        )
        .unwrap();
        assert_eq!(second.to_string(), "1.2.4-rc.1");

        let changed_lane = next_version(
            &VersionLineage::new(Some(v("1.2.3")), Some(second)),
            true,
            "beta",
            Increment::Patch,
        )
        .unwrap();
        assert_eq!(changed_lane.to_string(), "1.2.4-beta.0");
    }

    #[test]
    fn test_invalid_prerelease_number() {
        let err = next_version(
            &lineage(Some("1.2.3"), Some("1.2.4-prerelease.G")),
            true,
            "prerelease",
            Increment::Patch,
        )
        .unwrap_err();
        assert!(matches!(err, GitPromoteError::InvalidPrereleaseState { .. }));
    }

    #[test]
    fn test_invalid_prerelease_ignored_on_release_target() {
        let got = next_version(
            &lineage(Some("1.2.3"), Some("1.2.4-prerelease.G")),
            false,
            "prerelease",
            Increment::Patch,
        )
        .unwrap();
        assert_eq!(got, v("1.2.4"));
    }

    #[test]
    fn test_invalid_prerelease_on_other_minor_line_restarts() {
        let got = next_version(
            &lineage(Some("1.2.3"), Some("1.2.4-prerelease.G")),
            true,
            "prerelease",
            Increment::Minor,
        )
        .unwrap();
        assert_eq!(got.to_string(), "1.3.0-prerelease.0");
    }
}
