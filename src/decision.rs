// SPDX-License-Identifier: CC-BY-NC-ND-4.0

//! Update-eligibility decision engine
//!
//! Pure function of the current version, the latest release snapshot, the
//! clock and the policy. All I/O and process lifecycle live in the caller;
//! the engine only produces a [`Decision`].

use crate::notes::find_breaking_change;
use crate::release::ReleaseInfo;
use crate::version::SemVersion;
use chrono::{DateTime, Utc};

/// Update policy knobs. Not mutated at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdatePolicy {
    /// Minimum whole days that must elapse after a release's publish time
    /// before it is eligible for automatic application.
    pub delay_days: u32,
}

impl Default for UpdatePolicy {
    fn default() -> Self {
        Self { delay_days: 3 }
    }
}

/// The engine's output: proceed, or defer with a reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Proceed,
    SkipMajorChange,
    SkipNoChange,
    SkipBreakingChange {
        /// The release-notes line that carried the marker.
        line: String,
    },
    SkipDelayNotElapsed {
        elapsed_days: i64,
    },
}

/// A verdict together with the two versions it compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub current: SemVersion,
    pub latest: SemVersion,
    pub verdict: Verdict,
    pub delay_days: u32,
}

impl Decision {
    pub fn should_proceed(&self) -> bool {
        matches!(self.verdict, Verdict::Proceed)
    }

    /// Operator-facing explanation of the verdict.
    pub fn explanation(&self) -> String {
        match &self.verdict {
            Verdict::Proceed => format!(
                "Proceeding with update from v{} to v{}.",
                self.current, self.latest
            ),
            Verdict::SkipMajorChange => format!(
                "Detected a major version change (v{} -> v{}). Update will not proceed.",
                self.current, self.latest
            ),
            Verdict::SkipNoChange => format!(
                "No update needed. The version is up-to-date (current v{}, latest v{}).",
                self.current, self.latest
            ),
            Verdict::SkipBreakingChange { line } => format!(
                "Breaking change detected in v{} release notes ({}). Update will not proceed.",
                self.latest,
                line.trim()
            ),
            Verdict::SkipDelayNotElapsed { elapsed_days } => format!(
                "Update to v{} will not proceed; waiting period of {} days not met ({} elapsed).",
                self.latest, self.delay_days, elapsed_days
            ),
        }
    }
}

/// Decide whether updating from `current` to `release` is safe right now.
///
/// Rules apply in strict order, first match wins:
/// 1. A cross-major change is never applied automatically.
/// 2. Equal minor and patch means nothing to do. An older latest within the
///    same major and an identical latest both land here; the engine does not
///    distinguish "latest is behind" from "no change".
/// 3. On a minor-version change, release notes carrying the breaking-change
///    marker block the update. Patch-only changes skip this scan: the marker
///    would have been caught when the minor release first appeared.
/// 4. The release must have been published at least `delay_days` whole days
///    ago. Truncating day arithmetic: 23h59m counts as zero days.
pub fn decide(
    current: SemVersion,
    release: &ReleaseInfo,
    now: DateTime<Utc>,
    policy: &UpdatePolicy,
) -> Decision {
    let latest = release.version;
    let decision = |verdict| Decision {
        current,
        latest,
        verdict,
        delay_days: policy.delay_days,
    };

    if latest.major != current.major {
        return decision(Verdict::SkipMajorChange);
    }

    if latest.minor == current.minor && latest.patch == current.patch {
        return decision(Verdict::SkipNoChange);
    }

    if latest.minor != current.minor
        && let Some(line) = find_breaking_change(release.notes.as_deref())
    {
        return decision(Verdict::SkipBreakingChange { line });
    }

    let elapsed_days = now.signed_duration_since(release.published_at).num_days();
    if elapsed_days < i64::from(policy.delay_days) {
        return decision(Verdict::SkipDelayNotElapsed { elapsed_days });
    }

    decision(Verdict::Proceed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn release(tag: &str, notes: Option<&str>, published_days_ago: i64) -> ReleaseInfo {
        ReleaseInfo {
            tag: tag.to_owned(),
            version: SemVersion::from_tag(tag).unwrap(),
            notes: notes.map(str::to_owned),
            published_at: Utc::now() - Duration::days(published_days_ago),
        }
    }

    fn policy(delay_days: u32) -> UpdatePolicy {
        UpdatePolicy { delay_days }
    }

    #[test]
    fn test_major_change_always_skipped() {
        // Notes, publish time and policy are irrelevant on a major change.
        let rel = release("v2.0.0", Some("BREAKING CHANGE everywhere"), 100);
        let d = decide(SemVersion::new(1, 118, 0), &rel, Utc::now(), &policy(0));
        assert_eq!(d.verdict, Verdict::SkipMajorChange);

        let rel = release("v0.9.9", None, 100);
        let d = decide(SemVersion::new(1, 118, 0), &rel, Utc::now(), &policy(0));
        assert_eq!(d.verdict, Verdict::SkipMajorChange);
    }

    #[test]
    fn test_identical_version_is_no_change() {
        let rel = release("v1.118.0", None, 100);
        let d = decide(SemVersion::new(1, 118, 0), &rel, Utc::now(), &policy(0));
        assert_eq!(d.verdict, Verdict::SkipNoChange);
    }

    #[test]
    fn test_older_latest_same_minor_patch_is_no_change() {
        // Latest behind current is conflated with no change when minor and
        // patch match; a known limitation carried over deliberately.
        let rel = release("v1.118.0", None, 100);
        let d = decide(SemVersion::new(1, 118, 0), &rel, Utc::now(), &policy(3));
        assert_eq!(d.verdict, Verdict::SkipNoChange);
    }

    #[test]
    fn test_minor_change_with_breaking_marker_skipped() {
        let notes = "- improved search\n- BREAKING CHANGE: config key renamed";
        let rel = release("v1.119.0", Some(notes), 10);
        let d = decide(SemVersion::new(1, 118, 0), &rel, Utc::now(), &policy(3));
        assert!(matches!(d.verdict, Verdict::SkipBreakingChange { .. }));
    }

    #[test]
    fn test_minor_change_marker_any_case() {
        let rel = release("v1.119.0", Some("a Breaking Change slipped in"), 10);
        let d = decide(SemVersion::new(1, 118, 0), &rel, Utc::now(), &policy(3));
        assert!(matches!(d.verdict, Verdict::SkipBreakingChange { .. }));
    }

    #[test]
    fn test_minor_change_without_marker_reaches_delay_check() {
        let rel = release("v1.119.0", Some("- faster uploads"), 1);
        let d = decide(SemVersion::new(1, 118, 0), &rel, Utc::now(), &policy(3));
        assert_eq!(d.verdict, Verdict::SkipDelayNotElapsed { elapsed_days: 1 });

        let rel = release("v1.119.0", None, 1);
        let d = decide(SemVersion::new(1, 118, 0), &rel, Utc::now(), &policy(3));
        assert_eq!(d.verdict, Verdict::SkipDelayNotElapsed { elapsed_days: 1 });
    }

    #[test]
    fn test_patch_only_change_never_scans_notes() {
        // Marker inherited from the minor bump's notes must not block a
        // patch-only update.
        let notes = "BREAKING CHANGE: from the .0 release";
        let rel = release("v1.118.1", Some(notes), 10);
        let d = decide(SemVersion::new(1, 118, 0), &rel, Utc::now(), &policy(3));
        assert_eq!(d.verdict, Verdict::Proceed);
    }

    #[test]
    fn test_delay_threshold_boundary() {
        let current = SemVersion::new(1, 118, 0);

        let rel = release("v1.119.0", None, 2);
        let d = decide(current, &rel, Utc::now(), &policy(3));
        assert_eq!(d.verdict, Verdict::SkipDelayNotElapsed { elapsed_days: 2 });

        let rel = release("v1.119.0", None, 3);
        let d = decide(current, &rel, Utc::now(), &policy(3));
        assert_eq!(d.verdict, Verdict::Proceed);

        let rel = release("v1.119.0", None, 5);
        let d = decide(current, &rel, Utc::now(), &policy(3));
        assert_eq!(d.verdict, Verdict::Proceed);
    }

    #[test]
    fn test_zero_delay_proceeds_immediately() {
        let rel = release("v1.119.0", None, 0);
        let d = decide(SemVersion::new(1, 118, 0), &rel, Utc::now(), &policy(0));
        assert_eq!(d.verdict, Verdict::Proceed);
    }

    #[test]
    fn test_elapsed_days_truncate() {
        // 23h59m elapsed is zero whole days.
        let now = Utc::now();
        let rel = ReleaseInfo {
            tag: "v1.119.0".to_owned(),
            version: SemVersion::new(1, 119, 0),
            notes: None,
            published_at: now - (Duration::hours(23) + Duration::minutes(59)),
        };
        let d = decide(SemVersion::new(1, 118, 0), &rel, now, &policy(1));
        assert_eq!(d.verdict, Verdict::SkipDelayNotElapsed { elapsed_days: 0 });

        // One more minute tips it over.
        let rel = ReleaseInfo {
            published_at: now - Duration::hours(24),
            ..rel
        };
        let d = decide(SemVersion::new(1, 118, 0), &rel, now, &policy(1));
        assert_eq!(d.verdict, Verdict::Proceed);
    }

    #[test]
    fn test_explanations_name_both_versions() {
        let rel = release("v2.0.0", None, 10);
        let d = decide(SemVersion::new(1, 118, 0), &rel, Utc::now(), &policy(3));
        let msg = d.explanation();
        assert!(msg.contains("v1.118.0"));
        assert!(msg.contains("v2.0.0"));
    }

    // End-to-end scenarios against the published feed shapes.

    #[test]
    fn test_scenario_up_to_date() {
        let rel = release("v1.118.0", None, 30);
        let d = decide(SemVersion::new(1, 118, 0), &rel, Utc::now(), &policy(3));
        assert_eq!(d.verdict, Verdict::SkipNoChange);
    }

    #[test]
    fn test_scenario_major_bump() {
        let rel = release("v2.0.0", None, 30);
        let d = decide(SemVersion::new(1, 118, 0), &rel, Utc::now(), &policy(3));
        assert_eq!(d.verdict, Verdict::SkipMajorChange);
    }

    #[test]
    fn test_scenario_breaking_minor_bump() {
        let notes = "- improved search\n- BREAKING CHANGE: config key renamed";
        let rel = release("v1.119.0", Some(notes), 10);
        let d = decide(SemVersion::new(1, 118, 0), &rel, Utc::now(), &policy(3));
        assert!(matches!(d.verdict, Verdict::SkipBreakingChange { .. }));
    }

    #[test]
    fn test_scenario_fresh_minor_bump_waits() {
        let rel = release("v1.119.0", Some("- improved search"), 1);
        let d = decide(SemVersion::new(1, 118, 0), &rel, Utc::now(), &policy(3));
        assert_eq!(d.verdict, Verdict::SkipDelayNotElapsed { elapsed_days: 1 });
    }

    #[test]
    fn test_scenario_settled_minor_bump_proceeds() {
        let rel = release("v1.119.0", Some("- improved search"), 5);
        let d = decide(SemVersion::new(1, 118, 0), &rel, Utc::now(), &policy(3));
        assert_eq!(d.verdict, Verdict::Proceed);
    }
}
