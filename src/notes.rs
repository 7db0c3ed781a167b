// SPDX-License-Identifier: CC-BY-NC-ND-4.0

//! Release-notes scanner for the breaking-change marker

/// The phrase upstream uses to flag incompatible changes in release notes.
const BREAKING_CHANGE_MARKER: &str = "breaking change";

/// Scan release notes line by line for the breaking-change marker,
/// case-insensitively. Returns the first matching line so the verdict can
/// name it. Absent notes are not an error; there is just nothing to find.
pub fn find_breaking_change(notes: Option<&str>) -> Option<String> {
    let text = notes?;
    text.lines()
        .find(|line| line.to_lowercase().contains(BREAKING_CHANGE_MARKER))
        .map(str::to_owned)
}
