// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

/// Extract the device variable name from a context field such as `"(scope)"`.
///
/// Surrounding whitespace and a single pair of enclosing parentheses are
/// removed. Returns `None` when no name is left.
///
/// ```
/// use codegenerator::parse_device_context;
///
/// assert_eq!(parse_device_context(" ( scope ) "), Some("scope"));
/// assert_eq!(parse_device_context("()"), None);
/// ```
pub fn parse_device_context(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(trimmed)
        .trim();
    (!inner.is_empty()).then_some(inner)
}
