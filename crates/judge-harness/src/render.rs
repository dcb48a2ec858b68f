// SPDX-License-Identifier: MIT OR Apache-2.0
//! Placeholder substitution and the unresolved-placeholder hard invariant
//! (spec §4.2, §8, §9): any rendered program that still matches
//! `__..._PLACEHOLDER__` fails compilation deterministically, before it is
//! ever written into a workspace.

use judge_error::HarnessError;
use regex::Regex;
use std::sync::OnceLock;

/// A single `token -> replacement` substitution applied to a template.
pub struct Substitution<'a> {
    /// The literal placeholder token, e.g. `"__FUNCTION_NAME_PLACEHOLDER__"`.
    pub token: &'a str,
    /// The text to substitute in its place.
    pub replacement: String,
}

impl<'a> Substitution<'a> {
    /// Construct a substitution.
    pub fn new(token: &'a str, replacement: impl Into<String>) -> Self {
        Self {
            token,
            replacement: replacement.into(),
        }
    }
}

fn placeholder_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"__[A-Z0-9_]+_PLACEHOLDER__").expect("static pattern"))
}

/// Apply every substitution to `template` in order, then refuse to return a
/// program that still contains an unresolved placeholder token.
///
/// This is the single choke point every language executor renders through,
/// so the invariant is enforced once rather than re-implemented per
/// language.
pub fn render(template: &str, substitutions: &[Substitution<'_>]) -> Result<String, HarnessError> {
    let mut rendered = template.to_string();
    for sub in substitutions {
        rendered = rendered.replace(sub.token, &sub.replacement);
    }

    if let Some(m) = placeholder_pattern().find(&rendered) {
        return Err(HarnessError::UnresolvedPlaceholder(m.as_str().to_string()));
    }

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_every_token() {
        let template = "fn __NAME_PLACEHOLDER__() { __BODY_PLACEHOLDER__ }";
        let rendered = render(
            template,
            &[
                Substitution::new("__NAME_PLACEHOLDER__", "solve"),
                Substitution::new("__BODY_PLACEHOLDER__", "42"),
            ],
        )
        .unwrap();
        assert_eq!(rendered, "fn solve() { 42 }");
    }

    #[test]
    fn unresolved_placeholder_is_rejected() {
        let template = "fn __NAME_PLACEHOLDER__() { __BODY_PLACEHOLDER__ }";
        let err = render(template, &[Substitution::new("__NAME_PLACEHOLDER__", "solve")])
            .unwrap_err();
        assert!(matches!(err, HarnessError::UnresolvedPlaceholder(ref t) if t == "__BODY_PLACEHOLDER__"));
    }

    #[test]
    fn replacement_text_containing_placeholder_shape_still_leaks() {
        // A replacement that itself matches the placeholder pattern must
        // still be caught — the check runs on the final rendered text, not
        // just on the template's own tokens.
        let template = "__A_PLACEHOLDER__";
        let err = render(
            template,
            &[Substitution::new("__A_PLACEHOLDER__", "__B_PLACEHOLDER__")],
        )
        .unwrap_err();
        assert!(matches!(err, HarnessError::UnresolvedPlaceholder(ref t) if t == "__B_PLACEHOLDER__"));
    }
}
