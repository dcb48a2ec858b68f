// SPDX-License-Identifier: MIT OR Apache-2.0
//! C wrapper template (signature-extraction). Input binding is scalar-only
//! (`int`, `long long`, `double`, `int*` with a leading size scalar) and
//! arrives over stdin rather than JSON, framed as whitespace-separated
//! tokens: each array parameter is preceded by its own length line. This
//! framing asymmetry (JSON in, whitespace stdin, JSON-ish `printf` out) is
//! deliberate: it is the one language where the wrapper has no JSON decoder
//! to lean on, so the harness binds values positionally instead.

/// The literal C wrapper source. `judge-executors::c` renders the
/// placeholders from the signature `judge-sigparse::c` recovers from the
/// user's source.
pub const C_WRAPPER_TEMPLATE: &str = r#"
#include <stdio.h>
#include <stdlib.h>

__USER_CODE_PLACEHOLDER__

__FUNCTION_SIGNATURE_PLACEHOLDER__;

int main(void) {
    __INPUT_DECLARATION_PLACEHOLDER__

    __INPUT_SCAN_PLACEHOLDER__

    __FUNCTION_CALL_PLACEHOLDER__

    __OUTPUT_PRINT_PLACEHOLDER__

    __CLEANUP_PLACEHOLDER__

    return 0;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_carries_every_placeholder_token() {
        for token in [
            "__USER_CODE_PLACEHOLDER__",
            "__FUNCTION_SIGNATURE_PLACEHOLDER__",
            "__INPUT_DECLARATION_PLACEHOLDER__",
            "__INPUT_SCAN_PLACEHOLDER__",
            "__FUNCTION_CALL_PLACEHOLDER__",
            "__OUTPUT_PRINT_PLACEHOLDER__",
            "__CLEANUP_PLACEHOLDER__",
        ] {
            assert!(C_WRAPPER_TEMPLATE.contains(token), "template missing token {token}");
        }
    }
}
