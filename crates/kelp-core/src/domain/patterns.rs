//! Validation patterns shared by prompts and value objects.
//!
//! Each pattern is compiled once on first use.

use std::sync::LazyLock;

use regex::Regex;

/// Package identifiers: letters, digits, `-`, `_`, `@`, `~`, `.` and the scope separator `/`.
pub static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\-_@~./]+$").unwrap());

/// SPDX license expressions, `UNKNOWN`, or `SEE LICENSE IN <file>`.
pub static LICENSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:UNKNOWN|SEE LICENSE IN \S+|\(?[A-Za-z0-9][A-Za-z0-9.\-]*\+?(?: (?:AND|OR|WITH) \(?[A-Za-z0-9][A-Za-z0-9.\-]*\+?\)?)*\)?)$",
    )
    .unwrap()
});

/// GitHub repositories in `<owner>/<name>` form.
pub static REPOSITORY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9\-]{0,38})/[A-Za-z0-9._\-]+$").unwrap()
});

/// Compiler targets: `es` followed by a year/version number or `next`.
pub static COMPILER_TARGET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^es(?:\d+|next)$").unwrap());

pub static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub static USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9_\-.]{0,38})$").unwrap());

/// `y`, `yes`, `n` or `no`, any case.
pub static CONFIRMATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:y|yes|n|no)$").unwrap());

/// Web addresses with an optional `http://` or `https://` scheme.
pub static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:https?://)?(?:[a-z0-9](?:[a-z0-9\-]*[a-z0-9])?\.)+[a-z]{2,}(?::\d{1,5})?(?:[/?#]\S*)?$")
        .unwrap()
});

/// International phone numbers: optional `+`, digits, and ` ().-` separators.
pub static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 ().\-]{5,18}[0-9]$").unwrap());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_accepts_scoped_names() {
        assert!(IDENTIFIER.is_match("my-lib"));
        assert!(IDENTIFIER.is_match("@scope/my_lib.v2~x"));
        assert!(!IDENTIFIER.is_match("my lib"));
        assert!(!IDENTIFIER.is_match(""));
    }

    #[test]
    fn license_accepts_spdx_and_special_forms() {
        for ok in [
            "MIT",
            "Apache-2.0",
            "GPL-3.0-or-later",
            "GPL-2.0+",
            "(MIT OR Apache-2.0)",
            "Apache-2.0 WITH LLVM-exception",
            "UNKNOWN",
            "SEE LICENSE IN LICENSE.txt",
        ] {
            assert!(LICENSE.is_match(ok), "rejected {ok}");
        }
        for bad in ["", "MIT or", "SEE LICENSE IN", "two words"] {
            assert!(!LICENSE.is_match(bad), "accepted {bad}");
        }
    }

    #[test]
    fn repository_requires_owner_and_name() {
        assert!(REPOSITORY.is_match("octocat/hello-world"));
        assert!(!REPOSITORY.is_match("hello-world"));
        assert!(!REPOSITORY.is_match("a/b/c"));
        assert!(!REPOSITORY.is_match("-bad/name"));
    }

    #[test]
    fn compiler_target_is_case_insensitive() {
        for ok in ["ESNext", "esnext", "ES2022", "es5", "eS6"] {
            assert!(COMPILER_TARGET.is_match(ok), "rejected {ok}");
        }
        for bad in ["es", "ES20x", "next", "es2022next"] {
            assert!(!COMPILER_TARGET.is_match(bad), "accepted {bad}");
        }
    }

    #[test]
    fn misc_patterns() {
        assert!(EMAIL.is_match("dev@example.com"));
        assert!(!EMAIL.is_match("dev@example"));
        assert!(USERNAME.is_match("octocat"));
        assert!(USERNAME.is_match("octo-cat_2"));
        assert!(!USERNAME.is_match("-octocat"));
    }

    #[test]
    fn confirmation_url_and_phone() {
        for ok in ["y", "Yes", "N", "no"] {
            assert!(CONFIRMATION.is_match(ok), "rejected {ok}");
        }
        assert!(!CONFIRMATION.is_match("yep"));

        for ok in ["https://example.com", "example.com/docs?q=1", "http://api.example.dev:8080/v1"] {
            assert!(URL.is_match(ok), "rejected {ok}");
        }
        for bad in ["not a url", "ftp://example.com", "example", "https://"] {
            assert!(!URL.is_match(bad), "accepted {bad}");
        }

        for ok in ["+1 (555) 123-4567", "+44 20 7946 0958", "030.1234.5678"] {
            assert!(PHONE.is_match(ok), "rejected {ok}");
        }
        for bad in ["12", "555-CALL", "+", "123456789012345678901234"] {
            assert!(!PHONE.is_match(bad), "accepted {bad}");
        }
    }
}
