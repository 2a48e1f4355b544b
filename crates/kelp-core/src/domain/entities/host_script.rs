//! In-memory model of a host automation script (`@Build.js`, `@Run.js`, ...).
//!
//! A host script is a single exported handler. Its body may hold one
//! placeholder statement, tagged with [`PLACEHOLDER_MARKER`], that fails the
//! script until real behaviour is merged in. Merged fragments are appended at
//! the end of the handler body, so call order is execution order.
//!
//! Merging is append-always: the same fragment merged twice runs twice.

use crate::domain::{error::DomainError, value_objects::ScriptName};

/// Comment that marks the host's placeholder statement.
pub const PLACEHOLDER_MARKER: &str = "// @default";

const INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostScript {
    name: ScriptName,
    lines: Vec<String>,
    line_ending: &'static str,
    trailing_newline: bool,
}

impl HostScript {
    /// Lines are rendered back with the terminator the source used (`\r\n` or `\n`).
    pub fn parse(name: ScriptName, source: &str) -> Self {
        Self {
            name,
            lines: source.lines().map(str::to_owned).collect(),
            line_ending: if source.contains("\r\n") { "\r\n" } else { "\n" },
            trailing_newline: source.ends_with('\n'),
        }
    }

    /// The script as the host writes it before any generator has touched it.
    pub fn placeholder(name: ScriptName) -> Self {
        let source = format!(
            "module.exports = async (modules, cmd, spawn, exit, error) => {{\n\
             {INDENT}error('The {name} script has not been set up yet') {PLACEHOLDER_MARKER}\n\
             }}\n"
        );
        Self::parse(name, &source)
    }

    pub fn name(&self) -> &ScriptName {
        &self.name
    }

    pub fn has_placeholder(&self) -> bool {
        self.lines.iter().any(|l| is_placeholder(l))
    }

    /// Drop the placeholder statement. Returns `false` if there was none.
    pub fn remove_default(&mut self) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| !is_placeholder(l));
        self.lines.len() != before
    }

    /// Append `code` to the end of the handler body.
    pub fn merge(&mut self, code: &str) -> Result<(), DomainError> {
        let close = self
            .lines
            .iter()
            .rposition(|l| l.trim_start().starts_with('}'))
            .ok_or_else(|| DomainError::MalformedScript {
                script: self.name.to_string(),
                reason: "no closing brace for the handler body".into(),
            })?;

        let closing = &self.lines[close];
        let indent = format!(
            "{}{INDENT}",
            &closing[..closing.len() - closing.trim_start().len()]
        );

        let fragment: Vec<String> = code
            .lines()
            .map(|line| {
                if line.trim().is_empty() {
                    String::new()
                } else {
                    format!("{indent}{line}")
                }
            })
            .collect();

        self.lines.splice(close..close, fragment);
        Ok(())
    }

    pub fn render(&self) -> String {
        let mut out = self.lines.join(self.line_ending);
        if self.trailing_newline {
            out.push_str(self.line_ending);
        }
        out
    }
}

fn is_placeholder(line: &str) -> bool {
    line.trim_end().ends_with(PLACEHOLDER_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script() -> HostScript {
        HostScript::placeholder(ScriptName::new("Run").unwrap())
    }

    #[test]
    fn placeholder_script_has_marker() {
        let script = run_script();
        assert!(script.has_placeholder());
        assert!(script.render().contains("The Run script has not been set up yet"));
        assert!(script.render().ends_with("}\n"));
    }

    #[test]
    fn remove_default_is_idempotent() {
        let mut script = run_script();
        assert!(script.remove_default());
        let once = script.render();
        assert!(!script.remove_default());
        assert_eq!(script.render(), once);
        assert!(!once.contains(PLACEHOLDER_MARKER));
    }

    #[test]
    fn merges_execute_in_call_order() {
        let mut script = run_script();
        script.remove_default();
        script.merge("first()").unwrap();
        script.merge("second()").unwrap();

        let out = script.render();
        let first = out.find("    first()").unwrap();
        let second = out.find("    second()").unwrap();
        assert!(first < second);
        assert!(second < out.rfind('}').unwrap());
        assert!(!out.contains("error("));
    }

    #[test]
    fn merge_keeps_placeholder_when_not_removed() {
        let mut script = HostScript::placeholder(ScriptName::new("Prep").unwrap());
        script.merge("await cmd('tsc')").unwrap();
        let out = script.render();
        assert!(out.find(PLACEHOLDER_MARKER).unwrap() < out.find("await cmd('tsc')").unwrap());
    }

    #[test]
    fn duplicate_merge_appends_twice() {
        let mut script = run_script();
        script.merge("again()").unwrap();
        script.merge("again()").unwrap();
        assert_eq!(script.render().matches("again()").count(), 2);
    }

    #[test]
    fn multi_line_fragments_are_indented() {
        let mut script = run_script();
        script.remove_default();
        script.merge("if (x) {\n    go()\n}").unwrap();
        assert!(
            script
                .render()
                .contains("    if (x) {\n        go()\n    }\n}")
        );
    }

    #[test]
    fn merge_before_wrapped_closing_line() {
        let source = "run(async () => {\n    setup()\n});\n";
        let mut script = HostScript::parse(ScriptName::new("Run").unwrap(), source);
        script.merge("go()").unwrap();
        assert_eq!(script.render(), "run(async () => {\n    setup()\n    go()\n});\n");
    }

    #[test]
    fn merge_without_closing_brace_is_malformed() {
        let mut script = HostScript::parse(ScriptName::new("Run").unwrap(), "error('x')\n");
        assert!(matches!(
            script.merge("go()"),
            Err(DomainError::MalformedScript { .. })
        ));
    }

    #[test]
    fn render_preserves_missing_trailing_newline() {
        let script = HostScript::parse(ScriptName::new("Build").unwrap(), "a\n}");
        assert_eq!(script.render(), "a\n}");
    }

    #[test]
    fn crlf_scripts_keep_their_line_endings() {
        let source = "module.exports = async () => {\r\n    error('x') // @default\r\n}\r\n";
        let mut script = HostScript::parse(ScriptName::new("Run").unwrap(), source);
        script.remove_default();
        script.merge("first()\nsecond()").unwrap();

        assert_eq!(
            script.render(),
            "module.exports = async () => {\r\n    first()\r\n    second()\r\n}\r\n"
        );
    }
}
