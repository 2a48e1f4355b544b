use serde::{Deserialize, Serialize};

/// What the user told the host about themselves.
///
/// Every field is optional; blank strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentityContext {
    pub real_name: Option<String>,
    pub github_username: Option<String>,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub email: Option<String>,
}

impl IdentityContext {
    pub fn github_username(&self) -> Option<&str> {
        non_blank(&self.github_username)
    }

    pub fn name(&self) -> Option<&str> {
        non_blank(&self.name)
    }

    pub fn email(&self) -> Option<&str> {
        non_blank(&self.email)
    }

    /// Display name: `name`, falling back to the GitHub username.
    pub fn display_name(&self) -> Option<&str> {
        self.name().or_else(|| self.github_username())
    }

    /// Manifest `author` value, e.g. `Jane (https://github.com/jane)`.
    pub fn author(&self) -> String {
        match (self.display_name(), self.github_username()) {
            (Some(name), Some(user)) => format!("{name} (https://github.com/{user})"),
            (Some(name), None) => name.to_string(),
            (None, _) => String::new(),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
