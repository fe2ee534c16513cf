//! Supported execution languages and Java source heuristics.

use std::str::FromStr;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported language: {0}")]
pub struct UnsupportedLanguage(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Java,
    Cpp,
    Go,
}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "java" => Ok(Self::Java),
            "cpp" => Ok(Self::Cpp),
            "go" => Ok(Self::Go),
            other => Err(UnsupportedLanguage(other.to_string())),
        }
    }
}

/// First `class <Name>` occurrence in the source, if any.
///
/// Deliberately a text scan, not a parse: candidates paste incomplete or
/// broken Java all the time, and `javac` still needs the file named after
/// whatever class the snippet declares.
pub fn detect_java_class_name(source: &str) -> Option<String> {
    let mut rest = source;
    while let Some(pos) = rest.find("class") {
        let after = &rest[pos + "class".len()..];
        let trimmed = after.trim_start();
        // at least one whitespace between keyword and identifier
        if trimmed.len() < after.len() {
            let name: String = trimmed
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect();
            if !name.is_empty() {
                return Some(name);
            }
        }
        rest = after;
    }
    None
}

/// Boilerplate for bare statements with no class declaration.
pub fn wrap_in_main_class(snippet: &str) -> String {
    format!(
        "public class Main {{\n    public static void main(String[] args) {{\n        {}\n    }}\n}}\n",
        snippet
    )
}
