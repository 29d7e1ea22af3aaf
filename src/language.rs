use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Java,
    C,
    Cpp,
    Go,
    Rust,
    Sql,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl fmt::Display for UnknownLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown language '{}'. Supported: {}",
            self.0,
            Language::ALL
                .iter()
                .map(|l| l.id())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for UnknownLanguage {}

const COMMON_SCAN_STEPS: [&str; 3] = [
    "Initializing environment...",
    "Tokenizing input stream...",
    "Building Abstract Syntax Tree (AST)...",
];

const CLOSING_SCAN_STEPS: [&str; 3] = [
    "Consulting Gemini knowledge base...",
    "Synthesizing solution...",
    "Finalizing response...",
];

impl Language {
    pub const ALL: [Language; 9] = [
        Language::Python,
        Language::JavaScript,
        Language::TypeScript,
        Language::Java,
        Language::C,
        Language::Cpp,
        Language::Go,
        Language::Rust,
        Language::Sql,
    ];

    /// Identifier used in prompts, fenced blocks and the `:lang` command.
    pub fn id(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Sql => "sql",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Java => "Java",
            Language::C => "C",
            Language::Cpp => "C++",
            Language::Go => "Go",
            Language::Rust => "Rust",
            Language::Sql => "SQL",
        }
    }

    /// Canonical buggy example seeded into the editor.
    pub fn default_snippet(&self) -> &'static str {
        match self {
            Language::Python => PYTHON_SNIPPET,
            Language::JavaScript => JAVASCRIPT_SNIPPET,
            Language::TypeScript => TYPESCRIPT_SNIPPET,
            Language::Java => JAVA_SNIPPET,
            Language::C => C_SNIPPET,
            Language::Cpp => CPP_SNIPPET,
            Language::Go => GO_SNIPPET,
            Language::Rust => RUST_SNIPPET,
            Language::Sql => SQL_SNIPPET,
        }
    }

    /// Editor file extension. C shares the C++ highlighter.
    pub fn extension(&self) -> &'static str {
        match self {
            Language::Python => "py",
            Language::JavaScript => "js",
            Language::TypeScript => "ts",
            Language::Java => "java",
            Language::C | Language::Cpp => "cpp",
            Language::Go => "go",
            Language::Rust => "rs",
            Language::Sql => "sql",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "py" => Some(Language::Python),
            "js" | "jsx" | "mjs" | "cjs" => Some(Language::JavaScript),
            "ts" | "tsx" => Some(Language::TypeScript),
            "java" => Some(Language::Java),
            "c" | "h" => Some(Language::C),
            "cpp" | "cc" | "cxx" | "hpp" | "hh" => Some(Language::Cpp),
            "go" => Some(Language::Go),
            "rs" => Some(Language::Rust),
            "sql" => Some(Language::Sql),
            _ => None,
        }
    }

    pub fn line_comment(&self) -> &'static str {
        match self {
            Language::Python => "#",
            Language::Sql => "--",
            _ => "//",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Language::Python => "Indentation matters!",
            _ => "Don't forget semicolons!",
        }
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Language::Python => &[
                "def", "return", "if", "elif", "else", "for", "while", "in", "import", "from",
                "class", "try", "except", "finally", "with", "as", "lambda", "None", "True",
                "False", "and", "or", "not", "is", "pass", "raise", "yield",
            ],
            Language::JavaScript => &[
                "function", "return", "if", "else", "for", "while", "const", "let", "var",
                "new", "class", "async", "await", "try", "catch", "throw", "null", "undefined",
                "true", "false", "import", "export", "typeof",
            ],
            Language::TypeScript => &[
                "function", "return", "if", "else", "for", "while", "const", "let", "var",
                "new", "class", "interface", "type", "async", "await", "try", "catch", "null",
                "undefined", "true", "false", "import", "export", "number", "string",
                "boolean",
            ],
            Language::Java => &[
                "public", "private", "protected", "class", "static", "void", "int", "new",
                "return", "if", "else", "for", "while", "try", "catch", "throw", "null",
                "true", "false", "import", "final", "String",
            ],
            Language::C | Language::Cpp => &[
                "int", "char", "void", "return", "if", "else", "for", "while", "struct",
                "const", "sizeof", "NULL", "nullptr", "new", "delete", "class", "public",
                "private", "template", "auto", "include", "namespace", "std",
            ],
            Language::Go => &[
                "package", "import", "func", "var", "const", "type", "struct", "map", "chan",
                "go", "defer", "return", "if", "else", "for", "range", "nil", "make",
            ],
            Language::Rust => &[
                "fn", "let", "mut", "pub", "struct", "enum", "impl", "trait", "match", "if",
                "else", "for", "while", "loop", "return", "use", "mod", "self", "Self",
                "Some", "None", "Ok", "Err",
            ],
            Language::Sql => &[
                "SELECT", "FROM", "WHERE", "GROUP", "BY", "ORDER", "HAVING", "JOIN", "LEFT",
                "RIGHT", "INNER", "ON", "AS", "INSERT", "INTO", "VALUES", "UPDATE", "SET",
                "DELETE", "COUNT", "AND", "OR", "NOT", "NULL",
            ],
        }
    }

    fn specific_scan_steps(&self) -> [&'static str; 4] {
        match self {
            Language::Python => [
                "Checking indentation levels...",
                "Validating PEP-8 compliance...",
                "Analyzing dynamic typing...",
                "Checking for unhandled exceptions...",
            ],
            Language::JavaScript => [
                "Verifying scope chain...",
                "Checking for hoisting issues...",
                "Analyzing async/await patterns...",
                "Validating prototype references...",
            ],
            Language::TypeScript => [
                "Compiling to intermediate representation...",
                "Checking interface compliance...",
                "Verifying type safety...",
                "Analyzing generic constraints...",
            ],
            Language::Java => [
                "Resolving class hierarchy...",
                "Checking array bounds...",
                "Analyzing exception propagation...",
                "Verifying null safety...",
            ],
            Language::C => [
                "Checking preprocessor directives...",
                "Verifying pointer arithmetic...",
                "Analyzing stack memory usage...",
                "Checking for buffer overflows...",
            ],
            Language::Cpp => [
                "Checking template instantiations...",
                "Verifying RAII compliance...",
                "Checking memory allocation...",
                "Analyzing move semantics...",
            ],
            Language::Go => [
                "Checking goroutine leaks...",
                "Validating channel operations...",
                "Analyzing interface implementation...",
                "Running go fmt check...",
            ],
            Language::Rust => [
                "Running borrow checker...",
                "Verifying ownership rules...",
                "Checking lifetimes...",
                "Ensuring thread safety...",
            ],
            Language::Sql => [
                "Parsing query structure...",
                "Checking foreign key constraints...",
                "Optimizing query execution plan...",
                "Validating index usage...",
            ],
        }
    }

    /// Lines shown by the scanning animation, in order.
    pub fn scan_steps(&self) -> Vec<&'static str> {
        COMMON_SCAN_STEPS
            .iter()
            .chain(self.specific_scan_steps().iter())
            .chain(CLOSING_SCAN_STEPS.iter())
            .copied()
            .collect()
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::Python
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        let alias = match needle.as_str() {
            "py" => Some(Language::Python),
            "js" | "node" => Some(Language::JavaScript),
            "ts" => Some(Language::TypeScript),
            "c++" | "cxx" => Some(Language::Cpp),
            "golang" => Some(Language::Go),
            "rs" => Some(Language::Rust),
            _ => None,
        };

        alias
            .or_else(|| {
                Language::ALL.iter().copied().find(|lang| {
                    lang.id() == needle || lang.label().to_ascii_lowercase() == needle
                })
            })
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

const PYTHON_SNIPPET: &str = r#"def calculate_average(numbers):
    total = sum(numbers)
    # Error: Using len() on an integer if numbers is not a list, or generic division by zero risk
    return total / len(numbers)

print(calculate_average([]))"#;

const JAVASCRIPT_SNIPPET: &str = r#"function greet(name) {
  if (name = "Alice") { // Error: Assignment instead of comparison
    console.log("Hello, Alice!");
  }
}"#;

const TYPESCRIPT_SNIPPET: &str = r#"interface User {
  id: number;
  name: string;
}

const user: User = {
  id: "123", // Error: Type mismatch
  name: "Bob"
};"#;

const JAVA_SNIPPET: &str = r#"public class Main {
    public static void main(String[] args) {
        int[] numbers = {1, 2, 3};
        // Error: Array index out of bounds
        System.out.println(numbers[3]);
    }
}"#;

const C_SNIPPET: &str = r#"#include <stdio.h>

int main() {
    int x = 10;
    int *ptr = NULL;
    // Error: Dereferencing a null pointer
    printf("%d", *ptr);
    return 0;
}"#;

const CPP_SNIPPET: &str = "#include <iostream>

int main() {
    int* ptr = new int(10);
    delete ptr;
    // Error: Use after free
    *ptr = 20;
    return 0;
}";

const GO_SNIPPET: &str = r#"package main
import "fmt"

func main() {
    var m map[string]int
    // Error: Assignment to entry in nil map
    m["key"] = 1
    fmt.Println(m)
}"#;

const RUST_SNIPPET: &str = "fn main() {
    let s1 = String::from(\"hello\");
    let s2 = s1;
    // Error: Borrow of moved value
    println!(\"{}, world!\", s1);
}";

const SQL_SNIPPET: &str = "SELECT name, COUNT(*)
FROM users
WHERE age > 18
-- Error: Missing GROUP BY
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_language_has_label_and_snippet() {
        for lang in Language::ALL {
            assert!(!lang.label().is_empty());
            assert!(!lang.default_snippet().trim().is_empty());
            assert!(lang.scan_steps().len() >= 10);
        }
    }

    #[test]
    fn test_parse_ids_labels_and_aliases() {
        for lang in Language::ALL {
            assert_eq!(lang.id().parse::<Language>(), Ok(lang));
            assert_eq!(lang.label().parse::<Language>(), Ok(lang));
        }
        assert_eq!("C++".parse::<Language>(), Ok(Language::Cpp));
        assert_eq!(" golang ".parse::<Language>(), Ok(Language::Go));
        assert_eq!("PY".parse::<Language>(), Ok(Language::Python));
    }

    #[test]
    fn test_unknown_language_is_an_error() {
        let err = "cobol".parse::<Language>().unwrap_err();
        assert_eq!(err, UnknownLanguage("cobol".to_string()));
        assert!(err.to_string().contains("python"));
    }

    #[test]
    fn test_sql_snippet_is_missing_group_by() {
        let snippet = Language::Sql.default_snippet();
        assert!(snippet.starts_with("SELECT name, COUNT(*)"));
        assert!(snippet.contains("-- Error: Missing GROUP BY"));
    }

    #[test]
    fn test_extension_round_trip_for_editor_files() {
        assert_eq!(Language::from_extension("rs"), Some(Language::Rust));
        assert_eq!(Language::from_extension("H"), Some(Language::C));
        assert_eq!(Language::from_extension("md"), None);
        assert_eq!(Language::C.extension(), "cpp");
    }

    #[test]
    fn test_scan_steps_are_language_specific() {
        let rust = Language::Rust.scan_steps();
        assert_eq!(rust[0], "Initializing environment...");
        assert!(rust.contains(&"Running borrow checker..."));
        assert_eq!(rust.last(), Some(&"Finalizing response..."));
        assert!(!Language::Python.scan_steps().contains(&"Running borrow checker..."));
    }
}
