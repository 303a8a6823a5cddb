//! Snippet builder
//!
//! Assembles a self-contained engine program line by line. Structural
//! values go through [`SnippetBuilder::bind`] and are rendered as escaped
//! literals; [`SnippetBuilder::line`] and [`SnippetBuilder::raw`] insert
//! code verbatim and must only ever receive fixed template text or a
//! fragment the caller explicitly asked to run as code.

use crate::engine::literal::PyValue;

/// Builder for one-shot engine snippets
#[derive(Debug, Clone, Default)]
pub struct SnippetBuilder {
    lines: Vec<String>,
}

impl SnippetBuilder {
    /// Create an empty snippet
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a verbatim code line
    pub fn line(mut self, code: impl Into<String>) -> Self {
        self.lines.push(code.into());
        self
    }

    /// Append several verbatim code lines
    pub fn lines<I, S>(mut self, code: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(code.into_iter().map(Into::into));
        self
    }

    /// Append `name = <literal>`
    pub fn bind(mut self, name: &str, value: impl Into<PyValue>) -> Self {
        self.lines.push(format!("{} = {}", name, value.into()));
        self
    }

    /// Append a verbatim multi-line block
    pub fn raw(mut self, block: &str) -> Self {
        self.lines.extend(block.lines().map(str::to_string));
        self
    }

    /// Finish the snippet; every line is newline-terminated
    pub fn build(self) -> String {
        let mut out = String::new();
        for line in self.lines {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_builder() {
        assert_eq!(SnippetBuilder::new().build(), "");
    }

    #[test]
    fn test_lines_are_newline_terminated() {
        let code = SnippetBuilder::new()
            .line("from sage.all import *")
            .line("print(1)")
            .build();
        assert_eq!(code, "from sage.all import *\nprint(1)\n");
    }

    #[test]
    fn test_bind_renders_literals() {
        let code = SnippetBuilder::new()
            .bind("expr", "2+2")
            .bind("k", 3i64)
            .bind("flag", true)
            .bind("cyclo", None::<i64>)
            .build();
        assert_eq!(code, "expr = '2+2'\nk = 3\nflag = True\ncyclo = None\n");
    }

    #[test]
    fn test_bind_escapes_hostile_input() {
        let code = SnippetBuilder::new()
            .bind("var_name", "x'\nimport os")
            .build();
        assert_eq!(code.lines().count(), 1);
        assert_eq!(code, "var_name = 'x\\'\\nimport os'\n");
    }

    #[test]
    fn test_raw_block_is_verbatim() {
        let code = SnippetBuilder::new()
            .raw("for i in range(2):\n    print(i)\n")
            .line("print('done')")
            .build();
        assert_eq!(code, "for i in range(2):\n    print(i)\nprint('done')\n");
    }

    #[test]
    fn test_lines_extend() {
        let code = SnippetBuilder::new()
            .lines(["a = 1", "b = 2"])
            .line("print(a + b)")
            .build();
        assert_eq!(code, "a = 1\nb = 2\nprint(a + b)\n");
    }
}
