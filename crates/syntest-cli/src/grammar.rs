//! Grammar-header inspection.
//!
//! A run needs the lexer/parser names the grammar tool will emit, and those
//! follow from the grammar's declaration line. Parsing the header here means
//! the caller only supplies the grammar text.

use anyhow::{bail, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Which recognizers a grammar declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarKind {
    /// `grammar G;` declares both a lexer and a parser.
    Combined,
    /// `lexer grammar G;` declares only a lexer.
    Lexer,
    /// `parser grammar G;` declares only a parser.
    Parser,
}

/// The declaration line of a grammar file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarHeader {
    pub kind: GrammarKind,
    pub name: String,
}

impl GrammarHeader {
    /// The lexer recognizer name this grammar produces, if any.
    pub fn lexer_name(&self) -> Option<String> {
        match self.kind {
            GrammarKind::Combined => Some(format!("{}Lexer", self.name)),
            GrammarKind::Lexer => Some(self.name.clone()),
            GrammarKind::Parser => None,
        }
    }

    /// The parser recognizer name this grammar produces, if any.
    pub fn parser_name(&self) -> Option<String> {
        match self.kind {
            GrammarKind::Combined => Some(format!("{}Parser", self.name)),
            GrammarKind::Parser => Some(self.name.clone()),
            GrammarKind::Lexer => None,
        }
    }
}

/// Parses the declaration line out of `grammar_str`.
pub fn parse_header(grammar_str: &str) -> Result<GrammarHeader> {
    static HEADER_RE: OnceLock<Regex> = OnceLock::new();
    let re = HEADER_RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*(?:(lexer|parser)\s+)?grammar\s+(\w+)\s*;")
            .expect("header pattern is valid")
    });

    let Some(caps) = re.captures(grammar_str) else {
        bail!("no grammar declaration found (expected e.g. `grammar Expr;`)");
    };

    let kind = match caps.get(1).map(|m| m.as_str()) {
        Some("lexer") => GrammarKind::Lexer,
        Some("parser") => GrammarKind::Parser,
        _ => GrammarKind::Combined,
    };

    Ok(GrammarHeader {
        kind,
        name: caps[2].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_combined_grammar_declares_both_recognizers() {
        let header = parse_header("grammar Expr;\nprogram: 'x';").unwrap();
        assert_eq!(header.kind, GrammarKind::Combined);
        assert_eq!(header.name, "Expr");
        assert_eq!(header.lexer_name(), Some("ExprLexer".to_string()));
        assert_eq!(header.parser_name(), Some("ExprParser".to_string()));
    }

    #[test]
    fn test_lexer_grammar_declares_only_a_lexer() {
        let header = parse_header("lexer grammar L;\nA: 'a';").unwrap();
        assert_eq!(header.kind, GrammarKind::Lexer);
        assert_eq!(header.lexer_name(), Some("L".to_string()));
        assert_eq!(header.parser_name(), None);
    }

    #[test]
    fn test_parser_grammar_declares_only_a_parser() {
        let header = parse_header("parser grammar P;\nprogram: A;").unwrap();
        assert_eq!(header.kind, GrammarKind::Parser);
        assert_eq!(header.lexer_name(), None);
        assert_eq!(header.parser_name(), Some("P".to_string()));
    }

    #[test]
    fn test_declaration_after_comments_is_found() {
        let src = "// arithmetic expressions\ngrammar Expr;\n";
        assert_eq!(parse_header(src).unwrap().name, "Expr");
    }

    #[test]
    fn test_missing_declaration_is_an_error() {
        let err = parse_header("program: 'x';").unwrap_err();
        assert!(err.to_string().contains("no grammar declaration"));
    }
}
