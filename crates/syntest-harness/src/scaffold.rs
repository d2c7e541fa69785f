//! Driver-scaffold template rendering.
//!
//! Each backend embeds a template for the `Test.<ext>` driver file. Templates
//! use `{name}` placeholders; rendering substitutes the named parameters and
//! leaves every other brace untouched, so templates for brace-heavy languages
//! need no escaping.

use syntest_core::RunOptions;

/// Ordered named parameters substituted into a scaffold template.
#[derive(Debug, Clone, Default)]
pub struct TemplateParams {
    pairs: Vec<(String, String)>,
}

impl TemplateParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a string parameter, replacing an existing value of the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(n, _)| *n == name) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((name, value)),
        }
    }

    /// Sets a boolean parameter, rendered as `true`/`false`.
    pub fn set_bool(&mut self, name: impl Into<String>, value: bool) {
        self.set(name, if value { "true" } else { "false" });
    }

    /// Sets an optional parameter; `None` renders as the empty string.
    pub fn set_opt(&mut self, name: impl Into<String>, value: Option<&str>) {
        self.set(name, value.unwrap_or(""));
    }

    /// Looks up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Renders `template` by substituting every `{name}` placeholder.
pub fn render(template: &str, params: &TemplateParams) -> String {
    let mut rendered = template.to_string();
    for (name, value) in &params.pairs {
        rendered = rendered.replace(&format!("{{{}}}", name), value);
    }
    rendered
}

/// The standard parameter set every backend's driver template receives.
pub fn scaffold_params(options: &RunOptions, entry_point: &str) -> TemplateParams {
    let mut params = TemplateParams::new();
    params.set("grammarName", &options.grammar_name);
    params.set_opt("lexerName", options.lexer_name.as_deref());
    params.set_opt("parserName", options.parser_name.as_deref());
    params.set("parserStartRuleName", entry_point);
    params.set_bool("debug", options.show_diagnostic_errors);
    params.set_bool("profile", options.profile);
    params.set_bool("showDFA", options.show_dfa);
    params.set_bool("useListener", options.use_listener);
    params.set_bool("useVisitor", options.use_visitor);
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_substitutes_placeholders() {
        let mut params = TemplateParams::new();
        params.set("lexerName", "ExprLexer");
        params.set("parserName", "ExprParser");

        let rendered = render("from {lexerName} import {lexerName}\nuse {parserName}", &params);
        assert_eq!(
            rendered,
            "from ExprLexer import ExprLexer\nuse ExprParser"
        );
    }

    #[test]
    fn test_render_leaves_unrelated_braces() {
        let mut params = TemplateParams::new();
        params.set("parserStartRuleName", "Program");

        let rendered = render("func main() {\n\tp.{parserStartRuleName}()\n}", &params);
        assert_eq!(rendered, "func main() {\n\tp.Program()\n}");
    }

    #[test]
    fn test_standard_params() {
        let options = syntest_core::RunOptions::builder("Expr", "grammar Expr;")
            .lexer_name("ExprLexer")
            .parser_name("ExprParser")
            .start_rule("program")
            .use_visitor(true)
            .build();

        let params = scaffold_params(&options, "program");
        assert_eq!(params.get("grammarName"), Some("Expr"));
        assert_eq!(params.get("lexerName"), Some("ExprLexer"));
        assert_eq!(params.get("parserStartRuleName"), Some("program"));
        assert_eq!(params.get("useListener"), Some("false"));
        assert_eq!(params.get("useVisitor"), Some("true"));
    }

    #[test]
    fn test_missing_option_renders_empty() {
        let options = syntest_core::RunOptions::builder("L", "lexer grammar L;")
            .lexer_name("L")
            .build();
        let params = scaffold_params(&options, "");
        assert_eq!(params.get("parserName"), Some(""));
    }

    #[test]
    fn test_set_replaces_existing_value() {
        let mut params = TemplateParams::new();
        params.set("name", "first");
        params.set("name", "second");
        assert_eq!(params.get("name"), Some("second"));
        assert_eq!(render("{name}", &params), "second");
    }
}
