//! Title rewriting: ordered search/replace rules and markdown escaping.

use crate::config::pattern::translate_replacement;
use crate::config::{Pattern, ReplacerConfig};
use crate::error::ConfigError;

/// A compiled search/replace rule.
#[derive(Debug, Clone)]
pub struct Replacer {
    search: Pattern,
    replace: String,
}

impl Replacer {
    /// Compiles the rule at `replacers[index]`.
    pub fn compile(config: &ReplacerConfig, index: usize, origin: &str) -> Result<Self, ConfigError> {
        let search = Pattern::parse(&config.search).map_err(|source| ConfigError::Pattern {
            origin: origin.to_string(),
            rule: format!("replacers[{index}].search"),
            source,
        })?;

        Ok(Self {
            search,
            replace: translate_replacement(&config.replace),
        })
    }

    /// Applies this rule once.
    pub fn apply(&self, title: &str) -> String {
        self.search.replace(title, &self.replace).into_owned()
    }
}

/// Applies replacers in configuration order, each to the previous output.
#[derive(Debug, Clone, Default)]
pub struct TitleRewriter {
    replacers: Vec<Replacer>,
}

impl TitleRewriter {
    /// Compiles every replacer, failing on the first invalid one.
    pub fn compile(configs: &[ReplacerConfig], origin: &str) -> Result<Self, ConfigError> {
        let replacers = configs
            .iter()
            .enumerate()
            .map(|(i, config)| Replacer::compile(config, i, origin))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { replacers })
    }

    /// Rewrites a title.
    pub fn rewrite(&self, title: &str) -> String {
        self.replacers
            .iter()
            .fold(title.to_string(), |acc, replacer| replacer.apply(&acc))
    }
}

/// Escapes each character of `escapes` found in `title`.
///
/// `@` and `#` are broken up with an empty HTML comment so they do not
/// mention users or link issues; everything else gets a backslash. Closed
/// backtick code spans are copied untouched.
pub fn escape_title(title: &str, escapes: &str) -> String {
    if escapes.is_empty() {
        return title.to_string();
    }

    let mut out = String::with_capacity(title.len());
    let mut rest = title;

    while let Some(c) = rest.chars().next() {
        if c == '`' {
            if let Some(close) = rest[1..].find('`') {
                let span = &rest[..close + 2];
                out.push_str(span);
                rest = &rest[span.len()..];
                continue;
            }
        }

        if escapes.contains(c) {
            match c {
                '@' | '#' => {
                    out.push(c);
                    out.push_str("<!---->");
                }
                _ => {
                    out.push('\\');
                    out.push(c);
                }
            }
        } else {
            out.push(c);
        }

        rest = &rest[c.len_utf8()..];
    }

    out
}
