use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

// Initialize syntax highlighting resources once
static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const CODE_THEME: &str = "InspiredGitHub";

/// Converts an article body to an HTML fragment. Fenced code blocks are
/// replaced with syntax-highlighted HTML; everything else is plain
/// pulldown-cmark output. Pure: same input, same output.
pub fn to_html(body: &str) -> String {
    let parser = Parser::new_ext(body, Options::all());

    let mut events = Vec::new();
    // (language, buffered source) while inside a fenced block
    let mut code_block: Option<(String, String)> = None;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(lang) => lang.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                code_block = Some((lang, String::new()));
            }
            Event::Text(text) if code_block.is_some() => {
                if let Some((_, source)) = code_block.as_mut() {
                    source.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((lang, source)) = code_block.take() {
                    events.push(Event::Html(highlight(&lang, &source).into()));
                }
            }
            other => events.push(other),
        }
    }

    let mut out = String::new();
    html::push_html(&mut out, events.into_iter());
    out
}

fn highlight(lang: &str, source: &str) -> String {
    let Some(syntax) = SYNTAX_SET.find_syntax_by_token(lang) else {
        return plain_code_block(source);
    };

    let theme = &THEME_SET.themes[CODE_THEME];
    highlighted_html_for_string(source, &SYNTAX_SET, syntax, theme)
        .unwrap_or_else(|_| plain_code_block(source))
}

fn plain_code_block(source: &str) -> String {
    format!("<pre><code>{}</code></pre>", html_escape::encode_text(source))
}
