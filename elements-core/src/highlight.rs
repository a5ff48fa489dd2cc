//! Source highlighting for the file viewer
//!
//! One [`Highlighter`] serves the whole process. It is built on first use by
//! [`highlighter()`] and shared from then on; building it compiles the token
//! regexes, which is the only expensive part.

use once_cell::sync::Lazy;
use regex::Regex;

static HIGHLIGHTER: Lazy<Highlighter> = Lazy::new(Highlighter::new);

/// The shared highlighter
pub fn highlighter() -> &'static Highlighter {
    &HIGHLIGHTER
}

/// Language id for a file extension (without the dot)
pub fn language_for_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "tsx" => "tsx",
        "ts" | "mts" | "cts" => "ts",
        "jsx" => "jsx",
        "js" | "mjs" | "cjs" => "js",
        "json" => "json",
        "css" => "css",
        "md" | "mdx" => "md",
        "sh" | "bash" | "zsh" => "sh",
        _ => "text",
    }
}

/// Language id for a file name or path
pub fn language_for_path(path: &str) -> &'static str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rsplit_once('.') {
        Some((_, ext)) => language_for_extension(ext),
        None => "text",
    }
}

/// Regex-token highlighter producing HTML or markdown
pub struct Highlighter {
    script: Regex,
    css: Regex,
    json: Regex,
    shell: Regex,
}

// Group order in every pattern: comment, string, keyword, number
const COMMENT: usize = 1;
const STRING: usize = 2;
const KEYWORD: usize = 3;
const NUMBER: usize = 4;

impl Highlighter {
    fn new() -> Self {
        tracing::debug!("Compiling highlighter patterns");
        Self {
            script: compile(
                r#"(//[^\n]*|/\*[\s\S]*?\*/)|("(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*'|`(?:\\.|[^`\\])*`)|\b(import|export|from|default|function|return|const|let|var|if|else|for|while|async|await|new|type|interface|extends|class|true|false|null|undefined)\b|\b(\d+(?:\.\d+)?)\b"#,
            ),
            css: compile(
                r#"(/\*[\s\S]*?\*/)|("(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*')|(@[a-z-]+|!important)|(-?\d+(?:\.\d+)?(?:px|rem|em|%|vh|vw)?)"#,
            ),
            json: compile(
                r#"(//[^\n]*)|("(?:\\.|[^"\\])*")|\b(true|false|null)\b|(-?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?)"#,
            ),
            shell: compile(
                r#"(#[^\n]*)|("(?:\\.|[^"\\])*"|'[^']*')|\b(if|then|else|fi|for|do|done|export|echo|cd)\b|\b(\d+)\b"#,
            ),
        }
    }

    /// Escaped HTML with token spans:
    /// `<pre><code class="language-{lang}">...</code></pre>`
    pub fn to_html(&self, code: &str, language: &str) -> String {
        let body = match self.pattern(language) {
            Some(re) => highlight_tokens(re, code),
            None => escape_html(code),
        };
        format!(
            "<pre><code class=\"language-{}\">{}</code></pre>",
            language, body
        )
    }

    /// Fenced markdown block
    pub fn to_markdown(&self, code: &str, language: &str) -> String {
        // A fence longer than any backtick run inside the code
        let longest = code
            .split(|c: char| c != '`')
            .map(str::len)
            .max()
            .unwrap_or(0);
        let fence = "`".repeat(longest.max(2) + 1);

        let newline = if code.ends_with('\n') { "" } else { "\n" };
        format!("{fence}{language}\n{code}{newline}{fence}\n")
    }

    /// Highlight a file, picking the language from its path
    pub fn highlight_file(&self, path: &str, code: &str) -> String {
        self.to_html(code, language_for_path(path))
    }

    fn pattern(&self, language: &str) -> Option<&Regex> {
        match language {
            "tsx" | "ts" | "jsx" | "js" => Some(&self.script),
            "css" => Some(&self.css),
            "json" => Some(&self.json),
            "sh" => Some(&self.shell),
            _ => None,
        }
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid highlight pattern")
}

fn highlight_tokens(re: &Regex, code: &str) -> String {
    let mut out = String::with_capacity(code.len() + code.len() / 2);
    let mut last = 0;

    for caps in re.captures_iter(code) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.as_str().is_empty() {
            continue;
        }
        let class = [
            (COMMENT, "comment"),
            (STRING, "string"),
            (KEYWORD, "keyword"),
            (NUMBER, "number"),
        ]
        .iter()
        .find(|(group, _)| caps.get(*group).is_some())
        .map(|(_, class)| *class);

        let Some(class) = class else { continue };

        out.push_str(&escape_html(&code[last..whole.start()]));
        out.push_str("<span class=\"token ");
        out.push_str(class);
        out.push_str("\">");
        out.push_str(&escape_html(whole.as_str()));
        out.push_str("</span>");
        last = whole.end();
    }

    out.push_str(&escape_html(&code[last..]));
    out
}

/// Escape text for inclusion in HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singleton() {
        let a = highlighter() as *const Highlighter;
        let b = highlighter() as *const Highlighter;
        assert_eq!(a, b);
    }

    #[test]
    fn test_language_detection() {
        assert_eq!(language_for_path("components/sign-in.tsx"), "tsx");
        assert_eq!(language_for_path("lib/utils.TS"), "ts");
        assert_eq!(language_for_path("registry.json"), "json");
        assert_eq!(language_for_path("styles/globals.css"), "css");
        assert_eq!(language_for_path("scripts/setup.sh"), "sh");
        assert_eq!(language_for_path("README.md"), "md");
        assert_eq!(language_for_path("Makefile"), "text");
        assert_eq!(language_for_path("archive.tar.gz"), "text");
    }

    #[test]
    fn test_html_is_escaped() {
        let html = highlighter().to_html("<div>&</div>", "text");
        assert_eq!(
            html,
            "<pre><code class=\"language-text\">&lt;div&gt;&amp;&lt;/div&gt;</code></pre>"
        );
    }

    #[test]
    fn test_tokens() {
        let html = highlighter().to_html("const a = \"<b>\"; // hi", "ts");
        assert!(html.contains("<span class=\"token keyword\">const</span>"));
        assert!(html.contains("<span class=\"token string\">&quot;&lt;b&gt;&quot;</span>"));
        assert!(html.contains("<span class=\"token comment\">// hi</span>"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_json_tokens() {
        let html = highlighter().highlight_file("a.json", r#"{"ok": true, "n": 12}"#);
        assert!(html.contains("<span class=\"token keyword\">true</span>"));
        assert!(html.contains("<span class=\"token number\">12</span>"));
    }

    #[test]
    fn test_markdown_fence() {
        assert_eq!(
            highlighter().to_markdown("let a = 1;", "ts"),
            "```ts\nlet a = 1;\n```\n"
        );
        let md = highlighter().to_markdown("a ```` b\n", "md");
        assert!(md.starts_with("`````md\n"));
        assert!(md.ends_with("\n`````\n"));
    }
}
