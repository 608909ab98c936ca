//! Markdown rendering and editor snippets.
use pulldown_cmark::{html, Options, Parser};

/// Renders note content to HTML. Math is emitted as `math-inline` /
/// `math-display` spans for a client-side typesetter.
pub fn render_html(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_MATH);

    let parser = Parser::new_ext(content, options);
    let mut output = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

/// Editor toolbar templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Snippet {
    Code,
    Math,
    Bold,
    Italic,
    InlineCode,
}

impl Snippet {
    pub fn template(self) -> &'static str {
        match self {
            Snippet::Code => "```javascript\n// Your code here\n```",
            Snippet::Math => "$$\n\\frac{a}{b} = c\n$$",
            Snippet::Bold => "**bold text**",
            Snippet::Italic => "*italic text*",
            Snippet::InlineCode => "`inline code`",
        }
    }

    /// Appends the template to `content` on a line of its own.
    pub fn insert(self, content: &mut String) {
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        content.push_str(self.template());
        content.push('\n');
    }
}
