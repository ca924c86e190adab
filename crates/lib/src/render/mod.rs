//! Format-dispatched rendering of document content.
//!
//! The dispatcher maps a [`Format`] and raw bytes to a response body plus
//! content type. Plain text passes through untouched; markup is converted to
//! an HTML fragment by a [`MarkupEngine`] and wrapped in page chrome by a
//! [`PageLayout`]. Both collaborators are traits so the HTTP layer owns the
//! chrome and tests can substitute trivial implementations.

use pulldown_cmark::{Options, Parser, html};

use crate::document::Format;

/// Content type for verbatim plain-text bodies.
pub const CONTENT_TYPE_PLAIN: &str = "text/plain";

/// Content type for full HTML pages.
pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";

/// Converts markup source to an HTML fragment.
///
/// Engines never fail: malformed input renders to whatever the dialect makes
/// of it, not an error.
pub trait MarkupEngine: Send + Sync {
    fn render_to_html(&self, markup: &str) -> String;
}

/// Wraps an HTML fragment in full page chrome.
///
/// Supplied per call by the presentation layer, which knows the current flash
/// message and signed-in user.
pub trait PageLayout {
    fn wrap(&self, fragment: &str) -> String;
}

/// Layout that returns the fragment unchanged.
///
/// Useful where no chrome applies, such as plain-text responses.
pub struct Unstyled;

impl PageLayout for Unstyled {
    fn wrap(&self, fragment: &str) -> String {
        fragment.to_string()
    }
}

/// CommonMark engine with strikethrough, tables, and task lists enabled.
pub struct CommonMark;

impl MarkupEngine for CommonMark {
    fn render_to_html(&self, markup: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_TASKLISTS);

        let parser = Parser::new_ext(markup, options);
        let mut fragment = String::new();
        html::push_html(&mut fragment, parser);
        fragment
    }
}

/// A fully rendered response body with its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub body: Vec<u8>,
    pub content_type: &'static str,
}

/// Dispatches document content to the right rendering path by format.
pub struct Renderer {
    engine: Box<dyn MarkupEngine>,
}

impl Renderer {
    /// Build a renderer over a specific markup engine.
    pub fn new(engine: Box<dyn MarkupEngine>) -> Self {
        Self { engine }
    }

    /// The stock renderer backed by [`CommonMark`].
    pub fn commonmark() -> Self {
        Self::new(Box::new(CommonMark))
    }

    /// Render raw document bytes according to their format.
    ///
    /// Plain text is returned byte for byte. Markup bytes are read as UTF-8
    /// (invalid sequences replaced), converted to HTML, and wrapped by the
    /// supplied layout.
    pub fn render(&self, format: Format, bytes: &[u8], layout: &dyn PageLayout) -> Rendered {
        match format {
            Format::PlainText => Rendered {
                body: bytes.to_vec(),
                content_type: CONTENT_TYPE_PLAIN,
            },
            Format::Markup => {
                let source = String::from_utf8_lossy(bytes);
                let fragment = self.engine.render_to_html(&source);
                Rendered {
                    body: layout.wrap(&fragment).into_bytes(),
                    content_type: CONTENT_TYPE_HTML,
                }
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::commonmark()
    }
}
