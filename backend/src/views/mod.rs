//! Server-rendered HTML views

pub mod language_switcher;
pub mod welcome;

pub use language_switcher::render_language_switcher;
pub use welcome::render_welcome;

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
