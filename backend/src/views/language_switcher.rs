use super::html_escape;
use crate::models::AvailableLocale;

const SWITCHER_STYLE: &str = "<style>\n.btn_lang { padding: 5px 10px; }\n.btn_lang.active { font-weight: 600; }\n</style>\n";

/// Render one switch link per available locale, in configured order.
///
/// Each link points at `/language/{id}`; the link for `active` is marked
/// with the `active` class.
pub fn render_language_switcher(available: &[AvailableLocale], active: &str) -> String {
    let mut html = String::from(SWITCHER_STYLE);

    for locale in available {
        let class = if locale.id == active { "btn_lang active" } else { "btn_lang" };
        html.push_str(&format!(
            r#"<a class="{}" href="/language/{}" hreflang="{}">{}</a>"#,
            class,
            urlencoding::encode(&locale.id),
            html_escape(&locale.id),
            html_escape(&locale.label),
        ));
        html.push('\n');
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locales() -> Vec<AvailableLocale> {
        vec![AvailableLocale::new("English", "en"), AvailableLocale::new("Türkçe", "tr")]
    }

    #[test]
    fn test_links_in_configured_order() {
        let html = render_language_switcher(&locales(), "en");
        let en = html.find(r#"href="/language/en""#).unwrap();
        let tr = html.find(r#"href="/language/tr""#).unwrap();
        assert!(en < tr);
        assert!(html.contains(">Türkçe</a>"));
        assert_eq!(html.matches("<a ").count(), 2);
    }

    #[test]
    fn test_marks_active_locale() {
        let html = render_language_switcher(&locales(), "tr");
        assert!(html.contains(r#"<a class="btn_lang active" href="/language/tr""#));
        assert!(html.contains(r#"<a class="btn_lang" href="/language/en""#));
    }

    #[test]
    fn test_escapes_label_and_encodes_id() {
        let html = render_language_switcher(
            &[AvailableLocale::new("<b>Bold</b>", "pt BR")],
            "en",
        );
        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt;"));
        assert!(html.contains(r#"href="/language/pt%20BR""#));
    }
}
