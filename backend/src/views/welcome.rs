use super::{html_escape, render_language_switcher};
use crate::models::AvailableLocale;
use crate::utils::translate;
use rust_i18n::t;

/// Render the landing page in the given locale
pub fn render_welcome(available: &[AvailableLocale], active: &str) -> String {
    let title = translate("welcome.title", active);
    let greeting = translate("welcome.greeting", active);
    let current = t!("welcome.current", locale = active, locale_id = active).to_string();
    let nav_label = translate("switcher.label", active);
    let switcher = render_language_switcher(available, active);

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<nav aria-label="{nav_label}">
{switcher}</nav>
<main>
<h1>{title}</h1>
<p>{greeting}</p>
<p class="current-locale">{current}</p>
</main>
</body>
</html>
"#,
        lang = html_escape(active),
        title = html_escape(&title),
        nav_label = html_escape(&nav_label),
        switcher = switcher,
        greeting = html_escape(&greeting),
        current = html_escape(&current),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locales() -> Vec<AvailableLocale> {
        vec![AvailableLocale::new("English", "en"), AvailableLocale::new("Türkçe", "tr")]
    }

    #[test]
    fn test_render_in_english() {
        let html = render_welcome(&locales(), "en");
        assert!(html.contains(r#"<html lang="en">"#));
        assert!(html.contains("<h1>Welcome</h1>"));
        assert!(html.contains("Current language: en"));
    }

    #[test]
    fn test_render_in_turkish() {
        let html = render_welcome(&locales(), "tr");
        assert!(html.contains(r#"<html lang="tr">"#));
        assert!(html.contains("<h1>Hoş geldiniz</h1>"));
        assert!(html.contains("Geçerli dil: tr"));
    }

    #[test]
    fn test_unknown_locale_falls_back_to_english_text() {
        let html = render_welcome(&locales(), "xx");
        assert!(html.contains(r#"<html lang="xx">"#));
        assert!(html.contains("<h1>Welcome</h1>"));
        assert!(html.contains("Current language: xx"));
    }
}
