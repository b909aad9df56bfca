//! Minimal HTML theme: a heading block for the person, then one list per
//! non-empty section in registry order.

use std::fmt::Write;

use crate::document::Rezume;
use crate::errors::RezumeError;
use crate::themes::Theme;

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTheme;

impl Theme for PlainTheme {
    fn name(&self) -> &str {
        "plain"
    }

    fn render(&self, rezume: &Rezume) -> Result<String, RezumeError> {
        // Refuse to render what would not save.
        rezume.dump_data()?;

        let name = rezume.name.as_deref().unwrap_or_default();
        let mut page = String::new();

        page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        push_line(&mut page, format_args!("<title>{}</title>", escape(name)));
        page.push_str("</head>\n<body>\n");

        push_line(&mut page, format_args!("<h1>{}</h1>", escape(name)));
        if let Some(label) = &rezume.label {
            push_line(&mut page, format_args!("<p class=\"label\">{}</p>", escape(label)));
        }

        let mut contact: Vec<String> = Vec::new();
        if let Some(email) = &rezume.email {
            contact.push(format!("<a href=\"mailto:{0}\">{0}</a>", escape(email)));
        }
        if let Some(phone) = &rezume.phone {
            contact.push(escape(phone));
        }
        if let Some(website) = &rezume.website {
            contact.push(format!("<a href=\"{0}\">{0}</a>", escape(website)));
        }
        if let Some(location) = &rezume.location {
            contact.push(escape(&format!("{}, {}", location.address, location.region)));
        }
        if !contact.is_empty() {
            push_line(&mut page, format_args!("<p class=\"contact\">{}</p>", contact.join(" | ")));
        }

        if let Some(summary) = &rezume.summary {
            push_line(&mut page, format_args!("<p class=\"summary\">{}</p>", escape(summary)));
        }

        if !rezume.profiles().is_empty() {
            page.push_str("<ul class=\"profiles\">\n");
            for profile in rezume.profiles().iter() {
                push_line(
                    &mut page,
                    format_args!(
                        "<li><a href=\"{}\">{}: {}</a></li>",
                        escape(&profile.url),
                        escape(&profile.network),
                        escape(&profile.username)
                    ),
                );
            }
            page.push_str("</ul>\n");
        }

        for section in rezume.sections().filter(|s| !s.is_empty()) {
            push_line(&mut page, format_args!("<h2>{}</h2>", escape(section.name().as_str())));
            page.push_str("<ul>\n");
            for entry in section.entries() {
                push_line(&mut page, format_args!("<li>{}</li>", escape(&entry.headline())));
            }
            page.push_str("</ul>\n");
        }

        page.push_str("</body>\n</html>\n");
        Ok(page)
    }
}

fn push_line(page: &mut String, line: std::fmt::Arguments<'_>) {
    // Writing into a String cannot fail.
    let _ = page.write_fmt(line);
    page.push('\n');
}

fn escape(text: &str) -> String {
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

    const FIXTURE_FULL: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/rezume.yml");

    #[test]
    fn test_escape() {
        assert_eq!(escape("R&D <lead>"), "R&amp;D &lt;lead&gt;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_renders_person_and_sections() {
        let mut rezume = Rezume::new();
        rezume.load(FIXTURE_FULL).unwrap();

        let page = PlainTheme.render(&rezume).unwrap();
        assert!(page.contains("<h1>John Doe</h1>"));
        assert!(page.contains("<h2>work</h2>"));
        assert!(page.contains("Senior Engineer at Acme (2021-06 to present)"));
        assert!(page.contains("Rust [Advanced]: tokio, axum, serde"));

        let work = page.find("<h2>work</h2>").unwrap();
        let education = page.find("<h2>education</h2>").unwrap();
        assert!(work < education);
    }

    #[test]
    fn test_timeline_order_is_kept_in_page() {
        let mut rezume = Rezume::new();
        rezume.load(FIXTURE_FULL).unwrap();

        let page = PlainTheme.render(&rezume).unwrap();
        let newest = page.find("Senior Engineer at Acme").unwrap();
        let oldest = page.find("Junior Developer at Initech").unwrap();
        assert!(newest < oldest);
    }
}
