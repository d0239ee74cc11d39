// SPDX-License-Identifier: AGPL-3.0-or-later
//! Front-end page framing

pub const VIEWPORT: &str = "width=device-width, initial-scale=1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    Default,
    Print,
}

/// Response metadata for the front-end page.
///
/// Both modes may be embedded in frames from any origin, so no
/// `X-Frame-Options` header accompanies the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub mode: PageMode,
    pub title: &'static str,
    pub viewport: &'static str,
}

impl Page {
    /// Picks the framing from the `action` query parameter
    pub fn for_action(action: Option<&str>) -> Self {
        match action {
            Some("print") => Self {
                mode: PageMode::Print,
                title: "Zettelkasten Cards - Print",
                viewport: VIEWPORT,
            },
            _ => Self {
                mode: PageMode::Default,
                title: "Zettelkasten Карточки",
                viewport: VIEWPORT,
            },
        }
    }

    /// Injects title and viewport into the template's `<head>`
    pub fn render(&self, template: &str) -> String {
        let head = format!(
            "<meta name=\"viewport\" content=\"{}\"><title>{}</title>",
            self.viewport, self.title
        );

        let without_title = strip_title(template);
        match without_title.find("<head>") {
            Some(pos) => {
                let at = pos + "<head>".len();
                format!("{}{}{}", &without_title[..at], head, &without_title[at..])
            }
            None => format!("<head>{}</head>{}", head, without_title),
        }
    }
}

fn strip_title(template: &str) -> String {
    match (template.find("<title>"), template.find("</title>")) {
        (Some(start), Some(end)) if end > start => {
            format!("{}{}", &template[..start], &template[end + "</title>".len()..])
        }
        _ => template.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "<!DOCTYPE html><html><head><title>old</title></head><body>cards</body></html>";

    #[test]
    fn test_for_action() {
        let print = Page::for_action(Some("print"));
        assert_eq!(print.mode, PageMode::Print);
        assert_eq!(print.title, "Zettelkasten Cards - Print");

        let default = Page::for_action(None);
        assert_eq!(default.mode, PageMode::Default);
        assert_eq!(default.title, "Zettelkasten Карточки");

        assert_eq!(Page::for_action(Some("edit")).mode, PageMode::Default);
        assert_eq!(print.viewport, default.viewport);
    }

    #[test]
    fn test_render_replaces_title() {
        let html = Page::for_action(Some("print")).render(TEMPLATE);
        assert!(html.contains("<title>Zettelkasten Cards - Print</title>"));
        assert!(!html.contains("<title>old</title>"));
        assert!(html.contains("content=\"width=device-width, initial-scale=1\""));
        assert!(html.ends_with("<body>cards</body></html>"));
    }

    #[test]
    fn test_render_same_body_for_both_modes() {
        let print = Page::for_action(Some("print")).render(TEMPLATE);
        let default = Page::for_action(None).render(TEMPLATE);
        let body = |s: &str| s[s.find("<body>").unwrap()..].to_string();
        assert_eq!(body(&print), body(&default));
    }

    #[test]
    fn test_render_without_head() {
        let html = Page::for_action(None).render("<p>bare</p>");
        assert!(html.starts_with("<head><meta name=\"viewport\""));
        assert!(html.ends_with("</head><p>bare</p>"));
    }
}
