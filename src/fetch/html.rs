use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::fetch::FetchedContent;

/// Elements whose subtrees never contribute a title or body text.
const IGNORED_ELEMENTS: &[&str] = &["script", "style", "nav", "footer", "header"];

/// Containers tried in order before falling back to `<body>`.
const CONTAINER_SELECTORS: &[&str] = &[
    "article",
    "main",
    ".post-content",
    ".article-content",
    ".content",
];

const TEXT_SELECTOR: &str = "p, h1, h2, h3, h4, li";

const NO_TITLE: &str = "No title found";

/// Extract a best-effort title and body text from an HTML document.
pub fn extract(document: &str, url: &str) -> Result<FetchedContent> {
    let html = Html::parse_document(document);

    let title = extract_title(&html)?;

    let container = find_container(&html)?;

    let text_selector = selector(TEXT_SELECTOR)?;
    let blocks = container
        .select(&text_selector)
        .filter(|el| !is_ignored(el))
        .map(|el| element_text(&el))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    Ok(FetchedContent {
        title,
        body: collapse_blank_lines(&blocks),
        url: url.to_string(),
    })
}

fn extract_title(html: &Html) -> Result<String> {
    let h1 = selector("h1")?;
    let title_tag = selector("title")?;

    let title = html
        .select(&h1)
        .find(|el| !is_ignored(el))
        .or_else(|| html.select(&title_tag).next())
        .map(|el| element_text(&el))
        .unwrap_or_default();

    if title.is_empty() {
        Ok(NO_TITLE.to_string())
    } else {
        Ok(title)
    }
}

fn find_container(html: &Html) -> Result<ElementRef<'_>> {
    for css in CONTAINER_SELECTORS.iter().chain(std::iter::once(&"body")) {
        let sel = selector(css)?;
        if let Some(el) = html.select(&sel).find(|el| !is_ignored(el)) {
            return Ok(el);
        }
    }
    Ok(html.root_element())
}

/// True when the element or any ancestor is one of the ignored elements.
fn is_ignored(el: &ElementRef<'_>) -> bool {
    IGNORED_ELEMENTS.contains(&el.value().name())
        || el
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|a| IGNORED_ELEMENTS.contains(&a.value().name()))
}

/// Trimmed text of `el`, leaving out text nested in ignored elements.
fn element_text(el: &ElementRef<'_>) -> String {
    el.descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|a| IGNORED_ELEMENTS.contains(&a.value().name()));
            (!hidden).then(|| &*text.text)
        })
        .collect::<String>()
        .trim()
        .to_string()
}

fn collapse_blank_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| AppError::Scrape(format!("Invalid selector {css}: {e}")))
}
