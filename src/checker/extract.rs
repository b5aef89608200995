use linkify::{LinkFinder, LinkKind};
use once_cell::sync::Lazy;
use pulldown_cmark::{Event, LinkType, Options, Parser, Tag};
use rustc_hash::{FxHashMap, FxHashSet};
use std::ops::Range;

// Reuse LinkFinder instance for bare URLs in text
static LINK_FINDER: Lazy<LinkFinder> = Lazy::new(|| {
    let mut finder = LinkFinder::new();
    finder.kinds(&[LinkKind::Url]);
    finder
});

fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_FOOTNOTES | Options::ENABLE_STRIKETHROUGH
}

/// Extract every link from a markdown document.
///
/// Covers inline and reference links, images, autolinks, and bare URLs in
/// text. Code spans and code blocks are skipped. Each link is returned once,
/// in order of first appearance.
pub fn extract_links(markdown: &str) -> Vec<String> {
    let mut links = LinkList::default();
    let mut run = TextRun::default();
    let mut in_code_block = false;
    let mut link_depth = 0usize;

    for (event, range) in Parser::new_ext(markdown, parser_options()).into_offset_iter() {
        match &event {
            Event::Text(text) if !in_code_block && link_depth == 0 => {
                if !run.extend(markdown, text, range.clone()) {
                    links.push_bare_urls(&run.take());
                    run.extend(markdown, text, range);
                }
                continue;
            }
            // Emphasis markers may sit inside a bare URL
            Event::Start(Tag::Emphasis | Tag::Strong | Tag::Strikethrough)
            | Event::End(Tag::Emphasis | Tag::Strong | Tag::Strikethrough) => continue,
            _ => links.push_bare_urls(&run.take()),
        }

        match event {
            Event::Start(Tag::Link(link_type, dest, _)) => {
                link_depth += 1;
                links.push(destination(link_type, &dest));
            }
            Event::End(Tag::Link(..)) => link_depth = link_depth.saturating_sub(1),
            Event::Start(Tag::Image(link_type, dest, _)) => {
                link_depth += 1;
                links.push(destination(link_type, &dest));
            }
            Event::End(Tag::Image(..)) => link_depth = link_depth.saturating_sub(1),
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(Tag::CodeBlock(_)) => in_code_block = false,
            _ => {}
        }
    }
    links.push_bare_urls(&run.take());

    links.links
}

/// Links in first-seen order, without duplicates.
#[derive(Default)]
struct LinkList {
    seen: FxHashSet<String>,
    links: Vec<String>,
}

impl LinkList {
    fn push(&mut self, link: String) {
        if !link.is_empty() && self.seen.insert(link.clone()) {
            self.links.push(link);
        }
    }

    fn push_bare_urls(&mut self, text: &str) {
        for link in LINK_FINDER.links(text) {
            self.push(link.as_str().to_string());
        }
    }
}

/// Adjacent text fragments joined back into the prose they came from.
///
/// The parser splits text at escapes, unmatched brackets and emphasis
/// markers, which would otherwise cut a bare URL short.
#[derive(Default)]
struct TextRun {
    text: String,
    end: Option<usize>,
}

impl TextRun {
    /// Append `fragment` found at `range`. Returns false, leaving the run
    /// untouched, when anything other than markup delimiters separates it
    /// from the previous fragment.
    fn extend(&mut self, markdown: &str, fragment: &str, range: Range<usize>) -> bool {
        if let Some(end) = self.end {
            let gap = markdown.get(end..range.start).unwrap_or_default();
            if !gap.chars().all(|c| matches!(c, '*' | '_' | '~' | '\\')) {
                return false;
            }
            self.text.extend(gap.chars().filter(|&c| c != '\\'));
        }
        self.text.push_str(fragment);
        self.end = Some(range.end);
        true
    }

    fn take(&mut self) -> String {
        self.end = None;
        std::mem::take(&mut self.text)
    }
}

fn destination(link_type: LinkType, dest: &str) -> String {
    match link_type {
        LinkType::Email if !dest.starts_with("mailto:") => format!("mailto:{dest}"),
        _ => dest.trim().to_string(),
    }
}

/// Anchors generated for the document's headings, GitHub style.
///
/// Repeated headings get `-1`, `-2`, ... suffixes.
pub fn heading_anchors(markdown: &str) -> FxHashSet<String> {
    let mut anchors = FxHashSet::default();
    let mut occurrences: FxHashMap<String, usize> = FxHashMap::default();
    let mut heading: Option<String> = None;

    for event in Parser::new_ext(markdown, parser_options()) {
        match event {
            Event::Start(Tag::Heading(..)) => heading = Some(String::new()),
            Event::Text(text) | Event::Code(text) => {
                if let Some(ref mut current) = heading {
                    current.push_str(&text);
                }
            }
            Event::End(Tag::Heading(..)) => {
                if let Some(text) = heading.take() {
                    let slug = heading_slug(&text);
                    let count = occurrences.entry(slug.clone()).or_insert(0);
                    let anchor = if *count == 0 {
                        slug
                    } else {
                        format!("{slug}-{count}")
                    };
                    *count += 1;
                    anchors.insert(anchor);
                }
            }
            _ => {}
        }
    }

    anchors
}

/// Lowercase, drop punctuation, turn spaces into hyphens.
pub fn heading_slug(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '-' | '_' => Some(c),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn test_extract_links__inline_and_image() {
        let markdown = "See [Rust](https://www.rust-lang.org) and ![logo](./img/logo.png).";

        assert_eq!(
            extract_links(markdown),
            vec!["https://www.rust-lang.org", "./img/logo.png"]
        );
    }

    #[test]
    fn test_extract_links__reference_and_autolink() {
        let markdown = "\
Read the [guide][g] or <https://example.com/auto>.

[g]: https://example.com/guide
";
        assert_eq!(
            extract_links(markdown),
            vec!["https://example.com/guide", "https://example.com/auto"]
        );
    }

    #[test]
    fn test_extract_links__bare_urls_in_text() {
        let markdown = "Plain text https://example.com/bare and more.";

        assert_eq!(extract_links(markdown), vec!["https://example.com/bare"]);
    }

    #[test]
    fn test_extract_links__bare_url_split_by_markup() {
        assert_eq!(
            extract_links("See https://example.com/a*b*c here."),
            vec!["https://example.com/a*b*c"]
        );
        assert_eq!(
            extract_links("See https://example.com/a[1] here."),
            vec!["https://example.com/a[1]"]
        );
        assert_eq!(
            extract_links("See https://example.com/a\\_b here."),
            vec!["https://example.com/a_b"]
        );
    }

    #[test]
    fn test_extract_links__separate_paragraphs_are_not_joined() {
        let markdown = "First https://a.test/x\n\nhttps://b.test/y second.";

        assert_eq!(
            extract_links(markdown),
            vec!["https://a.test/x", "https://b.test/y"]
        );
    }

    #[test]
    fn test_extract_links__skips_code() {
        let markdown = "\
Inline `https://example.com/code` span.

```
curl https://example.com/block
```
";
        assert!(extract_links(markdown).is_empty());
    }

    #[test]
    fn test_extract_links__link_text_url_not_duplicated() {
        let markdown = "[https://shown.example.com](https://target.example.com)";

        assert_eq!(extract_links(markdown), vec!["https://target.example.com"]);
    }

    #[test]
    fn test_extract_links__dedupes_in_first_seen_order() {
        let markdown = "[a](https://b.test) [b](#top) [c](https://b.test) [d](#top)";

        assert_eq!(extract_links(markdown), vec!["https://b.test", "#top"]);
    }

    #[test]
    fn test_extract_links__email_autolink() {
        assert_eq!(
            extract_links("Mail <team@example.com>"),
            vec!["mailto:team@example.com"]
        );
    }

    #[test]
    fn test_extract_links__no_links() {
        assert!(extract_links("# Title\n\nJust prose.").is_empty());
    }

    #[test]
    fn test_heading_slug() {
        assert_eq!(heading_slug("Getting Started"), "getting-started");
        assert_eq!(heading_slug("What's new in v2.0?"), "whats-new-in-v20");
        assert_eq!(heading_slug("snake_case-and-dash"), "snake_case-and-dash");
    }

    #[test]
    fn test_heading_anchors__duplicates_and_code() {
        let markdown = "# Install\n\n## Usage\n\n## Usage\n\n### The `run` command\n";
        let anchors = heading_anchors(markdown);

        assert!(anchors.contains("install"));
        assert!(anchors.contains("usage"));
        assert!(anchors.contains("usage-1"));
        assert!(anchors.contains("the-run-command"));
        assert_eq!(anchors.len(), 4);
    }
}
