use maud::{Markup, Render, html};

use crate::models::SearchResult;

pub const NO_RESULTS: &str = "No results found.";

/// A rendered link. Links always open in a new browsing context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLink {
    pub text: String,
    pub href: String,
}

impl ResultLink {
    pub const TARGET: &'static str = "_blank";
}

/// What the results container shows after a successful search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsContent {
    Empty,
    Links(Vec<ResultLink>),
}

impl ResultsContent {
    pub fn from_results(results: &[SearchResult]) -> Self {
        if results.is_empty() {
            return ResultsContent::Empty;
        }
        ResultsContent::Links(
            results
                .iter()
                .map(|r| ResultLink {
                    text: r.display_title().to_string(),
                    href: r.href().to_string(),
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        match self {
            ResultsContent::Empty => 0,
            ResultsContent::Links(links) => links.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inner HTML for the results container.
    pub fn to_html(&self) -> String {
        self.render().into_string()
    }

    pub fn to_text(&self) -> String {
        match self {
            ResultsContent::Empty => NO_RESULTS.to_string(),
            ResultsContent::Links(links) => links
                .iter()
                .enumerate()
                .map(|(idx, link)| format!("{:>2}. {}\n    {}", idx + 1, link.text, link.href))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl Render for ResultsContent {
    fn render(&self) -> Markup {
        html! {
            @match self {
                ResultsContent::Empty => p { (NO_RESULTS) },
                ResultsContent::Links(links) => {
                    @for link in links {
                        div class="result-item" {
                            a href=(link.href) target=(ResultLink::TARGET) { (link.text) }
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_to_text() {
    let content = ResultsContent::from_results(&[
        SearchResult::new("A", "http://x"),
        SearchResult::default(),
    ]);
    assert_eq!(
        content.to_text(),
        " 1. A\n    http://x\n 2. No title available\n    #"
    );
    assert_eq!(ResultsContent::Empty.to_text(), NO_RESULTS);
}
