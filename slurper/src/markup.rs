//! A narrow query interface over parsed HTML.
//!
//! Components only ever ask "which elements match this structural query" and
//! read text or attributes back, so the parser underneath can change without
//! touching the resolver or the extractor.

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};

pub struct Document {
    html: Html,
}

#[derive(Clone, Copy)]
pub struct Element<'a> {
    inner: ElementRef<'a>,
}

fn selector(query: &str) -> Result<Selector> {
    Selector::parse(query).map_err(|e| anyhow!("Invalid selector {:?}: {:?}", query, e))
}

impl Document {
    pub fn parse(html: &str) -> Document {
        Document {
            html: Html::parse_document(html),
        }
    }

    /// First element in document order matching `query`.
    pub fn find(&self, query: &str) -> Result<Option<Element<'_>>> {
        let selector = selector(query)?;
        Ok(self.html.select(&selector).next().map(Element::wrap))
    }

    pub fn find_all(&self, query: &str) -> Result<Vec<Element<'_>>> {
        let selector = selector(query)?;
        Ok(self.html.select(&selector).map(Element::wrap).collect())
    }
}

impl<'a> Element<'a> {
    fn wrap(inner: ElementRef<'a>) -> Element<'a> {
        Element { inner }
    }

    pub fn name(&self) -> &str {
        self.inner.value().name()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.inner.value().attr(name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.inner.value().classes().any(|c| c == class)
    }

    /// All descendant text, concatenated in document order.
    pub fn text(&self) -> String {
        self.inner.text().collect()
    }

    /// Descendants matching `query`, in document order.
    pub fn find_all(&self, query: &str) -> Result<Vec<Element<'a>>> {
        let selector = selector(query)?;
        Ok(self.inner.select(&selector).map(Element::wrap).collect())
    }

    /// Direct child elements, optionally restricted to one tag name.
    pub fn children(&self, tag: Option<&str>) -> Vec<Element<'a>> {
        self.inner
            .children()
            .filter_map(ElementRef::wrap)
            .map(Element::wrap)
            .filter(|child| tag.map_or(true, |t| child.name() == t))
            .collect()
    }
}
