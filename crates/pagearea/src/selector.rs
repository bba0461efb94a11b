//! Selectors and the conventions that turn them into concrete queries.
//!
//! A [`Selector`] is an opaque value handed to a [`Driver`](crate::Driver).
//! Path composition only ever produces [`Selector::Path`]; how a logical path
//! maps to something the browser understands is left to a
//! [`SelectorConvention`], by default [`FormElementPath`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute the form-element-path convention stamps on every input
pub const DEFAULT_PATH_ATTRIBUTE: &str = "path";

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Selector {
    /// Logical form path (e.g., "config/name")
    Path(String),
    /// CSS selector (e.g., "input[name='_.name']")
    Css(String),
    /// XPath selector
    XPath(String),
}

impl Selector {
    /// Create a form path selector
    #[must_use]
    pub fn path(path: impl Into<String>) -> Self {
        Self::Path(path.into())
    }

    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::XPath(selector.into())
    }

    /// The logical path, if this selector was derived from one
    #[must_use]
    pub fn as_path(&self) -> Option<&str> {
        match self {
            Self::Path(p) => Some(p),
            _ => None,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "path({p:?})"),
            Self::Css(s) => write!(f, "css({s:?})"),
            Self::XPath(s) => write!(f, "xpath({s:?})"),
        }
    }
}

/// Query language a rendered selector is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryStrategy {
    /// `document.querySelectorAll`
    Css,
    /// `document.evaluate`
    XPath,
}

/// A selector rendered into a concrete query expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorQuery {
    /// Query language
    pub strategy: QueryStrategy,
    /// Query expression
    pub expression: String,
}

impl SelectorQuery {
    /// The rendered expression as a raw selector
    #[must_use]
    pub fn to_selector(&self) -> Selector {
        match self.strategy {
            QueryStrategy::Css => Selector::Css(self.expression.clone()),
            QueryStrategy::XPath => Selector::XPath(self.expression.clone()),
        }
    }

    /// Convert to a JavaScript expression returning the first match
    #[must_use]
    pub fn to_js(&self) -> String {
        match self.strategy {
            QueryStrategy::Css => format!("document.querySelector({:?})", self.expression),
            QueryStrategy::XPath => format!(
                "document.evaluate({:?}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue",
                self.expression
            ),
        }
    }
}

/// Maps selectors onto concrete queries.
///
/// Drivers call this at query time; nothing in path composition depends on
/// the rendered form.
pub trait SelectorConvention: fmt::Debug + Send + Sync {
    /// Render a selector into a concrete query
    fn render(&self, selector: &Selector) -> SelectorQuery;
}

/// The form-element-path convention: every input carries an attribute whose
/// value is its slash-delimited logical path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormElementPath {
    attribute: String,
}

impl Default for FormElementPath {
    fn default() -> Self {
        Self::new(DEFAULT_PATH_ATTRIBUTE)
    }
}

impl FormElementPath {
    /// Create a convention keyed on the given attribute
    #[must_use]
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
        }
    }

    /// The attribute carrying the logical path
    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }
}

impl SelectorConvention for FormElementPath {
    fn render(&self, selector: &Selector) -> SelectorQuery {
        match selector {
            Selector::Path(p) => SelectorQuery {
                strategy: QueryStrategy::XPath,
                expression: format!("//*[@{}={}]", self.attribute, xpath_literal(p)),
            },
            Selector::Css(s) => SelectorQuery {
                strategy: QueryStrategy::Css,
                expression: s.clone(),
            },
            Selector::XPath(s) => SelectorQuery {
                strategy: QueryStrategy::XPath,
                expression: s.clone(),
            },
        }
    }
}

/// Quote a string as an XPath 1.0 literal.
///
/// XPath has no escape sequences, so a value holding both quote kinds is
/// split and rebuilt with `concat()`.
fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{value}'");
    }
    if !value.contains('"') {
        return format!("\"{value}\"");
    }
    let parts: Vec<String> = value
        .split('\'')
        .map(|part| format!("'{part}'"))
        .collect();
    format!("concat({})", parts.join(", \"'\", "))
}
