//! pagearea: Path-Addressed Page Objects for Form-Heavy UIs
//!
//! Describe a region of a page once as a [`PageArea`], then hand out
//! [`Control`]s to the inputs inside it by path relative to the area.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    pagearea Architecture                        │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ PageArea   │    │ Control    │    │ Page       │            │
//! │   │ "config"   │───►│ [a, b, c]  │───►│ Driver +   │───► browser│
//! │   │            │    │ (lazy)     │    │ Convention │            │
//! │   └────────────┘    └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Building areas and controls is pure bookkeeping and may happen before the
//! page is loaded. A relative path written as absolute fails at once. Missing
//! elements fail only when a control is used, with every attempted selector
//! named in the error.
//!
//! # Example
//!
//! ```
//! use pagearea::prelude::*;
//! use std::sync::Arc;
//!
//! let driver = Arc::new(MockDriver::new());
//! driver
//!     .add_element(&Selector::path("config/displayName"), ElementHandle::input())
//!     .unwrap();
//!
//! let page = Page::new(driver);
//! let config = PageArea::new(&page, "config");
//! let name = config.control(&["name", "displayName"]);
//!
//! name.set("nightly").unwrap();
//! assert_eq!(name.value().unwrap().as_deref(), Some("nightly"));
//! assert!(PageArea::nested(&config, "/advanced").is_err());
//! ```

#![warn(missing_docs)]

#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
mod area;
#[allow(clippy::missing_errors_doc)]
mod config;
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
mod control;
#[allow(clippy::missing_errors_doc)]
mod driver;
mod page;
mod result;
mod selector;

/// Path composition rules
pub mod path;

/// Tracing subscriber setup
pub mod logging;

pub use area::{AsArea, PageArea};
pub use config::{AreaConfig, LOG_ENV, PATH_ATTRIBUTE_ENV, ROOT_PATH_ENV};
pub use control::Control;
pub use driver::{Driver, ElementHandle, MockDriver};
pub use page::{Page, PageRef};
pub use result::{AreaError, AreaResult};
pub use selector::{
    FormElementPath, QueryStrategy, Selector, SelectorConvention, SelectorQuery,
    DEFAULT_PATH_ATTRIBUTE,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::area::*;
    pub use super::config::*;
    pub use super::control::*;
    pub use super::driver::*;
    pub use super::page::*;
    pub use super::result::*;
    pub use super::selector::*;
}
