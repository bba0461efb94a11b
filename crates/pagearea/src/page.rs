//! The page context shared by every area and control built on it.

use crate::area::PageArea;
use crate::config::AreaConfig;
use crate::driver::{Driver, ElementHandle};
use crate::result::{AreaError, AreaResult};
use crate::selector::{Selector, SelectorConvention, SelectorQuery};
use std::sync::Arc;
use tracing::trace;

/// Shared, non-owning handle to a page
pub type PageRef = Arc<Page>;

/// A browser page: the driver session plus the convention used to turn
/// selectors into queries.
///
/// Areas and controls hold a [`PageRef`] and reach the browser only through
/// it. The page never opens or closes the session it is given.
#[derive(Debug)]
pub struct Page {
    driver: Arc<dyn Driver>,
    convention: Arc<dyn SelectorConvention>,
    config: AreaConfig,
}

impl Page {
    /// Create a page over a driver session with the default config
    #[must_use]
    pub fn new(driver: Arc<dyn Driver>) -> PageRef {
        Self::with_config(driver, AreaConfig::default())
    }

    /// Create a page using the convention described by `config`
    #[must_use]
    pub fn with_config(driver: Arc<dyn Driver>, config: AreaConfig) -> PageRef {
        let convention = Arc::new(config.convention());
        Arc::new(Self {
            driver,
            convention,
            config,
        })
    }

    /// Create a page with a custom selector convention
    #[must_use]
    pub fn with_convention(
        driver: Arc<dyn Driver>,
        convention: Arc<dyn SelectorConvention>,
        config: AreaConfig,
    ) -> PageRef {
        Arc::new(Self {
            driver,
            convention,
            config,
        })
    }

    /// The driver session
    #[must_use]
    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }

    /// The page configuration
    #[must_use]
    pub const fn config(&self) -> &AreaConfig {
        &self.config
    }

    /// Render a selector with this page's convention
    #[must_use]
    pub fn render(&self, selector: &Selector) -> SelectorQuery {
        self.convention.render(selector)
    }

    /// First element matching `selector`, if any
    pub fn query(&self, selector: &Selector) -> AreaResult<Option<ElementHandle>> {
        let query = self.render(selector);
        trace!(%selector, expression = %query.expression, "query");
        self.driver.query(&query)
    }

    /// All elements matching `selector`
    pub fn query_all(&self, selector: &Selector) -> AreaResult<Vec<ElementHandle>> {
        let query = self.render(selector);
        trace!(%selector, expression = %query.expression, "query_all");
        self.driver.query_all(&query)
    }

    /// The element matching `selector`
    ///
    /// # Errors
    ///
    /// Returns [`AreaError::ElementNotFound`] naming `selector` if nothing
    /// matches, or the driver's own error.
    pub fn find(&self, selector: &Selector) -> AreaResult<ElementHandle> {
        self.query(selector)?
            .ok_or_else(|| AreaError::not_found(vec![selector.clone()]))
    }

    /// Whether anything matches `selector`. Driver errors count as "no".
    #[must_use]
    pub fn exists(&self, selector: &Selector) -> bool {
        let query = self.render(selector);
        trace!(%selector, expression = %query.expression, "exists");
        self.driver.exists(&query)
    }

    /// Whether `area` belongs to this page
    #[must_use]
    pub fn owns(self: &Arc<Self>, area: &PageArea) -> bool {
        Arc::ptr_eq(self, area.page())
    }

    /// Area rooted at the configured root path
    #[must_use]
    pub fn root_area(self: &Arc<Self>) -> PageArea {
        PageArea::new(self, self.config.root_path.clone())
    }

    /// Area rooted at `path`, verbatim
    #[must_use]
    pub fn area(self: &Arc<Self>, path: impl Into<String>) -> PageArea {
        PageArea::new(self, path)
    }
}
