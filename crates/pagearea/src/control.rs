//! Controls: lazily-resolved handles to single inputs.

use crate::driver::ElementHandle;
use crate::page::PageRef;
use crate::result::{AreaError, AreaResult};
use crate::selector::Selector;
use std::sync::Arc;
use tracing::{debug, trace};

/// A handle to one input, addressed by ordered candidate selectors.
///
/// Nothing is looked up at construction. Every operation resolves again from
/// scratch: candidates are queried in order and the first one present on the
/// page wins. Later candidates are not queried once one matches, and a
/// candidate whose query errors is skipped rather than aborting the search.
#[derive(Debug, Clone)]
pub struct Control {
    page: PageRef,
    candidates: Vec<Selector>,
}

impl Control {
    /// Control over `candidates`, resolved through `page`
    #[must_use]
    pub fn new(page: &PageRef, candidates: Vec<Selector>) -> Self {
        Self {
            page: Arc::clone(page),
            candidates,
        }
    }

    /// Candidate selectors, in the order they are tried
    #[must_use]
    pub fn candidates(&self) -> &[Selector] {
        &self.candidates
    }

    /// The page this control resolves against
    #[must_use]
    pub fn page(&self) -> &PageRef {
        &self.page
    }

    fn first_match<T>(
        &self,
        probe: impl Fn(&Selector) -> AreaResult<Option<T>>,
    ) -> Option<(&Selector, T)> {
        for (attempt, candidate) in self.candidates.iter().enumerate() {
            match probe(candidate) {
                Ok(Some(found)) => {
                    debug!(%candidate, attempt, "control resolved");
                    return Some((candidate, found));
                }
                Ok(None) => trace!(%candidate, attempt, "candidate absent"),
                Err(err) => debug!(%candidate, attempt, error = %err, "candidate query failed"),
            }
        }
        None
    }

    /// Resolve to the element at the first present candidate.
    ///
    /// # Errors
    ///
    /// Returns [`AreaError::ElementNotFound`] listing every candidate if none
    /// is present.
    pub fn resolve(&self) -> AreaResult<ElementHandle> {
        self.first_match(|candidate| self.page.query(candidate))
            .map(|(_, element)| element)
            .ok_or_else(|| AreaError::not_found(self.candidates.clone()))
    }

    /// Every element matched by the first candidate that matches anything.
    /// Empty when no candidate matches.
    #[must_use]
    pub fn resolve_all(&self) -> Vec<ElementHandle> {
        self.first_match(|candidate| {
            let found = self.page.query_all(candidate)?;
            Ok((!found.is_empty()).then_some(found))
        })
        .map(|(_, elements)| elements)
        .unwrap_or_default()
    }

    /// Selector of the first present candidate, if any
    #[must_use]
    pub fn matching_candidate(&self) -> Option<&Selector> {
        self.first_match(|candidate| self.page.query(candidate))
            .map(|(candidate, _)| candidate)
    }

    /// Whether any candidate is present
    #[must_use]
    pub fn exists(&self) -> bool {
        self.matching_candidate().is_some()
    }

    /// Current value of the input
    pub fn value(&self) -> AreaResult<Option<String>> {
        let element = self.resolve()?;
        self.page.driver().value(&element)
    }

    /// Replace the value of the input
    pub fn set(&self, text: impl AsRef<str>) -> AreaResult<()> {
        let element = self.resolve()?;
        self.page.driver().fill(&element, text.as_ref())
    }

    /// Check or uncheck the input
    pub fn check(&self, checked: bool) -> AreaResult<()> {
        let element = self.resolve()?;
        self.page.driver().set_checked(&element, checked)
    }

    /// Whether the input is checked
    pub fn is_checked(&self) -> AreaResult<bool> {
        let element = self.resolve()?;
        self.page.driver().is_checked(&element)
    }

    /// Click the element
    pub fn click(&self) -> AreaResult<()> {
        let element = self.resolve()?;
        self.page.driver().click(&element)
    }

    /// Select an option by its visible text
    pub fn select(&self, option: impl AsRef<str>) -> AreaResult<()> {
        let element = self.resolve()?;
        self.page.driver().select_option(&element, option.as_ref())
    }

    /// Text content of the element
    pub fn text(&self) -> AreaResult<String> {
        let element = self.resolve()?;
        self.page.driver().text(&element)
    }
}
