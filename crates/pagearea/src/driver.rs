//! Driver - the browser session behind every page
//!
//! Page areas and controls never talk to a browser directly. They go through
//! the synchronous [`Driver`] trait, which a real backend implements on top of
//! its own session and which [`MockDriver`] implements for unit tests.
//!
//! ```text
//! ┌──────────┐   Selector    ┌──────────────────────┐  SelectorQuery  ┌──────────┐
//! │ Control  │──────────────►│ Page                 │────────────────►│ Driver   │
//! │ PageArea │               │ (SelectorConvention) │                 │ (session)│
//! └──────────┘               └──────────────────────┘                 └──────────┘
//! ```

use crate::result::{AreaError, AreaResult};
use crate::selector::{FormElementPath, Selector, SelectorConvention, SelectorQuery};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Element handle for DOM interactions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Unique identifier for the element
    pub id: String,
    /// Element tag name
    pub tag_name: String,
    /// Element text content
    pub text_content: Option<String>,
    /// Current input value
    pub value: Option<String>,
    /// Checkbox/radio state
    pub checked: bool,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(id: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag_name: tag_name.into(),
            text_content: None,
            value: None,
            checked: false,
        }
    }

    /// Create an `<input>` handle with a fresh id
    #[must_use]
    pub fn input() -> Self {
        Self::new(Uuid::new_v4().to_string(), "input")
    }

    /// Set the value
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    /// Set the checked state
    #[must_use]
    pub const fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

/// Abstract synchronous driver for browser sessions.
///
/// Implementations block on their backend's own waiting rules; nothing above
/// this trait retries or schedules work.
///
/// # Implementations
///
/// - `MockDriver` - For unit testing
pub trait Driver: Send + Sync + fmt::Debug {
    /// First element matching the query, if any
    fn query(&self, query: &SelectorQuery) -> AreaResult<Option<ElementHandle>>;

    /// All elements matching the query, in document order
    fn query_all(&self, query: &SelectorQuery) -> AreaResult<Vec<ElementHandle>>;

    /// The element matching the query
    ///
    /// # Errors
    ///
    /// Returns [`AreaError::ElementNotFound`] naming the rendered query if
    /// nothing matches, or the driver's own error.
    fn find(&self, query: &SelectorQuery) -> AreaResult<ElementHandle> {
        self.query(query)?
            .ok_or_else(|| AreaError::not_found(vec![query.to_selector()]))
    }

    /// Whether anything matches the query. Errors count as "no".
    fn exists(&self, query: &SelectorQuery) -> bool {
        matches!(self.query(query), Ok(Some(_)))
    }

    /// Current value of an input
    fn value(&self, element: &ElementHandle) -> AreaResult<Option<String>>;

    /// Replace the value of an input
    fn fill(&self, element: &ElementHandle, text: &str) -> AreaResult<()>;

    /// Click an element
    fn click(&self, element: &ElementHandle) -> AreaResult<()>;

    /// Whether a checkbox or radio is checked
    fn is_checked(&self, element: &ElementHandle) -> AreaResult<bool>;

    /// Check or uncheck a checkbox or radio
    fn set_checked(&self, element: &ElementHandle, checked: bool) -> AreaResult<()>;

    /// Pick an option of a `<select>` by its visible text
    fn select_option(&self, element: &ElementHandle, option: &str) -> AreaResult<()>;

    /// Text content of an element
    fn text(&self, element: &ElementHandle) -> AreaResult<String>;
}

#[derive(Debug, Default)]
struct MockState {
    elements: Vec<(SelectorQuery, ElementHandle)>,
    broken: Vec<SelectorQuery>,
    fail_all: bool,
    call_history: Vec<String>,
}

impl MockState {
    fn element_mut(&mut self, id: &str) -> AreaResult<&mut ElementHandle> {
        self.elements
            .iter_mut()
            .map(|(_, e)| e)
            .find(|e| e.id == id)
            .ok_or_else(|| AreaError::driver(format!("stale element reference: {id}")))
    }

    fn check_available(&self) -> AreaResult<()> {
        if self.fail_all {
            return Err(AreaError::driver("mock driver is offline"));
        }
        Ok(())
    }
}

/// Mock driver for unit testing.
///
/// Elements are registered against selectors, rendered through the same
/// [`FormElementPath`] convention a [`Page`](crate::Page) uses by
/// default, so a page over this driver finds what the test registered.
#[derive(Debug)]
pub struct MockDriver {
    convention: FormElementPath,
    state: Mutex<MockState>,
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDriver {
    /// Create new mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::with_convention(FormElementPath::default())
    }

    /// Create a mock driver rendering selectors with the given convention
    #[must_use]
    pub fn with_convention(convention: FormElementPath) -> Self {
        Self {
            convention,
            state: Mutex::new(MockState::default()),
        }
    }

    /// A driver on which every call fails
    #[must_use]
    pub fn offline() -> Self {
        Self {
            convention: FormElementPath::default(),
            state: Mutex::new(MockState {
                fail_all: true,
                ..MockState::default()
            }),
        }
    }

    fn state(&self) -> AreaResult<MutexGuard<'_, MockState>> {
        self.state
            .lock()
            .map_err(|_| AreaError::driver("mock driver state poisoned"))
    }

    /// Add a mock element reachable through `selector`
    pub fn add_element(&self, selector: &Selector, element: ElementHandle) -> AreaResult<()> {
        let query = self.convention.render(selector);
        self.state()?.elements.push((query, element));
        Ok(())
    }

    /// Remove every element reachable through `selector`
    pub fn remove(&self, selector: &Selector) -> AreaResult<()> {
        let query = self.convention.render(selector);
        self.state()?.elements.retain(|(q, _)| *q != query);
        Ok(())
    }

    /// Make queries for `selector` fail with a driver error
    pub fn break_selector(&self, selector: &Selector) -> AreaResult<()> {
        let query = self.convention.render(selector);
        self.state()?.broken.push(query);
        Ok(())
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state()
            .map(|s| s.call_history.clone())
            .unwrap_or_default()
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.history().iter().any(|c| c.starts_with(method))
    }

    /// Number of recorded calls
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.history().len()
    }

    /// Current state of a registered element
    #[must_use]
    pub fn element(&self, id: &str) -> Option<ElementHandle> {
        let state = self.state().ok()?;
        let found = state
            .elements
            .iter()
            .map(|(_, e)| e)
            .find(|e| e.id == id)
            .cloned();
        found
    }
}

impl Driver for MockDriver {
    fn query(&self, query: &SelectorQuery) -> AreaResult<Option<ElementHandle>> {
        Ok(self.query_all(query)?.into_iter().next())
    }

    fn query_all(&self, query: &SelectorQuery) -> AreaResult<Vec<ElementHandle>> {
        let mut state = self.state()?;
        state.call_history.push(format!("query:{}", query.expression));
        state.check_available()?;
        if state.broken.contains(query) {
            return Err(AreaError::driver(format!(
                "query failed: {}",
                query.expression
            )));
        }
        Ok(state
            .elements
            .iter()
            .filter(|(q, _)| q == query)
            .map(|(_, e)| e.clone())
            .collect())
    }

    fn value(&self, element: &ElementHandle) -> AreaResult<Option<String>> {
        let mut state = self.state()?;
        state.call_history.push(format!("value:{}", element.id));
        state.check_available()?;
        Ok(state.element_mut(&element.id)?.value.clone())
    }

    fn fill(&self, element: &ElementHandle, text: &str) -> AreaResult<()> {
        let mut state = self.state()?;
        state.call_history.push(format!("fill:{}", element.id));
        state.check_available()?;
        state.element_mut(&element.id)?.value = Some(text.to_string());
        Ok(())
    }

    fn click(&self, element: &ElementHandle) -> AreaResult<()> {
        let mut state = self.state()?;
        state.call_history.push(format!("click:{}", element.id));
        state.check_available()?;
        let _ = state.element_mut(&element.id)?;
        Ok(())
    }

    fn is_checked(&self, element: &ElementHandle) -> AreaResult<bool> {
        let mut state = self.state()?;
        state.call_history.push(format!("is_checked:{}", element.id));
        state.check_available()?;
        Ok(state.element_mut(&element.id)?.checked)
    }

    fn set_checked(&self, element: &ElementHandle, checked: bool) -> AreaResult<()> {
        let mut state = self.state()?;
        state
            .call_history
            .push(format!("set_checked:{}:{checked}", element.id));
        state.check_available()?;
        state.element_mut(&element.id)?.checked = checked;
        Ok(())
    }

    fn select_option(&self, element: &ElementHandle, option: &str) -> AreaResult<()> {
        let mut state = self.state()?;
        state
            .call_history
            .push(format!("select_option:{}:{option}", element.id));
        state.check_available()?;
        state.element_mut(&element.id)?.value = Some(option.to_string());
        Ok(())
    }

    fn text(&self, element: &ElementHandle) -> AreaResult<String> {
        let mut state = self.state()?;
        state.call_history.push(format!("text:{}", element.id));
        state.check_available()?;
        Ok(state
            .element_mut(&element.id)?
            .text_content
            .clone()
            .unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn render(selector: &Selector) -> SelectorQuery {
        FormElementPath::default().render(selector)
    }

    mod element_handle_tests {
        use super::*;

        #[test]
        fn test_element_handle_creation() {
            let elem = ElementHandle::new("btn-1", "button");
            assert_eq!(elem.id, "btn-1");
            assert_eq!(elem.tag_name, "button");
            assert!(elem.text_content.is_none());
            assert!(elem.value.is_none());
            assert!(!elem.checked);
        }

        #[test]
        fn test_input_ids_are_unique() {
            assert_ne!(ElementHandle::input().id, ElementHandle::input().id);
        }

        #[test]
        fn test_builders() {
            let elem = ElementHandle::input()
                .with_value("v")
                .with_text("t")
                .with_checked(true);
            assert_eq!(elem.value.as_deref(), Some("v"));
            assert_eq!(elem.text_content.as_deref(), Some("t"));
            assert!(elem.checked);
        }
    }

    mod mock_driver_tests {
        use super::*;

        #[test]
        fn test_mock_driver_creation() {
            let driver = MockDriver::new();
            assert!(driver.history().is_empty());
            assert!(!driver.was_called("query"));
        }

        #[test]
        fn test_query_registered_element() {
            let driver = MockDriver::new();
            let selector = Selector::path("config/name");
            driver
                .add_element(&selector, ElementHandle::new("n", "input"))
                .unwrap();

            let found = driver.query(&render(&selector)).unwrap();
            assert_eq!(found.unwrap().id, "n");
            assert!(driver.was_called("query://*[@path='config/name']"));
        }

        #[test]
        fn test_query_missing_is_none() {
            let driver = MockDriver::new();
            let found = driver.query(&render(&Selector::path("nope"))).unwrap();
            assert!(found.is_none());
        }

        #[test]
        fn test_query_all_in_order() {
            let driver = MockDriver::new();
            let selector = Selector::css("input.row");
            driver.add_element(&selector, ElementHandle::new("a", "input")).unwrap();
            driver.add_element(&selector, ElementHandle::new("b", "input")).unwrap();

            let ids: Vec<_> = driver
                .query_all(&render(&selector))
                .unwrap()
                .into_iter()
                .map(|e| e.id)
                .collect();
            assert_eq!(ids, vec!["a", "b"]);
        }

        #[test]
        fn test_remove() {
            let driver = MockDriver::new();
            let selector = Selector::path("x");
            driver.add_element(&selector, ElementHandle::new("x", "input")).unwrap();
            driver.remove(&selector).unwrap();
            assert!(driver.query(&render(&selector)).unwrap().is_none());
        }

        #[test]
        fn test_broken_selector_errors() {
            let driver = MockDriver::new();
            let selector = Selector::path("broken");
            driver.break_selector(&selector).unwrap();
            let err = driver.query(&render(&selector)).unwrap_err();
            assert!(matches!(err, AreaError::Driver { .. }));
        }

        #[test]
        fn test_find_and_exists_defaults() {
            let driver = MockDriver::new();
            let present = Selector::path("config/name");
            driver.add_element(&present, ElementHandle::new("n", "input")).unwrap();

            assert_eq!(driver.find(&render(&present)).unwrap().id, "n");
            assert!(driver.exists(&render(&present)));

            let missing = render(&Selector::path("config/gone"));
            let err = driver.find(&missing).unwrap_err();
            assert_eq!(err.attempted().unwrap(), &[missing.to_selector()]);
            assert!(!driver.exists(&missing));
        }

        #[test]
        fn test_exists_default_swallows_errors() {
            let driver = MockDriver::new();
            let selector = Selector::path("broken");
            driver.break_selector(&selector).unwrap();
            assert!(!driver.exists(&render(&selector)));
            assert!(matches!(
                driver.find(&render(&selector)).unwrap_err(),
                AreaError::Driver { .. }
            ));
        }

        #[test]
        fn test_offline_fails_everything() {
            let driver = MockDriver::offline();
            assert!(driver.query(&render(&Selector::path("a"))).is_err());
            assert!(driver.click(&ElementHandle::input()).is_err());
        }

        #[test]
        fn test_fill_and_value() {
            let driver = MockDriver::new();
            let elem = ElementHandle::new("name", "input");
            driver.add_element(&Selector::path("name"), elem.clone()).unwrap();

            driver.fill(&elem, "job-1").unwrap();
            assert_eq!(driver.value(&elem).unwrap().as_deref(), Some("job-1"));
            assert!(driver.was_called("fill:name"));
        }

        #[test]
        fn test_checked_round() {
            let driver = MockDriver::new();
            let elem = ElementHandle::new("flag", "input");
            driver.add_element(&Selector::path("flag"), elem.clone()).unwrap();

            assert!(!driver.is_checked(&elem).unwrap());
            driver.set_checked(&elem, true).unwrap();
            assert!(driver.is_checked(&elem).unwrap());
            assert!(driver.element("flag").unwrap().checked);
        }

        #[test]
        fn test_select_option_sets_value() {
            let driver = MockDriver::new();
            let elem = ElementHandle::new("kind", "select");
            driver.add_element(&Selector::path("kind"), elem.clone()).unwrap();
            driver.select_option(&elem, "Manual").unwrap();
            assert_eq!(driver.element("kind").unwrap().value.as_deref(), Some("Manual"));
        }

        #[test]
        fn test_text_defaults_to_empty() {
            let driver = MockDriver::new();
            let elem = ElementHandle::new("label", "span");
            driver.add_element(&Selector::path("label"), elem.clone()).unwrap();
            assert_eq!(driver.text(&elem).unwrap(), "");
        }

        #[test]
        fn test_stale_element() {
            let driver = MockDriver::new();
            let err = driver.click(&ElementHandle::new("gone", "button")).unwrap_err();
            assert!(err.to_string().contains("stale element reference: gone"));
        }
    }
}
