//! Page areas: path-addressed regions of a page.
//!
//! A page area maps to the portion of a page holding a group of inputs,
//! typically a configuration section assembled from several form fragments.
//! Every input in it is addressed by a path relative to the area, so the page
//! object survives markup changes as long as the logical form paths hold.
//!
//! Building areas and controls never touches the browser. Bad relative paths
//! fail right away; missing elements fail only when a control is used.
//!
//! # Example
//!
//! ```ignore
//! struct ScmSection {
//!     area: PageArea,
//!     url: Control,
//!     branch: Control,
//! }
//!
//! impl ScmSection {
//!     fn new(parent: &impl AsArea) -> AreaResult<Self> {
//!         let area = PageArea::nested(parent, "scm")?;
//!         Ok(Self {
//!             url: area.control(&["userRemoteConfigs/url", "url"]),
//!             branch: area.control(&["branches/name"]),
//!             area,
//!         })
//!     }
//! }
//!
//! impl AsArea for ScmSection {
//!     fn as_area(&self) -> &PageArea {
//!         &self.area
//!     }
//! }
//! ```

use crate::control::Control;
use crate::driver::ElementHandle;
use crate::page::PageRef;
use crate::path;
use crate::result::AreaResult;
use crate::selector::Selector;
use std::sync::Arc;
use tracing::debug;

/// Anything that is, or wraps, a page area.
///
/// Implement this for page objects that embed a [`PageArea`] so they can
/// parent nested areas.
pub trait AsArea {
    /// The underlying area
    fn as_area(&self) -> &PageArea;
}

/// An addressable region of a page
#[derive(Debug, Clone)]
pub struct PageArea {
    path: String,
    page: PageRef,
}

impl AsArea for PageArea {
    fn as_area(&self) -> &PageArea {
        self
    }
}

impl PageArea {
    /// Area rooted directly at a page; `path` is stored verbatim
    #[must_use]
    pub fn new(page: &PageRef, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            page: Arc::clone(page),
        }
    }

    /// Area nested under `parent` at `relative`.
    ///
    /// # Errors
    ///
    /// Returns [`AreaError::InvalidPath`](crate::AreaError::InvalidPath) if
    /// `relative` starts with `/`.
    pub fn nested(parent: &impl AsArea, relative: &str) -> AreaResult<Self> {
        let parent = parent.as_area();
        let path = path::join(&parent.path, relative)?;
        debug!(parent = %parent.path, %path, "nested page area");
        Ok(Self {
            path,
            page: Arc::clone(&parent.page),
        })
    }

    /// Shorthand for [`PageArea::nested`] under `self`
    pub fn area(&self, relative: &str) -> AreaResult<Self> {
        Self::nested(self, relative)
    }

    /// The area's path
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The page this area belongs to
    #[must_use]
    pub fn page(&self) -> &PageRef {
        &self.page
    }

    /// Selector for `rel` inside this area; `""` and `"/"` address the area itself
    #[must_use]
    pub fn by_path(&self, rel: &str) -> Selector {
        path::to_selector(&self.path, rel)
    }

    /// The area's own root element
    ///
    /// # Errors
    ///
    /// Returns [`AreaError::ElementNotFound`](crate::AreaError::ElementNotFound)
    /// if the area is not on the page. A failing query counts as absent, the
    /// same way [`Control::resolve`] treats it.
    pub fn self_element(&self) -> AreaResult<ElementHandle> {
        self.self_control().resolve()
    }

    /// Whether the area's own root element is on the page
    #[must_use]
    pub fn exists(&self) -> bool {
        self.self_control().exists()
    }

    fn self_control(&self) -> Control {
        Control::new(&self.page, vec![self.by_path("")])
    }

    /// Control for an input in this area, tried at each relative path in
    /// turn. Useful when an element's path changed between versions.
    ///
    /// Resolution is lazy, so controls can live in page-object fields.
    #[must_use]
    pub fn control<S: AsRef<str>>(&self, relative_paths: &[S]) -> Control {
        let candidates = relative_paths
            .iter()
            .map(|rel| self.by_path(rel.as_ref()))
            .collect();
        Control::new(&self.page, candidates)
    }

    /// Control bound to a raw selector, ignoring this area's path
    #[must_use]
    pub fn control_by(&self, selector: Selector) -> Control {
        Control::new(&self.page, vec![selector])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::driver::MockDriver;
    use crate::page::Page;
    use crate::result::AreaError;
    use proptest::prelude::*;

    fn config_area() -> (Arc<MockDriver>, PageArea) {
        let driver = Arc::new(MockDriver::new());
        let page = Page::new(driver.clone());
        let area = PageArea::new(&page, "config");
        (driver, area)
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn test_new_stores_path_verbatim() {
            let (_, area) = config_area();
            assert_eq!(area.path(), "config");

            let page = Page::new(Arc::new(MockDriver::new()));
            assert_eq!(PageArea::new(&page, "/odd//path").path(), "/odd//path");
        }

        #[test]
        fn test_nested_joins_paths() {
            let (_, area) = config_area();
            let child = PageArea::nested(&area, "advanced").unwrap();
            assert_eq!(child.path(), "config/advanced");
            assert!(area.page().owns(&child));
        }

        #[test]
        fn test_nested_twice() {
            let (_, area) = config_area();
            let leaf = area.area("advanced").unwrap().area("quietPeriod").unwrap();
            assert_eq!(leaf.path(), "config/advanced/quietPeriod");
        }

        #[test]
        fn test_nested_rejects_absolute() {
            let (driver, area) = config_area();
            let err = PageArea::nested(&area, "/advanced").unwrap_err();
            assert!(matches!(err, AreaError::InvalidPath { ref path, .. } if path == "/advanced"));
            assert_eq!(driver.call_count(), 0);
        }

        #[test]
        fn test_construction_never_touches_driver() {
            let driver = Arc::new(MockDriver::offline());
            let page = Page::new(driver.clone());
            let area = PageArea::new(&page, "config");
            let child = area.area("advanced").unwrap();
            let _ = child.control(&["name", "displayName"]);
            let _ = child.control_by(Selector::css("#id"));
            assert_eq!(driver.call_count(), 0);
        }
    }

    mod selector_tests {
        use super::*;

        #[test]
        fn test_by_path_self_spellings() {
            let (_, area) = config_area();
            assert_eq!(area.by_path(""), Selector::path("config"));
            assert_eq!(area.by_path("/"), area.by_path(""));
        }

        #[test]
        fn test_by_path_child() {
            let (_, area) = config_area();
            assert_eq!(area.by_path("name"), path::to_selector("config", "name"));
            assert_eq!(area.by_path("name"), Selector::path("config/name"));
        }

        #[test]
        fn test_control_candidate() {
            let (_, area) = config_area();
            let control = area.control(&["name"]);
            assert_eq!(control.candidates(), &[path::to_selector("config", "name")]);
        }

        #[test]
        fn test_control_candidates_keep_order() {
            let (_, area) = config_area();
            let control = area.control(&["a", "/b", "c"]);
            assert_eq!(
                control.candidates(),
                &[
                    Selector::path("config/a"),
                    Selector::path("config/b"),
                    Selector::path("config/c"),
                ]
            );
        }

        #[test]
        fn test_control_by_bypasses_path() {
            let (_, area) = config_area();
            let control = area.control_by(Selector::css("button.submit"));
            assert_eq!(control.candidates(), &[Selector::css("button.submit")]);
        }

        #[test]
        fn test_control_accepts_owned_strings() {
            let (_, area) = config_area();
            let paths = vec!["x".to_string()];
            assert_eq!(area.control(&paths).candidates()[0], Selector::path("config/x"));
        }
    }

    mod resolution_tests {
        use super::*;

        #[test]
        fn test_self_element() {
            let (driver, area) = config_area();
            driver
                .add_element(&Selector::path("config"), ElementHandle::new("root", "div"))
                .unwrap();
            assert_eq!(area.self_element().unwrap().id, "root");
            assert!(area.exists());
        }

        #[test]
        fn test_self_element_missing() {
            let (_, area) = config_area();
            let err = area.self_element().unwrap_err();
            assert_eq!(err.attempted().unwrap(), &[Selector::path("config")]);
            assert!(!area.exists());
        }

        #[test]
        fn test_self_element_query_failure_names_logical_path() {
            let (driver, area) = config_area();
            driver.break_selector(&Selector::path("config")).unwrap();

            let err = area.self_element().unwrap_err();
            assert!(matches!(err, AreaError::ElementNotFound { .. }));
            assert_eq!(err.attempted().unwrap(), &[Selector::path("config")]);
            assert_eq!(
                err.to_string(),
                area.control(&[""]).resolve().unwrap_err().to_string()
            );
            assert!(!area.exists());
        }
    }

    mod wrapper_tests {
        use super::*;

        struct Advanced {
            area: PageArea,
            quiet_period: Control,
        }

        impl Advanced {
            fn new(parent: &impl AsArea) -> AreaResult<Self> {
                let area = PageArea::nested(parent, "advanced")?;
                Ok(Self {
                    quiet_period: area.control(&["quietPeriod"]),
                    area,
                })
            }
        }

        impl AsArea for Advanced {
            fn as_area(&self) -> &PageArea {
                &self.area
            }
        }

        #[test]
        fn test_wrapper_parents_nested_area() {
            let (_, area) = config_area();
            let advanced = Advanced::new(&area).unwrap();
            assert_eq!(
                advanced.quiet_period.candidates(),
                &[Selector::path("config/advanced/quietPeriod")]
            );
            let scm = PageArea::nested(&advanced, "scm").unwrap();
            assert_eq!(scm.path(), "config/advanced/scm");
        }
    }

    proptest! {
        #[test]
        fn prop_absolute_relative_always_rejected(rel in "/[a-zA-Z/]{0,16}") {
            let (driver, area) = config_area();
            prop_assert!(PageArea::nested(&area, &rel).is_err());
            prop_assert_eq!(driver.call_count(), 0);
        }

        #[test]
        fn prop_nested_path_is_join(parent in "[a-z]{1,8}", rel in "[a-z][a-z/]{0,12}") {
            let page = Page::new(Arc::new(MockDriver::new()));
            let area = PageArea::new(&page, parent.clone());
            let nested = PageArea::nested(&area, &rel).unwrap();
            prop_assert_eq!(nested.path(), format!("{parent}/{rel}"));
        }
    }
}
