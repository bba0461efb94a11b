//! Example: Page Areas over a job configuration form
//!
//! Demonstrates: nested page areas, fallback paths, lazy controls
//!
//! Run with: `cargo run --example job_config`

use pagearea::prelude::*;
use std::sync::Arc;

/// The "Advanced" section of a job configuration page
struct AdvancedOptions {
    area: PageArea,
    quiet_period: Control,
    custom_workspace: Control,
}

impl AdvancedOptions {
    fn new(parent: &impl AsArea) -> AreaResult<Self> {
        let area = PageArea::nested(parent, "advanced")?;
        Ok(Self {
            quiet_period: area.control(&["quietPeriod"]),
            // renamed between form versions
            custom_workspace: area.control(&["customWorkspace", "hasCustomWorkspace/customWorkspace"]),
            area,
        })
    }
}

impl AsArea for AdvancedOptions {
    fn as_area(&self) -> &PageArea {
        &self.area
    }
}

fn main() -> AreaResult<()> {
    let _ = pagearea::logging::init_tracing(&AreaConfig::new().with_log_filter("pagearea=debug"));

    println!("=== Page Area Example ===\n");

    // 1. A page whose form uses the newer workspace path
    let driver = Arc::new(MockDriver::new());
    driver.add_element(&Selector::path("config/advanced"), ElementHandle::new("adv", "div"))?;
    driver.add_element(
        &Selector::path("config/advanced/quietPeriod"),
        ElementHandle::input().with_value("5"),
    )?;
    driver.add_element(
        &Selector::path("config/advanced/hasCustomWorkspace/customWorkspace"),
        ElementHandle::input(),
    )?;

    // 2. Build the page object; nothing is queried yet
    let page = Page::with_config(driver.clone(), AreaConfig::new().with_root_path("config"));
    let config = page.root_area();
    let advanced = AdvancedOptions::new(&config)?;
    println!("1. Built page object for {:?}", advanced.as_area().path());
    println!("   Driver calls so far: {}", driver.call_count());

    // 3. Use the controls
    println!("\n2. Reading and writing controls...");
    println!("   quietPeriod = {:?}", advanced.quiet_period.value()?);
    advanced.custom_workspace.set("/var/ws/nightly")?;
    println!(
        "   customWorkspace resolved via {}",
        advanced
            .custom_workspace
            .matching_candidate()
            .map_or_else(|| "<none>".to_string(), ToString::to_string)
    );

    // 4. Failures
    println!("\n3. Failures...");
    match PageArea::nested(&config, "/scm") {
        Err(e) => println!("   nested(\"/scm\"): {e}"),
        Ok(area) => println!("   unexpected area {}", area.path()),
    }
    match config.control(&["scm/url", "scmUrl"]).resolve() {
        Err(e) => println!("   resolve(): {e}"),
        Ok(element) => println!("   unexpected element {}", element.id),
    }

    println!("\n✅ Page area example completed!");
    Ok(())
}
