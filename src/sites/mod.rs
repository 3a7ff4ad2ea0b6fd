pub mod error;
pub mod site_loader;
pub mod site_locator;
