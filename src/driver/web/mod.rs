pub mod driver;

pub use driver::{BrowserType, WebDriverConfig, WebLauncher};
