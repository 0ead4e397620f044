//! Browser driver layer
//!
//! Owns the browser process, its CDP event handler, and the single page a
//! session automates. All operations are timeout-bounded per the L1/L2
//! layers; screenshots follow the payload-size discipline.

pub mod driver;
pub mod js_scripts;
pub mod launch;
pub mod page_info;
pub mod screenshot;
pub mod timeout;

pub use driver::{BrowserDriver, looks_like_css};
pub use launch::{BrowserWrapper, download_managed_browser, find_browser_executable, launch_browser};
pub use page_info::{ButtonInfo, InputInfo, PageInfo, SelectInfo, SelectOptionInfo, TextareaInfo};
pub use screenshot::{Screenshot, ScreenshotSettings, capture, zoom_percent};
pub use timeout::with_layer_timeout;
