// Output layout: splits generated text into fixed-height rows on fixed-size pages.
// Pure and CPU-only; PDF encoding lives in `render`.

pub mod page_config;
pub mod pagination;

// Re-export the public API consumed by the renderer and handlers.
pub use page_config::{default_page_config, PageConfig};
pub use pagination::{paginate, PageRows};
