// Summary page layout: glyph metrics for the standard PDF fonts and the greedy
// paginator that places a summary under its title on a single page.
// The paginator is pure and synchronous; callers on the async side run it inside
// tokio::task::spawn_blocking together with PDF construction.

pub mod font_metrics;
pub mod paginator;

pub use font_metrics::{default_page_geometry, get_metrics, PageGeometry};
pub use paginator::{draw, layout, TextCanvas};
