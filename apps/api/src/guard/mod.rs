// Render-failure containment. A page rendered through a RenderGuard that errors
// or panics is swapped for a fixed fallback view; the failure never escapes
// the guard and is reported through a DiagnosticSink.

pub mod boundary;
pub mod fallback;
pub mod layer;
pub mod sink;

pub use boundary::{RenderGuard, Rendered};
pub use layer::{page_guard, PanicHandler};
pub use sink::TracingSink;
