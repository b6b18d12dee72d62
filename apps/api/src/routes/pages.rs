use askama::Template;
use axum::response::Html;

use crate::guard::{RenderGuard, Rendered, TracingSink};

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    version: &'static str,
}

/// GET /
/// Landing page, rendered through a RenderGuard.
pub async fn index_handler() -> Rendered<Html<String>> {
    let mut guard = RenderGuard::new("index page", TracingSink);
    guard.render(|| {
        let page = IndexTemplate {
            version: env!("CARGO_PKG_VERSION"),
        };
        Ok(Html(page.render()?))
    })
}
