use tracing::error;

use crate::guard::boundary::RenderFailure;

/// Receives every failure a guard captures.
pub trait DiagnosticSink {
    fn record(&self, failure: &RenderFailure);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn record(&self, failure: &RenderFailure) {
        (**self).record(failure);
    }
}

/// Default sink: one `error!` event per captured failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, failure: &RenderFailure) {
        error!(
            component = failure.component(),
            kind = %failure.kind(),
            error = failure.message(),
            captured_at = %failure.captured_at(),
            "Uncaught error"
        );
    }
}
