/// Read side of a readiness gate (for example "radio ready").
///
/// The value starts false and only ever turns true. Pages must query it each
/// time they need it rather than caching the first answer.
pub trait ReadinessPort: Send + Sync {
    fn is_ready(&self) -> bool;
}
