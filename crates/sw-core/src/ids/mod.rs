//! ID type wrappers for type safety.

mod id_macro;
pub mod page_key;

use serde::{Deserialize, Serialize};

use id_macro::impl_id;

pub use page_key::PageKey;

/// Identifier of one run of the setup flow, attached to tracing spans.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlowId(String);

impl_id!(FlowId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_ids_are_unique() {
        assert_ne!(FlowId::new(), FlowId::new());
    }
}
