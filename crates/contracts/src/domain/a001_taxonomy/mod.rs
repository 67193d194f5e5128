pub mod delete_flow;
pub mod form;
pub mod kind;
pub mod navigator;
pub mod node;
pub mod reorder;

pub use kind::{RecordKind, TaxonomyDomain};
pub use node::TaxonomyNode;
