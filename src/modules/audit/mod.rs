//! Audit-field auto-fill.
//!
//! Mapper traits declared through [`mapper!`](crate::mapper) can tag methods with
//! `#[auto_fill(Insert)]` or `#[auto_fill(Update)]`. Calls routed through
//! [`AutoFilled`] then get `created_*`/`updated_*` populated on their first argument
//! before the real mapper runs, using the actor carried by an [`ActorContext`].

mod context;
mod injector;
mod interceptor;

pub use context::ActorContext;
pub use injector::{apply, Auditable, Error};
pub use interceptor::{intercept, AutoFilled};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationKind {
    Create,
    Modify,
}

/// Marker attached to a mapper method declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoFill {
    Insert,
    Update,
}

pub fn classify(marker: AutoFill) -> OperationKind {
    match marker {
        AutoFill::Insert => OperationKind::Create,
        AutoFill::Update => OperationKind::Modify,
    }
}
