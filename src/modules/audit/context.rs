/// Identity of whoever is driving the current unit of work.
///
/// Built once per request by the auth extractor and passed down explicitly, so two
/// requests in flight never share one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActorContext {
    actor_id: Option<i64>,
}

impl ActorContext {
    pub const fn new(actor_id: i64) -> Self {
        Self {
            actor_id: Some(actor_id),
        }
    }

    /// Context for writes not initiated by an employee. Audit actor columns end up `NULL`.
    pub const fn system() -> Self {
        Self { actor_id: None }
    }

    pub const fn current_actor(&self) -> Option<i64> {
        self.actor_id
    }
}
