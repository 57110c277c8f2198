use super::OperationKind;
use chrono::NaiveDateTime;
use std::any::type_name;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{entity} has no mutator for audit field `{field}`")]
    MissingMutator {
        entity: &'static str,
        field: &'static str,
    },
}

fn missing<T: ?Sized>(field: &'static str) -> Error {
    Error::MissingMutator {
        entity: type_name::<T>(),
        field,
    }
}

/// Capability implemented by every persisted type that carries audit fields.
///
/// Each mutator defaults to failing with [`Error::MissingMutator`], so a type only
/// overrides the fields it actually stores.
pub trait Auditable {
    fn set_created_at(&mut self, _at: NaiveDateTime) -> Result<(), Error> {
        Err(missing::<Self>("created_at"))
    }

    fn set_updated_at(&mut self, _at: NaiveDateTime) -> Result<(), Error> {
        Err(missing::<Self>("updated_at"))
    }

    fn set_created_by(&mut self, _actor_id: Option<i64>) -> Result<(), Error> {
        Err(missing::<Self>("created_by"))
    }

    fn set_updated_by(&mut self, _actor_id: Option<i64>) -> Result<(), Error> {
        Err(missing::<Self>("updated_by"))
    }
}

/// Populates the audit fields `kind` is responsible for. Stops at the first missing
/// mutator.
pub fn apply<E: Auditable + ?Sized>(
    entity: &mut E,
    kind: OperationKind,
    now: NaiveDateTime,
    actor_id: Option<i64>,
) -> Result<(), Error> {
    match kind {
        OperationKind::Create => {
            entity.set_created_at(now)?;
            entity.set_updated_at(now)?;
            entity.set_created_by(actor_id)?;
            entity.set_updated_by(actor_id)
        }
        OperationKind::Modify => {
            entity.set_updated_at(now)?;
            entity.set_updated_by(actor_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[derive(Default, Debug, Clone, PartialEq)]
    struct Row {
        created_at: Option<NaiveDateTime>,
        updated_at: Option<NaiveDateTime>,
        created_by: Option<i64>,
        updated_by: Option<i64>,
    }

    impl Auditable for Row {
        fn set_created_at(&mut self, at: NaiveDateTime) -> Result<(), Error> {
            self.created_at = Some(at);
            Ok(())
        }

        fn set_updated_at(&mut self, at: NaiveDateTime) -> Result<(), Error> {
            self.updated_at = Some(at);
            Ok(())
        }

        fn set_created_by(&mut self, actor_id: Option<i64>) -> Result<(), Error> {
            self.created_by = actor_id;
            Ok(())
        }

        fn set_updated_by(&mut self, actor_id: Option<i64>) -> Result<(), Error> {
            self.updated_by = actor_id;
            Ok(())
        }
    }

    // Only tracks the "updated" pair.
    #[derive(Default)]
    struct Touched {
        updated_at: Option<NaiveDateTime>,
        updated_by: Option<i64>,
    }

    impl Auditable for Touched {
        fn set_updated_at(&mut self, at: NaiveDateTime) -> Result<(), Error> {
            self.updated_at = Some(at);
            Ok(())
        }

        fn set_updated_by(&mut self, actor_id: Option<i64>) -> Result<(), Error> {
            self.updated_by = actor_id;
            Ok(())
        }
    }

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, 19)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .unwrap()
    }

    #[test]
    fn create_sets_all_four_fields() {
        let mut row = Row::default();

        apply(&mut row, OperationKind::Create, at(9), Some(7)).unwrap();

        assert_eq!(row.created_at, Some(at(9)));
        assert_eq!(row.updated_at, row.created_at);
        assert_eq!(row.created_by, Some(7));
        assert_eq!(row.updated_by, row.created_by);
    }

    #[test]
    fn modify_leaves_created_fields_alone() {
        let mut row = Row {
            created_at: Some(at(8)),
            updated_at: Some(at(8)),
            created_by: Some(1),
            updated_by: Some(1),
        };

        apply(&mut row, OperationKind::Modify, at(12), Some(2)).unwrap();

        assert_eq!(row.created_at, Some(at(8)));
        assert_eq!(row.created_by, Some(1));
        assert_eq!(row.updated_at, Some(at(12)));
        assert_eq!(row.updated_by, Some(2));
    }

    #[test]
    fn system_writes_record_no_actor() {
        let mut row = Row {
            created_by: Some(3),
            updated_by: Some(3),
            ..Row::default()
        };

        apply(&mut row, OperationKind::Modify, at(10), None).unwrap();

        assert_eq!(row.updated_by, None);
        assert_eq!(row.created_by, Some(3));
    }

    #[test]
    fn missing_mutator_fails_fast() {
        let mut touched = Touched::default();

        let err = apply(&mut touched, OperationKind::Create, at(9), Some(7)).unwrap_err();

        assert!(matches!(
            err,
            Error::MissingMutator {
                field: "created_at",
                ..
            }
        ));
        assert_eq!(touched.updated_at, None);
        assert!(err.to_string().contains("Touched"));
    }

    #[test]
    fn partial_entity_still_supports_modify() {
        let mut touched = Touched::default();

        apply(&mut touched, OperationKind::Modify, at(9), Some(7)).unwrap();

        assert_eq!(touched.updated_at, Some(at(9)));
        assert_eq!(touched.updated_by, Some(7));
    }
}
