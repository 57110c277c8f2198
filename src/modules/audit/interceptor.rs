use super::{apply, classify, ActorContext, AutoFill, Auditable, Error};
use chrono::Utc;

/// Fills the audit fields of `entity` for a call tagged with `marker`.
///
/// `now` is taken here, once per intercepted call, and the actor comes from `actor`
/// rather than from anything the caller passed to the mapper.
pub fn intercept<E: Auditable + ?Sized>(
    marker: AutoFill,
    actor: ActorContext,
    entity: &mut E,
) -> Result<(), Error> {
    let kind = classify(marker);
    let now = Utc::now().naive_utc();

    tracing::debug!(
        ?kind,
        actor_id = ?actor.current_actor(),
        "Filling audit fields"
    );

    apply(entity, kind, now, actor.current_actor()).map_err(|err| {
        tracing::error!("Audit field fill aborted: {}", err);
        err
    })
}

/// Decorator that routes mapper calls through [`intercept`].
///
/// Every trait declared with [`mapper!`](crate::mapper) is implemented for
/// `AutoFilled<'_, M>` whenever `M` implements it.
pub struct AutoFilled<'a, M> {
    inner: &'a mut M,
    actor: ActorContext,
}

impl<'a, M> AutoFilled<'a, M> {
    pub fn new(inner: &'a mut M, actor: ActorContext) -> Self {
        Self { inner, actor }
    }

    pub fn actor(&self) -> ActorContext {
        self.actor
    }

    pub fn inner_mut(&mut self) -> &mut M {
        self.inner
    }
}

/// Declares a mapper trait together with its [`AutoFilled`] implementation.
///
/// ```ignore
/// mapper! {
///     pub trait DishMapper {
///         #[auto_fill(Insert)]
///         async fn insert_dish(&mut self, dish: &mut Dish) -> Result<i64, database::Error>;
///
///         async fn get_dish_by_id(&mut self, id: i64) -> Result<Option<Dish>, database::Error>;
///     }
/// }
/// ```
///
/// A marked method's first argument must be `&mut E` with `E: Auditable`, and its
/// error type must implement `From<audit::Error>`.
#[macro_export]
macro_rules! mapper {
    (
        $(#[$meta:meta])*
        $vis:vis trait $name:ident {
            $(
                $(#[auto_fill($marker:ident)])?
                async fn $method:ident(&mut self $(, $arg:ident : $ty:ty)*) -> $ret:ty;
            )*
        }
    ) => {
        $(#[$meta])*
        #[::async_trait::async_trait]
        $vis trait $name: Send {
            $(
                async fn $method(&mut self $(, $arg: $ty)*) -> $ret;
            )*
        }

        #[::async_trait::async_trait]
        impl<'a, M: $name> $name for $crate::modules::audit::AutoFilled<'a, M> {
            $(
                async fn $method(&mut self $(, $arg: $ty)*) -> $ret {
                    let actor = self.actor();
                    $crate::__auto_fill!(actor, [$($marker)?], [$($arg),*]);
                    <M as $name>::$method(self.inner_mut() $(, $arg)*).await
                }
            )*
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __auto_fill {
    ($actor:ident, [], [$($arg:ident),*]) => {
        let _ = $actor;
    };
    ($actor:ident, [$marker:ident], []) => {
        let _ = $actor;
    };
    ($actor:ident, [$marker:ident], [$first:ident $(, $rest:ident)*]) => {
        $crate::modules::audit::intercept(
            $crate::modules::audit::AutoFill::$marker,
            $actor,
            &mut *$first,
        )?;
    };
}
