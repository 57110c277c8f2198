//! Dish aggregate workflow: a dish, the flavor rows it owns and the setmeal links
//! that reference it.
//!
//! Every write runs in one unit of work. The batch-delete checks and the deletes share
//! that unit of work but take no locks, so a concurrent writer can still change a
//! dish's status or setmeal links between check and delete.

use super::repository::{
    Dish, DishFilters, DishFlavor, DishFlavorMapper, DishMapper, DishPayload, DishStatus, DishStore,
    DishView,
};
use crate::{
    modules::{
        audit::{ActorContext, AutoFilled},
        setmeal::repository::SetmealDishMapper,
    },
    utils::{
        database::{self, Database, Transaction},
        pagination::{Paginated, Pagination},
    },
};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeletionNotAllowed {
    #[error("Dish {dish_id} is on sale and cannot be deleted")]
    OnSale { dish_id: i64 },
    #[error("Dish is associated with setmeal(s) {setmeal_ids:?} and cannot be deleted")]
    RelatedBySetmeal { setmeal_ids: Vec<i64> },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    DeletionNotAllowed(#[from] DeletionNotAllowed),
    #[error("Dish {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Database(#[from] database::Error),
}

type Result<T> = std::result::Result<T, Error>;

fn stamp(flavors: &mut [DishFlavor], dish_id: i64) {
    for flavor in flavors.iter_mut() {
        flavor.dish_id = dish_id;
    }
}

/// Inserts the dish and its flavors. Returns the generated dish id.
pub async fn save_with_flavors<D>(db: &D, actor: ActorContext, payload: DishPayload) -> Result<i64>
where
    D: Database,
    D::Transaction: DishStore,
{
    let (mut dish, mut flavors) = payload.into_parts();

    let mut tx = db.begin().await?;
    let mut mappers = AutoFilled::new(&mut tx, actor);

    let dish_id = mappers.insert_dish(&mut dish).await?;

    if !flavors.is_empty() {
        stamp(&mut flavors, dish_id);
        mappers.insert_flavors(&flavors).await?;
    }

    tx.commit().await?;

    tracing::info!(dish_id, flavors = flavors.len(), "Dish created");
    Ok(dish_id)
}

/// Updates the dish row and replaces its flavors wholesale.
pub async fn update_with_flavors<D>(
    db: &D,
    actor: ActorContext,
    id: i64,
    payload: DishPayload,
) -> Result<()>
where
    D: Database,
    D::Transaction: DishStore,
{
    let (mut dish, mut flavors) = payload.into_parts();
    dish.id = id;

    let mut tx = db.begin().await?;
    let mut mappers = AutoFilled::new(&mut tx, actor);

    if mappers.update_dish(&mut dish).await? == 0 {
        return Err(Error::NotFound(id));
    }

    mappers.delete_flavors_by_dish_id(id).await?;

    if !flavors.is_empty() {
        stamp(&mut flavors, id);
        mappers.insert_flavors(&flavors).await?;
    }

    tx.commit().await?;

    tracing::info!(dish_id = id, flavors = flavors.len(), "Dish updated");
    Ok(())
}

/// Deletes every dish in `ids` together with its flavors, or none of them.
pub async fn delete_batch<D>(db: &D, ids: &[i64]) -> Result<()>
where
    D: Database,
    D::Transaction: DishStore,
{
    if ids.is_empty() {
        return Ok(());
    }

    let mut tx = db.begin().await?;

    for &id in ids {
        let dish = tx.get_dish_by_id(id).await?.ok_or(Error::NotFound(id))?;

        if dish.status == DishStatus::Enabled {
            return Err(DeletionNotAllowed::OnSale { dish_id: id }.into());
        }
    }

    let setmeal_ids = tx.get_setmeal_ids_by_dish_ids(ids).await?;
    if !setmeal_ids.is_empty() {
        return Err(DeletionNotAllowed::RelatedBySetmeal { setmeal_ids }.into());
    }

    for &id in ids {
        tx.delete_dish_by_id(id).await?;
        tx.delete_flavors_by_dish_id(id).await?;
    }

    tx.commit().await?;

    tracing::info!(?ids, "Dishes deleted");
    Ok(())
}

pub async fn get_by_id_with_flavors<D>(db: &D, id: i64) -> Result<DishView>
where
    D: Database,
    D::Transaction: DishStore,
{
    let mut tx = db.begin().await?;

    let dish = tx.get_dish_by_id(id).await?.ok_or(Error::NotFound(id))?;
    let flavors = tx.get_flavors_by_dish_id(id).await?;

    tx.commit().await?;

    Ok(DishView {
        dish,
        category_name: None,
        flavors,
    })
}

/// Dishes of `category_id` that are currently on sale.
pub async fn list<D>(db: &D, category_id: i64) -> Result<Vec<Dish>>
where
    D: Database,
    D::Transaction: DishStore,
{
    let mut tx = db.begin().await?;

    let dishes = tx
        .list_dishes(&DishFilters {
            name: None,
            category_id: Some(category_id),
            status: Some(DishStatus::Enabled),
        })
        .await?;

    tx.commit().await?;
    Ok(dishes)
}

pub async fn page_query<D>(
    db: &D,
    pagination: Pagination,
    filters: DishFilters,
) -> Result<Paginated<DishView>>
where
    D: Database,
    D::Transaction: DishStore,
{
    let mut tx = db.begin().await?;
    let page = tx.page_dishes(&pagination, &filters).await?;
    tx.commit().await?;
    Ok(page)
}
