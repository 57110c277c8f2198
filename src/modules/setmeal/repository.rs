use crate::utils::database::{Error, PgTransaction};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{types::BigDecimal, Postgres};

/// Link row between a setmeal and one of the dishes it bundles.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, sqlx::FromRow)]
pub struct SetmealDish {
    pub id: i64,
    pub setmeal_id: i64,
    pub dish_id: i64,
    pub name: String,
    pub price: BigDecimal,
    pub copies: i32,
}

crate::mapper! {
    pub trait SetmealDishMapper {
        async fn get_setmeal_ids_by_dish_ids(&mut self, dish_ids: &[i64]) -> Result<Vec<i64>, Error>;

        async fn insert_setmeal_dishes(&mut self, setmeal_dishes: &[SetmealDish]) -> Result<(), Error>;
    }
}

#[async_trait]
impl SetmealDishMapper for PgTransaction {
    async fn get_setmeal_ids_by_dish_ids(&mut self, dish_ids: &[i64]) -> Result<Vec<i64>, Error> {
        sqlx::query_scalar::<_, i64>(
            "
            SELECT DISTINCT setmeal_id
            FROM setmeal_dish
            WHERE dish_id = ANY($1)
            ORDER BY setmeal_id
            ",
        )
        .bind(dish_ids)
        .fetch_all(self.conn())
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to fetch setmeal ids by dish ids {:?}: {}",
                dish_ids,
                err
            );
            Error::from(err)
        })
    }

    async fn insert_setmeal_dishes(&mut self, setmeal_dishes: &[SetmealDish]) -> Result<(), Error> {
        if setmeal_dishes.is_empty() {
            return Ok(());
        }

        sqlx::QueryBuilder::<Postgres>::new(
            "INSERT INTO setmeal_dish (setmeal_id, dish_id, name, price, copies) ",
        )
            .push_values(setmeal_dishes, |mut row, setmeal_dish| {
                row.push_bind(setmeal_dish.setmeal_id)
                    .push_bind(setmeal_dish.dish_id)
                    .push_bind(setmeal_dish.name.as_str())
                    .push_bind(&setmeal_dish.price)
                    .push_bind(setmeal_dish.copies);
            })
            .build()
            .execute(self.conn())
            .await
            .map(|_| ())
            .map_err(|err| {
                tracing::error!("Error occurred while trying to insert setmeal dishes: {}", err);
                Error::from(err)
            })
    }
}
