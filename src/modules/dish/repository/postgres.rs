use super::{Dish, DishFilters, DishFlavor, DishFlavorMapper, DishMapper, DishView};
use crate::utils::{
    database::{Error, PgTransaction},
    pagination::{Paginated, Pagination},
};
use async_trait::async_trait;
use sqlx::Postgres;

#[async_trait]
impl DishMapper for PgTransaction {
    async fn insert_dish(&mut self, dish: &mut Dish) -> Result<i64, Error> {
        let id = sqlx::query_scalar::<_, i64>(
            "
            INSERT INTO dish (
                name,
                category_id,
                price,
                image,
                description,
                status,
                created_at,
                updated_at,
                created_by,
                updated_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            ",
        )
        .bind(&dish.name)
        .bind(dish.category_id)
        .bind(&dish.price)
        .bind(&dish.image)
        .bind(&dish.description)
        .bind(dish.status)
        .bind(dish.created_at)
        .bind(dish.updated_at)
        .bind(dish.created_by)
        .bind(dish.updated_by)
        .fetch_one(self.conn())
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to create a dish: {}", err);
            Error::from(err)
        })?;

        dish.id = id;
        Ok(id)
    }

    async fn update_dish(&mut self, dish: &mut Dish) -> Result<u64, Error> {
        sqlx::query(
            "
            UPDATE dish SET
                name = $1,
                category_id = $2,
                price = $3,
                image = $4,
                description = $5,
                status = $6,
                updated_at = $7,
                updated_by = $8
            WHERE
                id = $9
            ",
        )
        .bind(&dish.name)
        .bind(dish.category_id)
        .bind(&dish.price)
        .bind(&dish.image)
        .bind(&dish.description)
        .bind(dish.status)
        .bind(dish.updated_at)
        .bind(dish.updated_by)
        .bind(dish.id)
        .execute(self.conn())
        .await
        .map(|result| result.rows_affected())
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to update a dish by id {}: {}",
                dish.id,
                err
            );
            Error::from(err)
        })
    }

    async fn get_dish_by_id(&mut self, id: i64) -> Result<Option<Dish>, Error> {
        sqlx::query_as::<_, Dish>("SELECT * FROM dish WHERE id = $1")
            .bind(id)
            .fetch_optional(self.conn())
            .await
            .map_err(|err| {
                tracing::error!("Error occurred while trying to fetch a dish by id: {}", err);
                Error::from(err)
            })
    }

    async fn delete_dish_by_id(&mut self, id: i64) -> Result<u64, Error> {
        sqlx::query("DELETE FROM dish WHERE id = $1")
            .bind(id)
            .execute(self.conn())
            .await
            .map(|result| result.rows_affected())
            .map_err(|err| {
                tracing::error!(
                    "Error occurred while trying to delete a dish by id {}: {}",
                    id,
                    err
                );
                Error::from(err)
            })
    }

    async fn list_dishes(&mut self, filters: &DishFilters) -> Result<Vec<Dish>, Error> {
        sqlx::query_as::<_, Dish>(
            "
            SELECT
                *
            FROM
                dish
            WHERE
                ($1::TEXT IS NULL OR name ILIKE CONCAT('%', $1, '%'))
                AND ($2::BIGINT IS NULL OR category_id = $2)
                AND ($3::INTEGER IS NULL OR status = $3)
            ORDER BY
                created_at DESC NULLS LAST,
                id DESC
            ",
        )
        .bind(filters.name.as_deref())
        .bind(filters.category_id)
        .bind(filters.status)
        .fetch_all(self.conn())
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to list dishes: {}", err);
            Error::from(err)
        })
    }

    async fn page_dishes(
        &mut self,
        pagination: &Pagination,
        filters: &DishFilters,
    ) -> Result<Paginated<DishView>, Error> {
        let total = sqlx::query_scalar::<_, i64>(
            "
            SELECT
                COUNT(dish.id)
            FROM
                dish
            WHERE
                ($1::TEXT IS NULL OR dish.name ILIKE CONCAT('%', $1, '%'))
                AND ($2::BIGINT IS NULL OR dish.category_id = $2)
                AND ($3::INTEGER IS NULL OR dish.status = $3)
            ",
        )
        .bind(filters.name.as_deref())
        .bind(filters.category_id)
        .bind(filters.status)
        .fetch_one(self.conn())
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to count dishes: {}", err);
            Error::from(err)
        })?;

        let items = sqlx::query_as::<_, DishView>(
            "
            SELECT
                dish.*,
                category.name AS category_name
            FROM
                dish
            LEFT JOIN
                category
            ON
                dish.category_id = category.id
            WHERE
                ($1::TEXT IS NULL OR dish.name ILIKE CONCAT('%', $1, '%'))
                AND ($2::BIGINT IS NULL OR dish.category_id = $2)
                AND ($3::INTEGER IS NULL OR dish.status = $3)
            ORDER BY
                dish.created_at DESC NULLS LAST,
                dish.id DESC
            LIMIT $4 OFFSET $5
            ",
        )
        .bind(filters.name.as_deref())
        .bind(filters.category_id)
        .bind(filters.status)
        .bind(i64::from(pagination.per_page))
        .bind(pagination.offset())
        .fetch_all(self.conn())
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to fetch a page of dishes: {}", err);
            Error::from(err)
        })?;

        Ok(Paginated::new(
            items,
            u32::try_from(total).unwrap_or(u32::MAX),
            pagination.page,
            pagination.per_page,
        ))
    }
}

#[async_trait]
impl DishFlavorMapper for PgTransaction {
    async fn insert_flavors(&mut self, flavors: &[DishFlavor]) -> Result<(), Error> {
        if flavors.is_empty() {
            return Ok(());
        }

        sqlx::QueryBuilder::<Postgres>::new("INSERT INTO dish_flavor (dish_id, name, value) ")
            .push_values(flavors, |mut row, flavor| {
                row.push_bind(flavor.dish_id)
                    .push_bind(flavor.name.as_str())
                    .push_bind(flavor.value.as_str());
            })
            .build()
            .execute(self.conn())
            .await
            .map(|_| ())
            .map_err(|err| {
                tracing::error!("Error occurred while trying to insert dish flavors: {}", err);
                Error::from(err)
            })
    }

    async fn delete_flavors_by_dish_id(&mut self, dish_id: i64) -> Result<u64, Error> {
        sqlx::query("DELETE FROM dish_flavor WHERE dish_id = $1")
            .bind(dish_id)
            .execute(self.conn())
            .await
            .map(|result| result.rows_affected())
            .map_err(|err| {
                tracing::error!(
                    "Error occurred while trying to delete flavors of dish {}: {}",
                    dish_id,
                    err
                );
                Error::from(err)
            })
    }

    async fn get_flavors_by_dish_id(&mut self, dish_id: i64) -> Result<Vec<DishFlavor>, Error> {
        sqlx::query_as::<_, DishFlavor>("SELECT * FROM dish_flavor WHERE dish_id = $1 ORDER BY id")
            .bind(dish_id)
            .fetch_all(self.conn())
            .await
            .map_err(|err| {
                tracing::error!(
                    "Error occurred while trying to fetch flavors of dish {}: {}",
                    dish_id,
                    err
                );
                Error::from(err)
            })
    }
}
