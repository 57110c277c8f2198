mod postgres;

#[cfg(test)]
pub mod memory;

use crate::{
    modules::{
        audit::{self, Auditable},
        setmeal::repository::SetmealDishMapper,
    },
    utils::{
        database::Error,
        pagination::{Paginated, Pagination},
    },
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use validator::{Validate, ValidationError};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, sqlx::Type)]
#[serde(try_from = "i32", into = "i32")]
#[repr(i32)]
pub enum DishStatus {
    #[default]
    Disabled = 0,
    Enabled = 1,
}

impl From<DishStatus> for i32 {
    fn from(status: DishStatus) -> Self {
        status as i32
    }
}

impl TryFrom<i32> for DishStatus {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Disabled),
            1 => Ok(Self::Enabled),
            other => Err(format!("invalid dish status {}", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, sqlx::FromRow)]
pub struct Dish {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub price: BigDecimal,
    pub image: String,
    pub description: String,
    pub status: DishStatus,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub created_by: Option<i64>,
    pub updated_by: Option<i64>,
}

impl Auditable for Dish {
    fn set_created_at(&mut self, at: NaiveDateTime) -> Result<(), audit::Error> {
        self.created_at = Some(at);
        Ok(())
    }

    fn set_updated_at(&mut self, at: NaiveDateTime) -> Result<(), audit::Error> {
        self.updated_at = Some(at);
        Ok(())
    }

    fn set_created_by(&mut self, actor_id: Option<i64>) -> Result<(), audit::Error> {
        self.created_by = actor_id;
        Ok(())
    }

    fn set_updated_by(&mut self, actor_id: Option<i64>) -> Result<(), audit::Error> {
        self.updated_by = actor_id;
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, sqlx::FromRow)]
#[serde(default)]
pub struct DishFlavor {
    pub id: i64,
    pub dish_id: i64,
    pub name: String,
    pub value: String,
}

/// A dish as shown to the admin console: its row plus category name and flavors.
#[derive(Serialize, Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct DishView {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub dish: Dish,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[sqlx(skip)]
    pub flavors: Vec<DishFlavor>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct DishFilters {
    pub name: Option<String>,
    pub category_id: Option<i64>,
    pub status: Option<DishStatus>,
}

fn validate_price(price: &BigDecimal) -> Result<(), ValidationError> {
    if *price < BigDecimal::from(0) {
        return Err(ValidationError::new("negative_price"));
    }

    Ok(())
}

fn validate_flavors(flavors: &Vec<DishFlavor>) -> Result<(), ValidationError> {
    if flavors.iter().any(|flavor| flavor.name.trim().is_empty()) {
        return Err(ValidationError::new("empty_flavor_name"));
    }

    Ok(())
}

/// Body accepted when creating or updating a dish.
#[derive(Deserialize, Validate, Clone, Debug)]
pub struct DishPayload {
    #[validate(length(min = 1, max = 32))]
    pub name: String,
    pub category_id: i64,
    #[validate(custom(function = "validate_price"))]
    pub price: BigDecimal,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: DishStatus,
    #[serde(default)]
    #[validate(custom(function = "validate_flavors"))]
    pub flavors: Vec<DishFlavor>,
}

impl DishPayload {
    pub fn into_parts(self) -> (Dish, Vec<DishFlavor>) {
        let dish = Dish {
            name: self.name,
            category_id: self.category_id,
            price: self.price,
            image: self.image,
            description: self.description,
            status: self.status,
            ..Dish::default()
        };

        (dish, self.flavors)
    }
}

crate::mapper! {
    pub trait DishMapper {
        // Stores the generated id back into `dish.id`.
        #[auto_fill(Insert)]
        async fn insert_dish(&mut self, dish: &mut Dish) -> Result<i64, Error>;

        #[auto_fill(Update)]
        async fn update_dish(&mut self, dish: &mut Dish) -> Result<u64, Error>;

        async fn get_dish_by_id(&mut self, id: i64) -> Result<Option<Dish>, Error>;

        async fn delete_dish_by_id(&mut self, id: i64) -> Result<u64, Error>;

        async fn list_dishes(&mut self, filters: &DishFilters) -> Result<Vec<Dish>, Error>;

        async fn page_dishes(
            &mut self,
            pagination: &Pagination,
            filters: &DishFilters
        ) -> Result<Paginated<DishView>, Error>;
    }
}

crate::mapper! {
    pub trait DishFlavorMapper {
        async fn insert_flavors(&mut self, flavors: &[DishFlavor]) -> Result<(), Error>;

        async fn delete_flavors_by_dish_id(&mut self, dish_id: i64) -> Result<u64, Error>;

        async fn get_flavors_by_dish_id(&mut self, dish_id: i64) -> Result<Vec<DishFlavor>, Error>;
    }
}

/// Everything the dish workflow touches inside one unit of work.
pub trait DishStore: DishMapper + DishFlavorMapper + SetmealDishMapper {}

impl<T: DishMapper + DishFlavorMapper + SetmealDishMapper> DishStore for T {}
