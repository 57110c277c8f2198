//! In-memory unit of work used by the dish workflow tests.
//!
//! A transaction holds the table lock for its whole lifetime and works on a staged
//! copy, so commits are atomic and concurrent transactions are serialised.

use super::{Dish, DishFilters, DishFlavor, DishFlavorMapper, DishMapper, DishView};
use crate::{
    modules::setmeal::repository::{SetmealDish, SetmealDishMapper},
    utils::{
        database::{Database, Error, Transaction},
        pagination::{Paginated, Pagination},
    },
};
use async_trait::async_trait;
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Clone, Debug, Default)]
pub struct Tables {
    pub categories: BTreeMap<i64, String>,
    pub dishes: BTreeMap<i64, Dish>,
    pub flavors: BTreeMap<i64, DishFlavor>,
    pub setmeal_dishes: Vec<SetmealDish>,
    last_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    pub fn insert_dish(&mut self, mut dish: Dish) -> i64 {
        dish.id = self.next_id();
        let id = dish.id;
        self.dishes.insert(id, dish);
        id
    }

    pub fn insert_flavor(&mut self, mut flavor: DishFlavor) -> i64 {
        flavor.id = self.next_id();
        let id = flavor.id;
        self.flavors.insert(id, flavor);
        id
    }

    pub fn flavors_of(&self, dish_id: i64) -> Vec<DishFlavor> {
        self.flavors
            .values()
            .filter(|flavor| flavor.dish_id == dish_id)
            .cloned()
            .collect()
    }

    fn matches(dish: &Dish, filters: &DishFilters) -> bool {
        filters
            .name
            .as_ref()
            .map_or(true, |name| dish.name.to_lowercase().contains(&name.to_lowercase()))
            && filters
                .category_id
                .map_or(true, |category_id| dish.category_id == category_id)
            && filters.status.map_or(true, |status| dish.status == status)
    }
}

#[derive(Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<Mutex<Tables>>,
    failing_on: Option<&'static str>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call to the mapper method named `operation` fail.
    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.failing_on = Some(operation);
        self
    }

    pub async fn seed<T>(&self, f: impl FnOnce(&mut Tables) -> T) -> T {
        f(&mut *self.tables.lock().await)
    }

    pub async fn snapshot(&self) -> Tables {
        self.tables.lock().await.clone()
    }
}

pub struct MemoryTransaction {
    committed: OwnedMutexGuard<Tables>,
    staged: Tables,
    failing_on: Option<&'static str>,
}

impl MemoryTransaction {
    fn check(&self, operation: &'static str) -> Result<(), Error> {
        if self.failing_on == Some(operation) {
            return Err(Error::Unexpected(sqlx::Error::Protocol(format!(
                "{} failed",
                operation
            ))));
        }

        Ok(())
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    type Transaction = MemoryTransaction;

    async fn begin(&self) -> Result<MemoryTransaction, Error> {
        let committed = self.tables.clone().lock_owned().await;
        let staged = committed.clone();

        Ok(MemoryTransaction {
            committed,
            staged,
            failing_on: self.failing_on,
        })
    }
}

#[async_trait]
impl Transaction for MemoryTransaction {
    async fn commit(self) -> Result<(), Error> {
        self.check("commit")?;

        let Self {
            mut committed,
            staged,
            ..
        } = self;
        *committed = staged;
        Ok(())
    }
}

#[async_trait]
impl DishMapper for MemoryTransaction {
    async fn insert_dish(&mut self, dish: &mut Dish) -> Result<i64, Error> {
        self.check("insert_dish")?;

        if self.staged.dishes.values().any(|other| other.name == dish.name) {
            return Err(Error::Duplicate(dish.name.clone()));
        }

        dish.id = self.staged.insert_dish(dish.clone());
        Ok(dish.id)
    }

    async fn update_dish(&mut self, dish: &mut Dish) -> Result<u64, Error> {
        self.check("update_dish")?;

        if self
            .staged
            .dishes
            .values()
            .any(|other| other.name == dish.name && other.id != dish.id)
        {
            return Err(Error::Duplicate(dish.name.clone()));
        }

        match self.staged.dishes.get_mut(&dish.id) {
            Some(stored) => {
                stored.name = dish.name.clone();
                stored.category_id = dish.category_id;
                stored.price = dish.price.clone();
                stored.image = dish.image.clone();
                stored.description = dish.description.clone();
                stored.status = dish.status;
                stored.updated_at = dish.updated_at;
                stored.updated_by = dish.updated_by;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn get_dish_by_id(&mut self, id: i64) -> Result<Option<Dish>, Error> {
        self.check("get_dish_by_id")?;
        Ok(self.staged.dishes.get(&id).cloned())
    }

    async fn delete_dish_by_id(&mut self, id: i64) -> Result<u64, Error> {
        self.check("delete_dish_by_id")?;
        Ok(self.staged.dishes.remove(&id).map_or(0, |_| 1))
    }

    async fn list_dishes(&mut self, filters: &DishFilters) -> Result<Vec<Dish>, Error> {
        self.check("list_dishes")?;

        Ok(self
            .staged
            .dishes
            .values()
            .rev()
            .filter(|dish| Tables::matches(dish, filters))
            .cloned()
            .collect())
    }

    async fn page_dishes(
        &mut self,
        pagination: &Pagination,
        filters: &DishFilters,
    ) -> Result<Paginated<DishView>, Error> {
        self.check("page_dishes")?;

        let matching = self
            .staged
            .dishes
            .values()
            .rev()
            .filter(|dish| Tables::matches(dish, filters))
            .collect::<Vec<_>>();
        let total = u32::try_from(matching.len()).unwrap_or(u32::MAX);

        let items = matching
            .into_iter()
            .skip(usize::try_from(pagination.offset()).unwrap_or(usize::MAX))
            .take(pagination.per_page as usize)
            .map(|dish| DishView {
                dish: dish.clone(),
                category_name: self.staged.categories.get(&dish.category_id).cloned(),
                flavors: vec![],
            })
            .collect();

        Ok(Paginated::new(
            items,
            total,
            pagination.page,
            pagination.per_page,
        ))
    }
}

#[async_trait]
impl DishFlavorMapper for MemoryTransaction {
    async fn insert_flavors(&mut self, flavors: &[DishFlavor]) -> Result<(), Error> {
        self.check("insert_flavors")?;

        for flavor in flavors {
            self.staged.insert_flavor(flavor.clone());
        }

        Ok(())
    }

    async fn delete_flavors_by_dish_id(&mut self, dish_id: i64) -> Result<u64, Error> {
        self.check("delete_flavors_by_dish_id")?;

        let before = self.staged.flavors.len();
        self.staged.flavors.retain(|_, flavor| flavor.dish_id != dish_id);
        Ok((before - self.staged.flavors.len()) as u64)
    }

    async fn get_flavors_by_dish_id(&mut self, dish_id: i64) -> Result<Vec<DishFlavor>, Error> {
        self.check("get_flavors_by_dish_id")?;
        Ok(self.staged.flavors_of(dish_id))
    }
}

#[async_trait]
impl SetmealDishMapper for MemoryTransaction {
    async fn get_setmeal_ids_by_dish_ids(&mut self, dish_ids: &[i64]) -> Result<Vec<i64>, Error> {
        self.check("get_setmeal_ids_by_dish_ids")?;

        let mut setmeal_ids = self
            .staged
            .setmeal_dishes
            .iter()
            .filter(|link| dish_ids.contains(&link.dish_id))
            .map(|link| link.setmeal_id)
            .collect::<Vec<_>>();
        setmeal_ids.sort_unstable();
        setmeal_ids.dedup();
        Ok(setmeal_ids)
    }

    async fn insert_setmeal_dishes(&mut self, setmeal_dishes: &[SetmealDish]) -> Result<(), Error> {
        self.check("insert_setmeal_dishes")?;

        for setmeal_dish in setmeal_dishes {
            let mut link = setmeal_dish.clone();
            link.id = self.staged.next_id();
            self.staged.setmeal_dishes.push(link);
        }

        Ok(())
    }
}
