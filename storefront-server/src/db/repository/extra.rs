//! Extra Repository

use shared::models::{Extra, ExtraCreate, ExtraUpdate};
use uuid::Uuid;

use super::{RepoError, RepoResult};
use crate::db::store::{EXTRAS, StoreDb};

#[derive(Clone)]
pub struct ExtraRepository {
    store: StoreDb,
}

impl ExtraRepository {
    pub fn new(store: StoreDb) -> Self {
        Self { store }
    }

    pub fn find_all(&self) -> RepoResult<Vec<Extra>> {
        let mut extras: Vec<Extra> = self.store.get_all(EXTRAS)?;
        extras.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(extras)
    }

    pub fn find_by_id(&self, id: &str) -> RepoResult<Option<Extra>> {
        Ok(self.store.get(EXTRAS, id)?)
    }

    pub fn create(&self, data: ExtraCreate) -> RepoResult<Extra> {
        let extra = Extra {
            id: Uuid::new_v4().to_string(),
            name: data.name,
            price: data.price,
        };
        self.store.put(EXTRAS, &extra.id, &extra)?;
        Ok(extra)
    }

    pub fn update(&self, id: &str, data: ExtraUpdate) -> RepoResult<Extra> {
        let mut extra = self
            .find_by_id(id)?
            .ok_or_else(|| RepoError::NotFound(format!("Extra {id}")))?;

        if let Some(name) = data.name {
            extra.name = name;
        }
        if let Some(price) = data.price {
            extra.price = price;
        }

        self.store.put(EXTRAS, id, &extra)?;
        Ok(extra)
    }

    pub fn delete(&self, id: &str) -> RepoResult<()> {
        if !self.store.delete(EXTRAS, id)? {
            return Err(RepoError::NotFound(format!("Extra {id}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_crud_cycle() {
        let repo = ExtraRepository::new(StoreDb::open_in_memory().unwrap());
        let extra = repo
            .create(ExtraCreate {
                name: "Leche de almendra".into(),
                price: Decimal::from(10),
            })
            .unwrap();

        let renamed = repo
            .update(
                &extra.id,
                ExtraUpdate {
                    name: Some("Leche de avena".into()),
                    price: None,
                },
            )
            .unwrap();
        assert_eq!(renamed.name, "Leche de avena");
        assert_eq!(renamed.price, Decimal::from(10));

        repo.delete(&extra.id).unwrap();
        assert!(repo.find_all().unwrap().is_empty());
    }
}
