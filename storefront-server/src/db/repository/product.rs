//! Product Repository

use shared::models::{Product, ProductCreate, ProductUpdate};
use uuid::Uuid;

use super::{RepoError, RepoResult};
use crate::db::store::{PRODUCTS, StoreDb};

#[derive(Clone)]
pub struct ProductRepository {
    store: StoreDb,
}

impl ProductRepository {
    pub fn new(store: StoreDb) -> Self {
        Self { store }
    }

    /// All products, admin view (includes unavailable ones)
    pub fn find_all(&self) -> RepoResult<Vec<Product>> {
        let mut products: Vec<Product> = self.store.get_all(PRODUCTS)?;
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    /// Available products only, the customer menu
    pub fn find_available(&self) -> RepoResult<Vec<Product>> {
        let mut products = self.find_all()?;
        products.retain(|p| p.available);
        Ok(products)
    }

    pub fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        Ok(self.store.get(PRODUCTS, id)?)
    }

    pub fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: data.name,
            description: data.description.unwrap_or_default(),
            price: data.price,
            category: data.category,
            image: data.image.unwrap_or_default(),
            available: data.available.unwrap_or(true),
        };
        self.store.put(PRODUCTS, &product.id, &product)?;
        Ok(product)
    }

    pub fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let mut product = self
            .find_by_id(id)?
            .ok_or_else(|| RepoError::NotFound(format!("Product {id}")))?;

        if let Some(name) = data.name {
            product.name = name;
        }
        if let Some(description) = data.description {
            product.description = description;
        }
        if let Some(price) = data.price {
            product.price = price;
        }
        if let Some(category) = data.category {
            product.category = category;
        }
        if let Some(image) = data.image {
            product.image = image;
        }
        if let Some(available) = data.available {
            product.available = available;
        }

        self.store.put(PRODUCTS, id, &product)?;
        Ok(product)
    }

    pub fn delete(&self, id: &str) -> RepoResult<()> {
        if !self.store.delete(PRODUCTS, id)? {
            return Err(RepoError::NotFound(format!("Product {id}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn repo() -> ProductRepository {
        ProductRepository::new(StoreDb::open_in_memory().unwrap())
    }

    fn latte() -> ProductCreate {
        ProductCreate {
            name: "Latte".into(),
            description: Some("Espresso con leche".into()),
            price: Decimal::new(5500, 2),
            category: "Bebidas calientes".into(),
            image: None,
            available: None,
        }
    }

    #[test]
    fn test_create_defaults_available() {
        let repo = repo();
        let product = repo.create(latte()).unwrap();
        assert!(product.available);
        assert!(!product.id.is_empty());
    }

    #[test]
    fn test_update_partial() {
        let repo = repo();
        let product = repo.create(latte()).unwrap();

        let updated = repo
            .update(
                &product.id,
                ProductUpdate {
                    price: Some(Decimal::new(6000, 2)),
                    available: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.price, Decimal::new(6000, 2));
        assert_eq!(updated.name, "Latte");
        assert!(!updated.available);
    }

    #[test]
    fn test_menu_hides_unavailable() {
        let repo = repo();
        let product = repo.create(latte()).unwrap();
        repo.update(
            &product.id,
            ProductUpdate {
                available: Some(false),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(repo.find_all().unwrap().len(), 1);
        assert!(repo.find_available().unwrap().is_empty());
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let repo = repo();
        assert!(matches!(
            repo.delete("nope"),
            Err(RepoError::NotFound(_))
        ));
    }
}
