//! Demo data for development stores.

use velvet_commerce::catalog::{Category, Product};
use velvet_commerce::error::CommerceError;
use velvet_commerce::ids::{CategoryId, ProductId, UserId};
use velvet_commerce::money::{Currency, Money};
use velvet_commerce::users::User;

use crate::memory::MemoryStore;

impl MemoryStore {
    /// Populate the store with a small, fixed catalog.
    ///
    /// IDs are stable strings ("prod-floral-perfume", "user-admin", ...) so
    /// examples and tests can reference the rows directly.
    pub fn seed_demo(&self) -> Result<(), CommerceError> {
        let fragrance = seeded(
            Category::new("Fragrance").with_description("Perfumes and colognes"),
            "cat-fragrance",
        );
        let makeup = seeded(
            Category::new("Makeup").with_description("Lipsticks, foundations and more"),
            "cat-makeup",
        );
        let skincare = seeded(
            Category::new("Skincare").with_description("Creams and moisturizers"),
            "cat-skincare",
        );

        let mut floral = Product::new(
            "Floral Perfume",
            Money::new(8990, Currency::USD),
            50,
            fragrance.id.clone(),
        )
        .with_description("A light floral fragrance for everyday wear")
        .with_image_url("/images/floral-perfume.jpg");
        floral.id = ProductId::new("prod-floral-perfume");

        let mut lipstick = Product::new(
            "Red Lipstick",
            Money::new(3550, Currency::USD),
            100,
            makeup.id.clone(),
        )
        .with_description("Long-lasting matte red lipstick")
        .with_image_url("/images/red-lipstick.jpg");
        lipstick.id = ProductId::new("prod-red-lipstick");

        let mut moisturizer = Product::new(
            "Facial Moisturizer",
            Money::new(4599, Currency::USD),
            75,
            skincare.id.clone(),
        )
        .with_description("Daily hydrating cream for all skin types")
        .with_image_url("/images/facial-moisturizer.jpg");
        moisturizer.id = ProductId::new("prod-facial-moisturizer");

        let mut admin = User::new("Store Admin", "admin@velvet.test");
        admin.id = UserId::new("user-admin");

        self.insert_category(fragrance)?;
        self.insert_category(makeup)?;
        self.insert_category(skincare)?;
        self.insert_product(floral)?;
        self.insert_product(lipstick)?;
        self.insert_product(moisturizer)?;
        self.insert_user(admin)?;
        Ok(())
    }
}

fn seeded(mut category: Category, id: &str) -> Category {
    category.id = CategoryId::new(id);
    category
}
