//! Built-in default menu
//!
//! Written into an empty catalog the first time a station opens.

use rust_decimal::Decimal;
use shared::models::{MenuCategory, MenuItem};

/// The default menu seeded on first open
pub fn default_menu() -> Vec<MenuItem> {
    vec![
        MenuItem {
            id: 1,
            name: "Chicken Biryani".to_string(),
            category: MenuCategory::MainCourse,
            price: Decimal::from(180),
            description: "Aromatic rice dish with tender chicken and spices.".to_string(),
            image: "https://picsum.photos/seed/1/600/400".to_string(),
        },
        MenuItem {
            id: 2,
            name: "Paneer Butter Masala".to_string(),
            category: MenuCategory::MainCourse,
            price: Decimal::from(160),
            description: "Creamy and rich curry with soft paneer cubes.".to_string(),
            image: "https://picsum.photos/seed/2/600/400".to_string(),
        },
        MenuItem {
            id: 3,
            name: "French Fries".to_string(),
            category: MenuCategory::Starters,
            price: Decimal::from(90),
            description: "Crispy golden-fried potato sticks.".to_string(),
            image: "https://picsum.photos/seed/3/600/400".to_string(),
        },
        MenuItem {
            id: 4,
            name: "Lime Soda".to_string(),
            category: MenuCategory::Drinks,
            price: Decimal::from(40),
            description: "Refreshing sparkling drink with a tangy lime twist.".to_string(),
            image: "https://picsum.photos/seed/4/600/400".to_string(),
        },
        MenuItem {
            id: 5,
            name: "Gulab Jamun".to_string(),
            category: MenuCategory::Desserts,
            price: Decimal::from(70),
            description: "Soft, spongy balls soaked in sweet syrup.".to_string(),
            image: "https://picsum.photos/seed/5/600/400".to_string(),
        },
    ]
}
