//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu category, the fixed set shown as tabs on the menu board
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MenuCategory {
    Starters,
    #[serde(rename = "Main Course")]
    MainCourse,
    Drinks,
    Desserts,
}

impl MenuCategory {
    /// Display label as shown on the menu board
    pub fn label(&self) -> &'static str {
        match self {
            Self::Starters => "Starters",
            Self::MainCourse => "Main Course",
            Self::Drinks => "Drinks",
            Self::Desserts => "Desserts",
        }
    }
}

/// Menu item entity
///
/// Stable once created; changed only through explicit admin edits, which
/// never touch historical orders (those keep their own item snapshots).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub id: u32,
    pub name: String,
    pub category: MenuCategory,
    /// Unit price in whole currency units (not minor units)
    pub price: Decimal,
    pub description: String,
    /// Image URL reference
    pub image: String,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub category: MenuCategory,
    pub price: Decimal,
    pub description: String,
    pub image: Option<String>,
}

/// Update menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub category: Option<MenuCategory>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub image: Option<String>,
}
