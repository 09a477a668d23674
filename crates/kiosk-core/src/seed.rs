//! # Seed Menu
//!
//! The menu the kiosk ships with, used when no catalog file is configured.
//! Image refs are the asset names bundled with the app.

use crate::catalog::Catalog;
use crate::error::CoreResult;
use crate::types::{Category, MenuItem};

/// The fifteen shipped items, grouped burger, chicken, drink, side, vegan.
pub fn default_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new("cheeseburger", "치즈버거", 4000, "cheeseburger", Category::Burger),
        MenuItem::new("classicburger", "클래식버거", 5500, "classicburger", Category::Burger),
        MenuItem::new("doubleburger", "더블버거", 3000, "doubleburger", Category::Burger),
        MenuItem::new("hamburger", "햄버거", 2000, "hamburger", Category::Burger),
        MenuItem::new("saladburger", "샐러드버거", 2000, "saladburger", Category::Burger),
        MenuItem::new("chicken", "치킨", 4500, "chicken", Category::Chicken),
        MenuItem::new("cola", "콜라", 5000, "cola", Category::Drink),
        MenuItem::new("icetea", "아이스티", 5000, "icetea", Category::Drink),
        MenuItem::new("lemonade", "레몬에이드", 3000, "lemonade", Category::Drink),
        MenuItem::new("nugget", "너겟", 2000, "nurget", Category::Side),
        MenuItem::new("onionring", "어니언링", 5000, "onionring", Category::Side),
        MenuItem::new("potato", "감자튀김", 3000, "potato", Category::Side),
        MenuItem::new("wing", "버팔로윙", 2000, "wing", Category::Side),
        MenuItem::new("salad", "샐러드", 5000, "salade", Category::Vegan),
        MenuItem::new("monkburger", "스님버거", 3000, "vegeset", Category::Vegan),
    ]
}

/// [`default_menu`] as a validated catalog.
pub fn default_catalog() -> CoreResult<Catalog> {
    Catalog::new(default_menu())
}
