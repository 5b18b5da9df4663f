//! Product catalog shown in the storefront showcase.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::ProductId;

/// A plant offered in the showcase.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub original_price: Option<Decimal>,
    pub image: String,
    pub rating: f64,
    pub reviews: u32,
    pub category: String,
    pub is_new: bool,
    pub is_bestseller: bool,
    pub description: String,
    pub care_level: String,
    pub light_requirement: String,
    pub watering_frequency: String,
}

struct Entry {
    id: ProductId,
    name: &'static str,
    price: i64,
    original_price: Option<i64>,
    image: &'static str,
    rating: f64,
    reviews: u32,
    category: &'static str,
    is_new: bool,
    is_bestseller: bool,
    description: &'static str,
    care_level: &'static str,
    light_requirement: &'static str,
    watering_frequency: &'static str,
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: 1,
        name: "Monstera Deliciosa",
        price: 45,
        original_price: Some(60),
        image: "https://images.unsplash.com/photo-1545239705-1564e58b9e4a?w=400&h=400&fit=crop",
        rating: 4.8,
        reviews: 124,
        category: "Indoor Plants",
        is_new: true,
        is_bestseller: false,
        description: "The Swiss Cheese Plant is perfect for beginners. Known for its distinctive split leaves and easy care requirements.",
        care_level: "Easy",
        light_requirement: "Bright, indirect light",
        watering_frequency: "Weekly",
    },
    Entry {
        id: 2,
        name: "Fiddle Leaf Fig",
        price: 85,
        original_price: None,
        image: "https://images.unsplash.com/photo-1586093248292-4e6636b4e3b8?w=400&h=400&fit=crop",
        rating: 4.9,
        reviews: 89,
        category: "Indoor Plants",
        is_new: false,
        is_bestseller: true,
        description: "A stunning statement plant with large, violin-shaped leaves. Perfect for bright corners.",
        care_level: "Moderate",
        light_requirement: "Bright, indirect light",
        watering_frequency: "Bi-weekly",
    },
    Entry {
        id: 3,
        name: "Snake Plant",
        price: 25,
        original_price: Some(35),
        image: "https://images.unsplash.com/photo-1593691509543-c55fb32d8de5?w=400&h=400&fit=crop",
        rating: 4.7,
        reviews: 156,
        category: "Low Maintenance",
        is_new: false,
        is_bestseller: false,
        description: "Nearly indestructible plant that thrives on neglect. Perfect for beginners and low-light spaces.",
        care_level: "Very Easy",
        light_requirement: "Low to bright light",
        watering_frequency: "Monthly",
    },
    Entry {
        id: 4,
        name: "Peace Lily",
        price: 35,
        original_price: None,
        image: "https://images.unsplash.com/photo-1416879595882-3373a0480b5b?w=400&h=400&fit=crop",
        rating: 4.6,
        reviews: 78,
        category: "Flowering Plants",
        is_new: true,
        is_bestseller: false,
        description: "Elegant flowering plant that purifies air and blooms beautiful white flowers.",
        care_level: "Easy",
        light_requirement: "Medium to bright light",
        watering_frequency: "Weekly",
    },
    Entry {
        id: 5,
        name: "Rubber Plant",
        price: 55,
        original_price: Some(70),
        image: "https://images.unsplash.com/photo-1509423350716-97f2360af2e4?w=400&h=400&fit=crop",
        rating: 4.8,
        reviews: 92,
        category: "Indoor Plants",
        is_new: false,
        is_bestseller: true,
        description: "Glossy, dark green leaves make this plant a stunning addition to any room.",
        care_level: "Easy",
        light_requirement: "Bright, indirect light",
        watering_frequency: "Weekly",
    },
    Entry {
        id: 6,
        name: "Pothos Golden",
        price: 20,
        original_price: None,
        image: "https://images.unsplash.com/photo-1572688484438-313a6e50c333?w=400&h=400&fit=crop",
        rating: 4.9,
        reviews: 203,
        category: "Hanging Plants",
        is_new: false,
        is_bestseller: false,
        description: "Trailing vine with heart-shaped leaves. Perfect for hanging baskets or shelves.",
        care_level: "Very Easy",
        light_requirement: "Low to bright light",
        watering_frequency: "Weekly",
    },
];

impl From<&Entry> for Product {
    fn from(e: &Entry) -> Self {
        Product {
            id: e.id,
            name: e.name.to_string(),
            price: Decimal::from(e.price),
            original_price: e.original_price.map(Decimal::from),
            image: e.image.to_string(),
            rating: e.rating,
            reviews: e.reviews,
            category: e.category.to_string(),
            is_new: e.is_new,
            is_bestseller: e.is_bestseller,
            description: e.description.to_string(),
            care_level: e.care_level.to_string(),
            light_requirement: e.light_requirement.to_string(),
            watering_frequency: e.watering_frequency.to_string(),
        }
    }
}

/// All showcase products, in display order.
pub fn products() -> Vec<Product> {
    ENTRIES.iter().map(Product::from).collect()
}

/// Look up a product by id.
pub fn find(id: ProductId) -> Option<Product> {
    ENTRIES.iter().find(|e| e.id == id).map(Product::from)
}
