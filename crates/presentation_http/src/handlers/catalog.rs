//! Demo catalog handlers
//!
//! Each handler runs one decision sequence before doing its work: step 1 is
//! the network delay, step 2 the error check. Replaying a request with the
//! same seed replays the same delay and the same outcome.

use application::DecisionSequence;
use axum::{
    Json,
    body::Bytes,
    extract::Path,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use super::common::RequestChaos;
use crate::error::ApiError;

/// Catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: f64,
    pub category: &'static str,
    pub brand: &'static str,
    pub in_stock: bool,
    pub rating: f64,
}

#[allow(clippy::too_many_arguments)]
const fn product(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price: f64,
    category: &'static str,
    brand: &'static str,
    in_stock: bool,
    rating: f64,
) -> Product {
    Product {
        id,
        name,
        description,
        price,
        category,
        brand,
        in_stock,
        rating,
    }
}

/// Fixed demo catalog
pub static PRODUCTS: [Product; 12] = [
    product("1", "Laptop Pro 15\"", "High-performance laptop with a retina display", 1299.99, "Electronics", "TechBrand", true, 4.5),
    product("2", "Smartphone Ultra", "Flagship smartphone with a 108MP camera", 899.99, "Electronics", "TechBrand", true, 4.8),
    product("3", "Wireless Earbuds", "Bluetooth earbuds with active noise cancelling", 199.99, "Electronics", "AudioPro", true, 4.3),
    product("4", "Smart Watch", "Smart watch with health tracking", 299.99, "Electronics", "WearTech", false, 4.2),
    product("5", "Tablet 10\"", "Android tablet with stylus included", 499.99, "Electronics", "TechBrand", true, 4.0),
    product("6", "Mechanical Keyboard", "Gaming keyboard with RGB switches", 149.99, "Accessories", "GamingGear", true, 4.6),
    product("7", "Gaming Mouse", "High-precision 16000 DPI optical mouse", 79.99, "Accessories", "GamingGear", true, 4.7),
    product("8", "Gaming Headset", "7.1 surround headset with detachable mic", 129.99, "Accessories", "GamingGear", true, 4.4),
    product("9", "HD Webcam", "1080p webcam with built-in microphone", 89.99, "Accessories", "TechBrand", false, 4.1),
    product("10", "External Hard Drive", "2TB USB-C external drive", 119.99, "Storage", "DataStore", true, 4.5),
    product("11", "SSD 1TB", "High-speed NVMe M.2 SSD", 149.99, "Storage", "DataStore", true, 4.8),
    product("12", "USB-C Cable", "USB-C to USB-C cable, 2m", 19.99, "Accessories", "TechBrand", true, 3.9),
];

/// Look up a product by id
pub fn find_product(id: &str) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.id == id)
}

/// Product list response
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: &'static [Product],
}

/// Single product response
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub product: &'static Product,
}

/// Cart confirmation
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub success: bool,
    pub item: serde_json::Value,
}

/// List every product
pub async fn list_products(chaos: RequestChaos) -> Result<Json<ProductsResponse>, ApiError> {
    DecisionSequence::new(&chaos.config)
        .guard("list_products")
        .await?;
    Ok(Json(ProductsResponse {
        products: &PRODUCTS,
    }))
}

/// Fetch one product; a simulated failure looks like a missing product
pub async fn get_product(
    Path(id): Path<String>,
    chaos: RequestChaos,
) -> Result<Json<ProductResponse>, ApiError> {
    let not_found = || ApiError::NotFound("Product not found".to_string());

    DecisionSequence::new(&chaos.config)
        .guard("get_product")
        .await
        .map_err(|_| not_found())?;

    let product = find_product(&id).ok_or_else(not_found)?;
    Ok(Json(ProductResponse { product }))
}

/// Echo the submitted cart item
///
/// The body is only parsed once the delay and error check have passed, so a
/// failing seed answers 500 whatever was sent.
pub async fn add_to_cart(chaos: RequestChaos, body: Bytes) -> Result<Response, ApiError> {
    let parsed = DecisionSequence::new(&chaos.config)
        .wrap("add_to_cart", async {
            Ok(serde_json::from_slice::<serde_json::Value>(&body))
        })
        .await?;
    let item = parsed.map_err(|e| ApiError::BadRequest(format!("Invalid cart item: {e}")))?;

    Ok(Json(CartResponse {
        success: true,
        item,
    })
    .into_response())
}
