//! # Catalog Commands
//!
//! Browsing the category tree and listing new products.
//!
//! ## Browse Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  browse_catalog(None)          browse_catalog(Some(Clothing))           │
//! │  ┌──────────────────┐          ┌──────────────────┐                    │
//! │  │ Clothing       ► │ ───────► │ Men's          ► │ ──► browse(Men's)  │
//! │  │ Games          ► │          │ Women's        ► │     ┌────────────┐ │
//! │  │ Books          ► │          │ Children's     ► │     │ Jacket KL  │ │
//! │  │ Household items► │          └──────────────────┘     │ Hat MW     │ │
//! │  └──────────────────┘          (no products listed      │ Socks UO   │ │
//! │                                 directly on Clothing)   └────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A page holds the direct children of a category and the products listed
//! directly on it. Products of subcategories only show up one level down.

use std::path::PathBuf;

use cozy_core::validation::{parse_price, validate_description, validate_product_name};
use cozy_core::{Category, CoreError, NewProduct, Product};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::ApiError;
use crate::state::{ConfigState, DbState, ImageStore, SessionState};

// =============================================================================
// DTOs
// =============================================================================

/// Product as shown on a catalog page or the product window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    pub price_cents: i64,
    /// Price formatted with the configured currency, e.g. "799.00 ₽".
    pub price: String,
    pub description: String,
    pub category_id: i64,
    /// Set only when the image file exists on disk.
    pub image: Option<PathBuf>,
}

impl ProductView {
    fn new(product: Product, config: &ConfigState, images: &ImageStore) -> Self {
        let image = product
            .image_path
            .as_deref()
            .and_then(|stored| images.resolve(stored));

        ProductView {
            price: config.format_currency(product.price_cents),
            id: product.id,
            name: product.name,
            price_cents: product.price_cents,
            description: product.description,
            category_id: product.category_id,
            image,
        }
    }
}

/// One level of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    /// `None` on the top level.
    pub category: Option<Category>,
    pub subcategories: Vec<Category>,
    pub products: Vec<ProductView>,
}

/// Input of the "add product" form, fields as typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub description: String,
    pub category_id: i64,
    /// File picked in the image dialog, if any.
    pub image: Option<PathBuf>,
}

// =============================================================================
// Commands
// =============================================================================

/// Loads one level of the catalog.
///
/// ## Arguments
/// * `category_id` - `None` for the root categories
///
/// ## Errors
/// * `NOT_FOUND` - `category_id` does not exist
pub async fn browse_catalog(
    db: &DbState,
    config: &ConfigState,
    images: &ImageStore,
    category_id: Option<i64>,
) -> Result<CatalogPage, ApiError> {
    debug!(?category_id, "browse_catalog command");
    let db = db.inner();

    let category = match category_id {
        Some(id) => Some(
            db.categories()
                .get_by_id(id)
                .await?
                .ok_or(CoreError::CategoryNotFound(id))?,
        ),
        None => None,
    };

    let subcategories = db.categories().children(category_id).await?;
    let products = match category_id {
        Some(id) => db.products().list_by_category(id).await?,
        None => Vec::new(),
    };

    Ok(CatalogPage {
        category,
        subcategories,
        products: products
            .into_iter()
            .map(|p| ProductView::new(p, config, images))
            .collect(),
    })
}

pub async fn get_product(
    db: &DbState,
    config: &ConfigState,
    images: &ImageStore,
    product_id: i64,
) -> Result<ProductView, ApiError> {
    let product = db
        .inner()
        .products()
        .get_by_id(product_id)
        .await?
        .ok_or(CoreError::ProductNotFound(product_id))?;

    Ok(ProductView::new(product, config, images))
}

/// Every category, for the category picker of the "add product" form.
pub async fn list_product_categories(db: &DbState) -> Result<Vec<Category>, ApiError> {
    Ok(db.inner().categories().list_all().await?)
}

/// Lists a new product. Sellers only.
///
/// ## Steps
/// 1. Check the session user is a seller
/// 2. Validate every field (nothing is stored if one is bad)
/// 3. Copy the picked image into the images directory
/// 4. Insert the product
///
/// ## Errors
/// * `UNAUTHORIZED` - Nobody is logged in
/// * `FORBIDDEN` - The user is a buyer
/// * `VALIDATION_ERROR` - Empty field, bad price
/// * `NOT_FOUND` - Unknown category
/// * `CONFLICT` - A product with this name exists
pub async fn add_product(
    db: &DbState,
    session: &SessionState,
    config: &ConfigState,
    images: &ImageStore,
    form: ProductForm,
) -> Result<ProductView, ApiError> {
    let user = session.require_user()?;
    if !user.role.can_add_products() {
        return Err(CoreError::PermissionDenied {
            required: "seller".to_string(),
            action: "add products".to_string(),
        }
        .into());
    }

    let name = validate_product_name(&form.name)?;
    let price = parse_price(&form.price)?;
    let description = validate_description(&form.description)?;

    let db = db.inner();
    if db.categories().get_by_id(form.category_id).await?.is_none() {
        return Err(CoreError::CategoryNotFound(form.category_id).into());
    }

    let image_path = match &form.image {
        Some(source) => images.import(source).map_err(|e| {
            error!(?source, error = %e, "Could not copy product image");
            ApiError::internal("Could not copy the image")
        })?,
        None => None,
    };

    let new_product = NewProduct {
        name,
        price_cents: price.cents(),
        description,
        image_path,
        category_id: form.category_id,
    };

    let product = match db.products().insert(&new_product).await {
        Ok(product) => product,
        Err(e) => {
            if let Some(stored) = new_product.image_path.as_deref() {
                if let Err(cleanup) = std::fs::remove_file(images.dir().join(stored)) {
                    warn!(
                        image = %stored,
                        error = %cleanup,
                        "Could not remove image of rejected product"
                    );
                }
            }
            return Err(e.into());
        }
    };

    info!(
        product_id = product.id,
        seller_id = user.id,
        "Product listed"
    );
    Ok(ProductView::new(product, config, images))
}
