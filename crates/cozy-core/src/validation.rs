//! # Validation Module
//!
//! Input validation and parsing for the storefront forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form widgets (GUI)                                           │
//! │  └── Raw text: "799,50", "3", "+7 916 123-45-67"                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront command (Rust)                                    │
//! │  └── THIS MODULE: parse text, trim, enforce business rules             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / UNIQUE constraints                                     │
//! │  ├── CHECK (price_cents >= 0, quantity > 0, total = unit x qty)        │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validators that accept text return the cleaned value so callers store
//! exactly what was checked.
//!
//! ## Usage
//! ```rust
//! use cozy_core::validation::{parse_price, parse_quantity};
//!
//! let price = parse_price("799,50").unwrap();
//! assert_eq!(price.cents(), 79_950);
//!
//! assert_eq!(parse_quantity(" 3 ").unwrap(), 3);
//! assert!(parse_quantity("0").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted phone number, counting separators.
pub const MAX_PHONE_LEN: usize = 32;

pub const MAX_DISPLAY_NAME_LEN: usize = 100;

pub const MAX_PRODUCT_NAME_LEN: usize = 200;

pub const MAX_DESCRIPTION_LEN: usize = 2000;

pub const MAX_PASSWORD_LEN: usize = 128;

// =============================================================================
// String Validators
// =============================================================================

/// Trims `value` and fails with [`ValidationError::Required`] when nothing is left.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(value.to_string())
}

fn validate_max_chars(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

/// Validates a phone number used as a login.
///
/// ## Rules
/// - Must not be empty
/// - Digits, `+`, spaces, hyphens and parentheses only
/// - At least one digit
/// - At most 32 characters
///
/// ## Example
/// ```rust
/// use cozy_core::validation::validate_phone;
///
/// assert_eq!(validate_phone(" +79161234567 ").unwrap(), "+79161234567");
/// assert!(validate_phone("+7 (916) 123-45-67").is_ok());
/// assert!(validate_phone("call me").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<String> {
    let phone = validate_required("phone", phone)?;
    validate_max_chars("phone", &phone, MAX_PHONE_LEN)?;

    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')');
    if !phone.chars().all(allowed) {
        return Err(ValidationError::invalid_format(
            "phone",
            "only digits, '+', spaces, hyphens and parentheses are allowed",
        ));
    }
    if !phone.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::invalid_format(
            "phone",
            "must contain digits",
        ));
    }

    Ok(phone)
}

/// Validates a password before hashing.
///
/// Passwords are not trimmed: surrounding spaces are part of the secret.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.trim().is_empty() {
        return Err(ValidationError::required("password"));
    }
    validate_max_chars("password", password, MAX_PASSWORD_LEN)
}

pub fn validate_display_name(name: &str) -> ValidationResult<String> {
    let name = validate_required("name", name)?;
    validate_max_chars("name", &name, MAX_DISPLAY_NAME_LEN)?;
    Ok(name)
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Maximum 200 characters
///
/// ## Example
/// ```rust
/// use cozy_core::validation::validate_product_name;
///
/// assert!(validate_product_name("War and Peace").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = validate_required("name", name)?;
    validate_max_chars("name", &name, MAX_PRODUCT_NAME_LEN)?;
    Ok(name)
}

pub fn validate_description(description: &str) -> ValidationResult<String> {
    let description = validate_required("description", description)?;
    validate_max_chars("description", &description, MAX_DESCRIPTION_LEN)?;
    Ok(description)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses the price typed into the "add product" form.
///
/// ## Rules
/// - Must be a number with at most two decimals (`.` or `,` separator)
/// - Must be greater than zero
///
/// Seed products may cost zero; new listings may not.
pub fn parse_price(text: &str) -> ValidationResult<Money> {
    let text = validate_required("price", text)?;
    let price = Money::parse(&text).ok_or_else(|| {
        ValidationError::invalid_format("price", "expected a number like 799 or 799.50")
    })?;

    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(price)
}

/// Parses the quantity typed next to "add to cart".
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product page: Add to cart                                              │
/// │                                                                         │
/// │  User types quantity: "3"                                              │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  parse_quantity("3") ← THIS FUNCTION                                   │
/// │       │                                                                 │
/// │       ├── not an integer? → "quantity has invalid format"              │
/// │       ├── qty <= 0?       → "quantity must be positive"                │
/// │       ├── qty > 999?      → "quantity must be between 1 and 999"       │
/// │       │                                                                 │
/// │       └── OK → NewCartItem::for_product                                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn parse_quantity(text: &str) -> ValidationResult<i64> {
    let text = validate_required("quantity", text)?;
    let qty: i64 = text
        .parse()
        .map_err(|_| ValidationError::invalid_format("quantity", "expected a whole number"))?;
    validate_quantity(qty)?;
    Ok(qty)
}

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a stored price in kopecks.
///
/// ## Example
/// ```rust
/// use cozy_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(79_900).is_ok());
/// assert!(validate_price_cents(0).is_ok());     // Free item
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone() {
        assert_eq!(validate_phone("+79161234567").unwrap(), "+79161234567");
        assert!(validate_phone("8 (916) 123-45-67").is_ok());
        assert!(matches!(
            validate_phone("  "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_phone("+7916abc"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(validate_phone("+()- ").is_err());
        assert!(matches!(
            validate_phone(&"1".repeat(33)),
            Err(ValidationError::TooLong { max: 32, .. })
        ));
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password(" secret ").is_ok());
        assert!(validate_password("").is_err());
        assert!(validate_password("   ").is_err());
        assert!(validate_password(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_product_name_counts_chars() {
        assert_eq!(
            validate_product_name("  Steam iron ").unwrap(),
            "Steam iron"
        );
        // 200 Cyrillic letters are 400 bytes but still a valid name
        assert!(validate_product_name(&"я".repeat(200)).is_ok());
        assert!(validate_product_name(&"я".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description("A warm jacket").is_ok());
        assert!(validate_description("").is_err());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("799").unwrap().cents(), 79_900);
        assert_eq!(parse_price("799,5").unwrap().cents(), 79_950);
        assert!(matches!(
            parse_price("0"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            parse_price("-5"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            parse_price("cheap"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_price(""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("1").unwrap(), 1);
        assert_eq!(parse_quantity(" 999 ").unwrap(), 999);
        assert!(parse_quantity("0").is_err());
        assert!(parse_quantity("-2").is_err());
        assert!(parse_quantity("1000").is_err());
        assert!(parse_quantity("2.5").is_err());
        assert!(parse_quantity("two").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(100).is_ok());
        assert!(validate_price_cents(-1).is_err());
    }
}
