//! Newtype IDs for type-safe entity references.
//!
//! Catalog and cart identifiers are strings (`"p1"`, `"p1-50ml-1700000000000"`).
//! Use the `define_id!` macro so a product ID can never be passed where a
//! cart item ID is expected.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use isha_core::define_id;
/// define_id!(WishlistId);
/// define_id!(ReviewId);
///
/// let wishlist = WishlistId::new("w1");
/// let review = ReviewId::new("w1");
///
/// // These are different types, so this won't compile:
/// // let _: WishlistId = review;
/// # let _ = (wishlist, review);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(CartItemId);

impl CartItemId {
    /// Id of the line created when `size` of `product_id` is first added at
    /// `added_at_ms`.
    #[must_use]
    pub fn for_line(product_id: &ProductId, size: &str, added_at_ms: i64) -> Self {
        Self(format!("{product_id}-{size}-{added_at_ms}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_and_serde_are_transparent() {
        let id = ProductId::new("p1");
        assert_eq!(id.to_string(), "p1");
        assert_eq!(serde_json::to_string(&id).ok().as_deref(), Some("\"p1\""));
    }

    #[test]
    fn test_cart_item_id_for_line() {
        let id = CartItemId::for_line(&ProductId::new("p1"), "50ml", 1_700);
        assert_eq!(id.as_str(), "p1-50ml-1700");
    }

    #[test]
    fn test_id_from_conversions() {
        let from_str: CartItemId = "p1-50ml-1".into();
        let from_string = CartItemId::from("p1-50ml-1".to_string());
        assert_eq!(from_str, from_string);
        assert_eq!(String::from(from_str), "p1-50ml-1");
    }
}
