//! Newtype IDs for type-safe upstream resource references.
//!
//! Shopify REST resources are keyed by unsigned 64-bit integers. Use the
//! `define_id!` macro to create wrappers that prevent accidentally mixing
//! ids from different resource types.

/// Macro to define a type-safe upstream ID wrapper.
///
/// Creates a newtype wrapper around `u64` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]` (a bare JSON number)
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_u64()`, `from_json()`
/// - `From<u64>` and `Into<u64>` implementations
///
/// # Example
///
/// ```rust
/// # use shopify_gateway_core::define_id;
/// define_id!(ProductId);
/// define_id!(PriceRuleId);
///
/// let product_id = ProductId::new(1);
/// let rule_id = PriceRuleId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: ProductId = rule_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Create a new ID from a u64 value.
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Get the underlying u64 value.
            #[must_use]
            pub const fn as_u64(&self) -> u64 {
                self.0
            }

            /// Read the id from an upstream JSON value.
            ///
            /// Returns `None` unless the value is a non-negative integer.
            #[must_use]
            pub fn from_json(value: &::serde_json::Value) -> Option<Self> {
                value.as_u64().map(Self)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(PriceRuleId);
