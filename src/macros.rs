//! Macro for declaring validable types

/// Implements [`Validable`](crate::core::validable::Validable) for a
/// type, building its constraint table once and caching it for the
/// lifetime of the program.
///
/// The table can be declared as `"field" => constraint` pairs or as any
/// expression evaluating to a
/// [`Constraints`](crate::core::constraint::Constraints) value (useful
/// when the table is shared or loaded from a document).
///
/// # Example
///
/// ```rust,ignore
/// use validable::prelude::*;
/// use serde_json::json;
///
/// #[derive(Serialize)]
/// struct Invoice {
///     number: String,
///     amount: f64,
/// }
///
/// impl_validable!(Invoice, {
///     "number" => Constraint::required()
///         .with_schema(json!({"type": "string", "pattern": "^INV-"})),
///     "amount" => Constraint::required()
///         .with_schema(json!({"type": "number", "exclusiveMinimum": 0})),
/// });
///
/// assert!(Invoice { number: "INV-7".into(), amount: 120.0 }.validate().is_none());
/// ```
#[macro_export]
macro_rules! impl_validable {
    (
        $type:ty,
        {
            $( $field:literal => $constraint:expr ),* $(,)?
        }
        $(,)?
    ) => {
        impl $crate::core::validable::Validable for $type {
            fn constraints() -> &'static $crate::core::constraint::Constraints {
                use std::sync::OnceLock;
                static TABLE: OnceLock<$crate::core::constraint::Constraints> = OnceLock::new();
                TABLE.get_or_init(|| {
                    $crate::core::constraint::Constraints::new()
                        $( .field($field, $constraint) )*
                })
            }
        }
    };

    ( $type:ty, $table:expr $(,)? ) => {
        impl $crate::core::validable::Validable for $type {
            fn constraints() -> &'static $crate::core::constraint::Constraints {
                use std::sync::OnceLock;
                static TABLE: OnceLock<$crate::core::constraint::Constraints> = OnceLock::new();
                TABLE.get_or_init(|| $table)
            }
        }
    };
}
