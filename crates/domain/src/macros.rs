//! Macro for implementing Display and FromStr for domain token enums
//!
//! This macro eliminates boilerplate for enum token conversions by providing
//! a single implementation for both Display and FromStr traits. It handles
//! case-insensitive parsing and consistent string representation. The
//! segmentation policy selector and the category visibility toggle both ride
//! on it, so an unrecognised token surfaces a descriptive parse error at the
//! call boundary instead of silently defaulting.
//!
//! # Example
//!
//! ```rust
//! use brolga_domain::impl_domain_token_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum DayOverflow {
//!     Hide,
//!     Split,
//! }
//!
//! impl_domain_token_conversions!(DayOverflow {
//!     Hide => "hide",
//!     Split => "split",
//! });
//! ```

/// Implements Display and FromStr traits for domain token enums
///
/// This macro generates:
/// - Display trait: converts enum variants to lowercase tokens
/// - FromStr trait: parses case-insensitive tokens to enum variants
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their token strings
///
/// # Features
///
/// - Case-insensitive parsing (e.g., "HIDE", "hide", "Hide" all work)
/// - Consistent lowercase token output
/// - Descriptive error messages with enum name
#[macro_export]
macro_rules! impl_domain_token_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
