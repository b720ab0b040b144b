//! Macro for implementing Display and FromStr for status enums
//!
//! Status enums are persisted as lowercase text columns, so every one of
//! them needs the same pair of conversions. Parsing is case-insensitive.
//!
//! # Example
//!
//! ```rust
//! use slotwise_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum InviteStatus {
//!     Sent,
//!     Accepted,
//!     Declined,
//! }
//!
//! impl_domain_status_conversions!(InviteStatus {
//!     Sent => "sent",
//!     Accepted => "accepted",
//!     Declined => "declined",
//! });
//!
//! assert_eq!(InviteStatus::Accepted.to_string(), "accepted");
//! ```

/// Implements Display and FromStr traits for status enums
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their stored text
#[macro_export]
macro_rules! impl_domain_status_conversions {
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
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
