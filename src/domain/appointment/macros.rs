//! Macro for the fixed categorical attributes of an appointment.
//!
//! Every category (status, department, city, payment method, urgency) is a
//! closed set of labels that travel as plain strings on the wire and in the
//! store. `categorical!` generates the enum together with:
//!
//! - `ALL` - every variant in declaration order (the sampling set)
//! - `as_str()` / `Display` - the wire label
//! - `FromStr` - case-insensitive parse of the wire label
//! - serde (de)serialization using the wire label
//!
//! # Usage
//!
//! ```ignore
//! categorical! {
//!     /// Hospital department.
//!     Department, field = "department" {
//!         Cardiology => "Cardiology",
//!         Neurology => "Neurology",
//!     }
//! }
//! ```

macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $name:ident, field = $field:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the wire label.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::domain::foundation::ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| {
                        $crate::domain::foundation::ValidationError::invalid_format(
                            $field,
                            format!("unknown value '{}'", s),
                        )
                    })
            }
        }
    };
}

pub(crate) use categorical;
