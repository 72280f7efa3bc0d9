//! crates/opp_core/src/ids.rs
//! Catalog identity tokens (branch codes, opportunity ids).
//! Deterministic, ASCII-only, strict shapes; no I/O.

use core::fmt;
use core::str::FromStr;

use crate::errors::CoreError;

const TOKEN_MAX_LEN: usize = 64;

/// Token: ^[A-Za-z0-9_.:-]{1,64}$ (ASCII only)
#[inline]
pub fn is_valid_token(s: &str) -> bool {
    let bs = s.as_bytes();
    let len = bs.len();
    if len == 0 || len > TOKEN_MAX_LEN {
        return false;
    }
    bs.iter().all(|&b| {
        b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || b == b':' || b == b'-'
    })
}

macro_rules! simple_string_newtype {
    ($(#[$m:meta])* $name:ident) => {
        $(#[$m])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(String);

        impl $name {
            #[inline] pub fn as_str(&self) -> &str { &self.0 }
        }

        impl fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
        }

        impl FromStr for $name {
            type Err = CoreError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if is_valid_token(s) { Ok(Self(s.to_owned())) } else { Err(CoreError::InvalidToken) }
            }
        }

        impl TryFrom<&str> for $name {
            type Error = CoreError;
            #[inline]
            fn try_from(value: &str) -> Result<Self, Self::Error> { value.parse() }
        }
    }
}

simple_string_newtype!(
    /// Stable branch code. Catalog files carry these as numbers or strings;
    /// both normalize to the decimal/string token.
    BranchCode
);
simple_string_newtype!(
    /// Stable opportunity id; also the map-marker key for the opportunity.
    OpportunityId
);

#[cfg(feature = "serde")]
mod de {
    use super::*;
    use serde::de::{self, Deserializer, Visitor};
    use serde::Deserialize;

    struct TokenVisitor {
        accept_numbers: bool,
    }

    impl<'de> Visitor<'de> for TokenVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            if self.accept_numbers {
                f.write_str("token [A-Za-z0-9_.:-]{1,64} or a non-negative integer")
            } else {
                f.write_str("token [A-Za-z0-9_.:-]{1,64}")
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            if is_valid_token(v) {
                Ok(v.to_owned())
            } else {
                Err(E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            if self.accept_numbers {
                Ok(v.to_string())
            } else {
                Err(E::invalid_type(de::Unexpected::Unsigned(v), &self))
            }
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            if self.accept_numbers && v >= 0 {
                Ok(v.to_string())
            } else {
                Err(E::invalid_value(de::Unexpected::Signed(v), &self))
            }
        }
    }

    impl<'de> Deserialize<'de> for BranchCode {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            d.deserialize_any(TokenVisitor { accept_numbers: true }).map(BranchCode)
        }
    }

    impl<'de> Deserialize<'de> for OpportunityId {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            d.deserialize_any(TokenVisitor { accept_numbers: false }).map(OpportunityId)
        }
    }
}

// === Tests ===
