use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wrapper for credentials and identity documents (passwords, passport
/// numbers, bearer tokens).
///
/// `Debug` and `Display` print a fixed mask so the value never ends up in a
/// `tracing` field by accident. Serialization writes the real value because
/// the upstream API needs it.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

const MASK: &str = "********";

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the real value. Call sites should be easy to grep for.
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl From<&str> for Masked<String> {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Masked<String> {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_masked() {
        let secret = Masked::from("hunter2");
        assert_eq!(format!("{:?}", secret), "********");
        assert_eq!(format!("{}", secret), "********");
        assert_eq!(secret.expose(), "hunter2");
    }

    #[test]
    fn test_serializes_real_value() {
        let secret = Masked::from("P1234567");
        let json = serde_json::to_string(&secret).unwrap();
        assert_eq!(json, "\"P1234567\"");

        let back: Masked<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, secret);
    }
}
