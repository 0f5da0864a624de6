//! Tri-state field wrapper for partial updates.

use serde::{Deserialize, Deserializer};

/// A field of an update payload.
///
/// `Unset` means the key was absent and the stored value is kept; `Set`
/// overwrites it. Combine with `#[serde(default)]` so a missing key
/// deserializes to `Unset`. Nullable columns use `Patch<Option<T>>`, where an
/// explicit JSON `null` becomes `Set(None)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Unset,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> Patch<T> {
    /// Value to store: the supplied one if set, otherwise `current`.
    pub fn apply(self, current: T) -> T {
        match self {
            Self::Set(v) => v,
            Self::Unset => current,
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Self::Set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(default)]
        name: Patch<String>,
        #[serde(default)]
        note: Patch<Option<String>>,
    }

    #[test]
    fn missing_key_is_unset() {
        let p: Payload = serde_json::from_str("{}").unwrap();
        assert_eq!(p.name, Patch::Unset);
        assert_eq!(p.note, Patch::Unset);
    }

    #[test]
    fn explicit_null_on_nullable_field_is_set_none() {
        let p: Payload = serde_json::from_str(r#"{"note": null}"#).unwrap();
        assert_eq!(p.note, Patch::Set(None));
        assert_eq!(p.name, Patch::Unset);
    }

    #[test]
    fn explicit_null_on_required_field_is_rejected() {
        assert!(serde_json::from_str::<Payload>(r#"{"name": null}"#).is_err());
    }

    #[test]
    fn apply_keeps_current_when_unset() {
        assert_eq!(Patch::Unset.apply("old"), "old");
        assert_eq!(Patch::Set("new").apply("old"), "new");
        assert_eq!(Patch::Set(String::new()).apply("old".to_string()), "");
    }
}
