use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Band identifier as served by `/api/bands`.
///
/// The endpoint emits integer ids, but any scalar is accepted and kept in its
/// textual form since it is only ever used as an attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BandId(String);

impl BandId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// DOM id of the checkbox rendered for this band.
    pub fn checkbox_id(&self) -> String {
        format!("band_{}", self.0)
    }
}

impl fmt::Display for BandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! band_id_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for BandId {
            fn from(id: $t) -> Self {
                Self(id.to_string())
            }
        })*
    };
}

band_id_from_int!(i32, i64, u32, u64);

impl From<&str> for BandId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BandId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for BandId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Float(f64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => BandId(n.to_string()),
            RawId::Float(n) => BandId(n.to_string()),
            RawId::Text(s) => BandId(s),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub id: BandId,
    pub name: String,
}

impl Band {
    pub fn new(id: impl Into<BandId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The forms that carry client-side validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Band,
    Album,
    Member,
}

impl FormKind {
    pub const ALL: [FormKind; 3] = [FormKind::Band, FormKind::Album, FormKind::Member];

    pub fn form_id(self) -> &'static str {
        match self {
            FormKind::Band => "bandForm",
            FormKind::Album => "albumForm",
            FormKind::Member => "memberForm",
        }
    }

    pub fn from_form_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.form_id() == id)
    }
}

impl std::str::FromStr for FormKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "band" => Ok(FormKind::Band),
            "album" => Ok(FormKind::Album),
            "member" => Ok(FormKind::Member),
            other => Err(format!("unknown form '{}': expected band, album or member", other)),
        }
    }
}

/// How year inputs that are not plain integers are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearPolicy {
    /// Anything but an integer in range blocks submission.
    #[default]
    Strict,
    /// Numeric text is range-checked, non-numeric text is let through.
    Lenient,
}

impl std::str::FromStr for YearPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(YearPolicy::Strict),
            "lenient" => Ok(YearPolicy::Lenient),
            other => Err(format!("unknown year policy '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Proceed,
    Blocked { message: String },
}

impl SubmitOutcome {
    pub fn blocked(message: impl Into<String>) -> Self {
        SubmitOutcome::Blocked {
            message: message.into(),
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, SubmitOutcome::Blocked { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_ids_accept_numbers_and_strings() {
        let bands: Vec<Band> =
            serde_json::from_str(r#"[{"id": 7, "name": "Rush"}, {"id": "x9", "name": "Yes", "extra": 1}]"#)
                .unwrap();

        assert_eq!(bands[0].id.as_str(), "7");
        assert_eq!(bands[0].id.checkbox_id(), "band_7");
        assert_eq!(bands[1].id.as_str(), "x9");
        assert_eq!(bands[1].name, "Yes");
    }

    #[test]
    fn test_band_without_usable_id_or_name_is_rejected() {
        assert!(serde_json::from_str::<Vec<Band>>(r#"[{"id": null, "name": "A"}]"#).is_err());
        assert!(serde_json::from_str::<Vec<Band>>(r#"[{"name": "A"}]"#).is_err());
        assert!(serde_json::from_str::<Vec<Band>>(r#"[{"id": 1, "name": 5}]"#).is_err());
    }

    #[test]
    fn test_form_kind_lookup() {
        assert_eq!(FormKind::from_form_id("albumForm"), Some(FormKind::Album));
        assert_eq!(FormKind::from_form_id("checkboxContainer"), None);
        assert_eq!("Member".parse::<FormKind>(), Ok(FormKind::Member));
        assert!("venue".parse::<FormKind>().is_err());
    }
}
