//! Controlled vocabularies for constrained document fields.
//!
//! Every constrained field has a closed enum whose `ALL` slice is the legal
//! set. Membership checks go through [`Vocabulary`] so call sites never list
//! values themselves.

use crate::DocumentError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

macro_rules! vocabulary_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every legal value, in schema order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The schema field this vocabulary constrains.
            pub const FIELD: &'static str = $field;

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DocumentError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| DocumentError::InvalidVocabulary {
                        field: $field,
                        value: s.to_owned(),
                    })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

vocabulary_enum!(
    /// Layout hint for a viewer (`viewingHint`).
    ViewingHint, "viewingHint" {
        Individuals => "individuals",
        Paged => "paged",
        Continuous => "continuous",
        MultiPart => "multi-part",
        NonPaged => "non-paged",
        Top => "top",
        FacingPages => "facing-pages",
    }
);

vocabulary_enum!(
    /// Reading order of a sequence of canvases (`viewingDirection`).
    ViewingDirection, "viewingDirection" {
        LeftToRight => "left-to-right",
        RightToLeft => "right-to-left",
        TopToBottom => "top-to-bottom",
        BottomToTop => "bottom-to-top",
    }
);

/// The set of constrained fields known to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vocabulary {
    ViewingHint,
    ViewingDirection,
}

impl Vocabulary {
    pub const ALL: &'static [Vocabulary] = &[Vocabulary::ViewingHint, Vocabulary::ViewingDirection];

    pub fn field_name(self) -> &'static str {
        match self {
            Vocabulary::ViewingHint => ViewingHint::FIELD,
            Vocabulary::ViewingDirection => ViewingDirection::FIELD,
        }
    }

    pub fn from_field_name(field: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.field_name() == field)
    }

    /// Legal string values for this field.
    pub fn legal_values(self) -> Vec<&'static str> {
        match self {
            Vocabulary::ViewingHint => {
                ViewingHint::ALL.iter().copied().map(ViewingHint::as_str).collect()
            }
            Vocabulary::ViewingDirection => ViewingDirection::ALL
                .iter()
                .copied()
                .map(ViewingDirection::as_str)
                .collect(),
        }
    }

    pub fn contains(self, candidate: &str) -> bool {
        match self {
            Vocabulary::ViewingHint => ViewingHint::from_str(candidate).is_ok(),
            Vocabulary::ViewingDirection => ViewingDirection::from_str(candidate).is_ok(),
        }
    }
}

impl fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Whether `candidate` is a legal value of the field named `field`.
///
/// Unknown field names have no legal values.
pub fn is_member(field: &str, candidate: &str) -> bool {
    Vocabulary::from_field_name(field).is_some_and(|v| v.contains(candidate))
}
