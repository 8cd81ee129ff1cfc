//! Relation codes used in `MRREL.RRF`.
//!
//! The `REL` column of MRREL carries one of a small, closed set of
//! abbreviations. Each maps to a readable relation name that is used as
//! the key in a concept's relation map.

/// A relation between two concepts, decoded from its MRREL `REL` code.
///
/// # Examples
///
/// ```
/// use umls_types::RelationKind;
///
/// let kind = RelationKind::from_code("PAR");
/// assert_eq!(kind, Some(RelationKind::Parent));
/// assert_eq!(RelationKind::Parent.name(), "parent");
/// assert_eq!(RelationKind::from_code("ZZZ"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RelationKind {
    /// `PAR`: has parent relationship in a source vocabulary.
    Parent,
    /// `CHD`: has child relationship in a source vocabulary.
    Child,
    /// `RB`: has a broader relationship.
    Broader,
    /// `RN`: has a narrower relationship.
    Narrower,
    /// `SY`: source asserted synonymy.
    Synonym,
    /// `RO`: has relationship other than synonymous, narrower, or broader.
    Other,
    /// `RL`: the relationship is similar or "alike".
    Similar,
    /// `RQ`: related and possibly synonymous.
    Related,
    /// `SIB`: has sibling relationship in a source vocabulary.
    Sibling,
    /// `AQ`: allowed qualifier.
    Qualifier,
    /// `QB`: can be qualified by.
    Qualifies,
    /// `RU`: related, unspecified.
    Unspecified,
    /// `XR`: not related, no mapping.
    NotRelated,
}

impl RelationKind {
    /// Every relation kind, in table order.
    pub const ALL: [RelationKind; 13] = [
        Self::Parent,
        Self::Child,
        Self::Broader,
        Self::Narrower,
        Self::Synonym,
        Self::Other,
        Self::Similar,
        Self::Related,
        Self::Sibling,
        Self::Qualifier,
        Self::Qualifies,
        Self::Unspecified,
        Self::NotRelated,
    ];

    /// Decodes an MRREL `REL` abbreviation.
    ///
    /// Returns `None` if the code is not part of the relation table.
    /// Codes are matched exactly, so `par` is not `PAR`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PAR" => Some(Self::Parent),
            "CHD" => Some(Self::Child),
            "RB" => Some(Self::Broader),
            "RN" => Some(Self::Narrower),
            "SY" => Some(Self::Synonym),
            "RO" => Some(Self::Other),
            "RL" => Some(Self::Similar),
            "RQ" => Some(Self::Related),
            "SIB" => Some(Self::Sibling),
            "AQ" => Some(Self::Qualifier),
            "QB" => Some(Self::Qualifies),
            "RU" => Some(Self::Unspecified),
            "XR" => Some(Self::NotRelated),
            _ => None,
        }
    }

    /// Returns the MRREL abbreviation for this relation.
    pub fn code(self) -> &'static str {
        match self {
            Self::Parent => "PAR",
            Self::Child => "CHD",
            Self::Broader => "RB",
            Self::Narrower => "RN",
            Self::Synonym => "SY",
            Self::Other => "RO",
            Self::Similar => "RL",
            Self::Related => "RQ",
            Self::Sibling => "SIB",
            Self::Qualifier => "AQ",
            Self::Qualifies => "QB",
            Self::Unspecified => "RU",
            Self::NotRelated => "XR",
        }
    }

    /// Returns the relation name stored in concept documents.
    pub fn name(self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Child => "child",
            Self::Broader => "broader",
            Self::Narrower => "narrower",
            Self::Synonym => "synonym",
            Self::Other => "other",
            Self::Similar => "similar",
            Self::Related => "related",
            Self::Sibling => "sibling",
            Self::Qualifier => "qualifier",
            Self::Qualifies => "qualifies",
            Self::Unspecified => "unspecified",
            Self::NotRelated => "notrelated",
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
