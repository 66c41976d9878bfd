//! Roster character records.

use core::fmt;
use core::str::FromStr;

/// Stable identifier of a character: its position in the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterId(pub u32);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Armor class of a character. Only Gold changes the combat rules.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum ArmorClass {
    Bronze,
    Silver,
    Gold,
    /// Any label the roster uses that the rules do not know about.
    Other(String),
}

impl ArmorClass {
    pub fn is_gold(&self) -> bool {
        matches!(self, Self::Gold)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Other(label) => label,
        }
    }
}

impl FromStr for ArmorClass {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let armor = match s.trim() {
            label if label.eq_ignore_ascii_case("gold") => Self::Gold,
            label if label.eq_ignore_ascii_case("silver") => Self::Silver,
            label if label.eq_ignore_ascii_case("bronze") => Self::Bronze,
            label => Self::Other(label.to_owned()),
        };
        Ok(armor)
    }
}

impl From<String> for ArmorClass {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(armor) => armor,
            Err(never) => match never {},
        }
    }
}

impl From<ArmorClass> for String {
    fn from(value: ArmorClass) -> Self {
        match value {
            ArmorClass::Other(label) => label,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for ArmorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named attacks and portrait of a character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skills {
    pub main: String,
    pub special: String,
    /// Portrait reference. Only presentation layers read it; it may be absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub image: Option<String>,
}

impl Skills {
    pub fn new(main: impl Into<String>, special: impl Into<String>) -> Self {
        Self {
            main: main.into(),
            special: special.into(),
            image: None,
        }
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Attack name for the chosen action.
    pub fn attack_name(&self, special: bool) -> &str {
        if special { &self.special } else { &self.main }
    }
}

/// A roster entry. Immutable once the roster is built.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub constellation: String,
    pub rank: String,
    pub armor: ArmorClass,
    pub skills: Skills,
    /// Roster HP, fixed when the roster is loaded.
    pub hp: i32,
}

impl Character {
    pub fn new(
        id: CharacterId,
        name: impl Into<String>,
        armor: ArmorClass,
        skills: Skills,
        hp: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            constellation: String::new(),
            rank: String::new(),
            armor,
            skills,
            hp,
        }
    }

    #[must_use]
    pub fn with_constellation(mut self, constellation: impl Into<String>) -> Self {
        self.constellation = constellation.into();
        self
    }

    #[must_use]
    pub fn with_rank(mut self, rank: impl Into<String>) -> Self {
        self.rank = rank.into();
        self
    }
}
