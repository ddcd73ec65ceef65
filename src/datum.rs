//! Datum: the three key/value domains a table understands, plus their tags.

use crate::error::Error;
use core::fmt;

/// Type tag for a key or value domain. The discriminants are the raw tags
/// accepted by [`DatumKind::try_from`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(i32)]
pub enum DatumKind {
    Integer = 1,
    Character = 2,
    Text = 3,
}

impl TryFrom<i32> for DatumKind {
    type Error = Error;

    fn try_from(tag: i32) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(DatumKind::Integer),
            2 => Ok(DatumKind::Character),
            3 => Ok(DatumKind::Text),
            other => Err(Error::UnrecognizedType(other)),
        }
    }
}

impl fmt::Display for DatumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DatumKind::Integer => "integer",
            DatumKind::Character => "character",
            DatumKind::Text => "text",
        })
    }
}

/// Selects which of a table's two type tags `set_kind` rewrites.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(i32)]
pub enum Field {
    Key = 1,
    Value = 2,
}

impl TryFrom<i32> for Field {
    type Error = Error;

    fn try_from(tag: i32) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(Field::Key),
            2 => Ok(Field::Value),
            other => Err(Error::UnrecognizedField(other)),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Key => "key",
            Field::Value => "value",
        })
    }
}

/// A key or value carried by a table.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Datum {
    Integer(i32),
    Character(char),
    Text(String),
}

impl Datum {
    pub fn kind(&self) -> DatumKind {
        match self {
            Datum::Integer(_) => DatumKind::Integer,
            Datum::Character(_) => DatumKind::Character,
            Datum::Text(_) => DatumKind::Text,
        }
    }
}

impl From<i32> for Datum {
    fn from(v: i32) -> Self {
        Datum::Integer(v)
    }
}

impl From<char> for Datum {
    fn from(v: char) -> Self {
        Datum::Character(v)
    }
}

impl From<&str> for Datum {
    fn from(v: &str) -> Self {
        Datum::Text(v.to_owned())
    }
}

impl From<String> for Datum {
    fn from(v: String) -> Self {
        Datum::Text(v)
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Integer(v) => write!(f, "{}", v),
            Datum::Character(c) => write!(f, "'{}'", c),
            Datum::Text(s) => write!(f, "{:?}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_tags_round_trip_through_try_from() {
        for kind in [DatumKind::Integer, DatumKind::Character, DatumKind::Text] {
            assert_eq!(DatumKind::try_from(kind as i32), Ok(kind));
        }
        assert_eq!(DatumKind::try_from(123), Err(Error::UnrecognizedType(123)));
        assert_eq!(DatumKind::try_from(0), Err(Error::UnrecognizedType(0)));
        assert_eq!(DatumKind::try_from(-1), Err(Error::UnrecognizedType(-1)));
    }

    #[test]
    fn field_selector_rejects_unknown_tags() {
        assert_eq!(Field::try_from(1), Ok(Field::Key));
        assert_eq!(Field::try_from(2), Ok(Field::Value));
        assert_eq!(Field::try_from(3), Err(Error::UnrecognizedField(3)));
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Datum::from(7).kind(), DatumKind::Integer);
        assert_eq!(Datum::from('x').kind(), DatumKind::Character);
        assert_eq!(Datum::from("abc").kind(), DatumKind::Text);
    }

    #[test]
    fn display_formats_per_variant() {
        assert_eq!(Datum::from(-42).to_string(), "-42");
        assert_eq!(Datum::from('a').to_string(), "'a'");
        assert_eq!(Datum::from("abc").to_string(), "\"abc\"");
    }
}
