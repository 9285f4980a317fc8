use std::fmt::{Display, Formatter};

use anyhow::{Result, ensure};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// RGBA color tag attached to a piece. Opaque to the packing engine, carried through to the result records.
/// Serialized as `#RRGGBBAA`; `#RRGGBB` is accepted as input and treated as fully opaque.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const TRANSPARENT: Color = Color(0x00, 0x00, 0x00, 0x00);
}

impl Default for Color {
    fn default() -> Self {
        Color::TRANSPARENT
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}{:02X}",
            self.0, self.1, self.2, self.3
        )
    }
}

impl TryFrom<&str> for Color {
    type Error = anyhow::Error;

    fn try_from(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        ensure!(
            (hex.len() == 6 || hex.len() == 8) && hex.is_ascii(),
            "invalid color: {s}, expected #RRGGBB or #RRGGBBAA"
        );
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        let a = match hex.len() {
            8 => channel(6)?,
            _ => 0xFF,
        };
        Ok(Color(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{self}"))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::try_from(s.as_str()).map_err(serde::de::Error::custom)
    }
}
