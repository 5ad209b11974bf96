use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Address type of a program-text word.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
pub enum AddrType {
    /// Field is relative to the module base.
    #[strum(serialize = "R")]
    #[serde(rename = "R")]
    Relocatable,
    #[strum(serialize = "A")]
    #[serde(rename = "A")]
    Absolute,
    #[strum(serialize = "I")]
    #[serde(rename = "I")]
    Immediate,
    /// Field is a link of a use chain.
    #[strum(serialize = "E")]
    #[serde(rename = "E")]
    External,
}

impl AddrType {
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<Self>().ok()
    }
}

#[test]
fn test() {
    assert_eq!(AddrType::parse("R"), Some(AddrType::Relocatable));
    assert_eq!(AddrType::parse("A"), Some(AddrType::Absolute));
    assert_eq!(AddrType::parse("I"), Some(AddrType::Immediate));
    assert_eq!(AddrType::parse("E"), Some(AddrType::External));
    assert_eq!(AddrType::parse("e"), None);
    assert_eq!(AddrType::parse("X"), None);
    assert_eq!(AddrType::External.to_string(), "E");
}
