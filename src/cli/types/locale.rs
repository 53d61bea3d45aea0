//! Output language for verdict labels.

use crate::error::IntelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    En,
    Pt,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Pt => write!(f, "pt"),
        }
    }
}

impl FromStr for Locale {
    type Err = IntelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "pt" | "pt-br" | "portuguese" => Ok(Locale::Pt),
            _ => Err(IntelError::Config {
                field: "lang".to_string(),
                message: format!("unsupported language `{}` (use en or pt)", s),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parse() {
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("pt-BR".parse::<Locale>().unwrap(), Locale::Pt);
        assert!("fr".parse::<Locale>().is_err());
        assert_eq!(Locale::default(), Locale::En);
    }
}
