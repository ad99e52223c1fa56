//! Identifier transforms shared by the schema builder and the wire codec.
//!
//! Group ids, field ids and possible-value ids all pass through the same
//! [`NamingStrategy`], so payload keys can always be derived from the schema.

use std::fmt;
use std::str::FromStr;

use heck::{ToLowerCamelCase, ToSnakeCase};
use serde::{Deserialize, Serialize};

/// Maps a declared identifier to its wire form.
pub trait NamingStrategy: Send + Sync + fmt::Debug {
    fn transform(&self, ident: &str) -> String;
}

/// Built-in naming styles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamingStyle {
    /// Identifiers are used as declared.
    #[default]
    Verbatim,
    /// `SomeString` / `someString` -> `some_string`
    Snake,
    /// `SomeString` / `some_string` -> `someString`
    Camel,
}

impl NamingStrategy for NamingStyle {
    fn transform(&self, ident: &str) -> String {
        match self {
            NamingStyle::Verbatim => ident.to_string(),
            NamingStyle::Snake => ident.to_snake_case(),
            NamingStyle::Camel => ident.to_lower_camel_case(),
        }
    }
}

impl fmt::Display for NamingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingStyle::Verbatim => write!(f, "verbatim"),
            NamingStyle::Snake => write!(f, "snake"),
            NamingStyle::Camel => write!(f, "camel"),
        }
    }
}

impl FromStr for NamingStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "verbatim" => Ok(NamingStyle::Verbatim),
            "snake" => Ok(NamingStyle::Snake),
            "camel" => Ok(NamingStyle::Camel),
            other => Err(format!("unknown naming style: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbatim_keeps_identifier() {
        assert_eq!(NamingStyle::Verbatim.transform("SomeString"), "SomeString");
    }

    #[test]
    fn snake_case_splits_pascal_and_acronyms() {
        let s = NamingStyle::Snake;
        assert_eq!(s.transform("SomeString"), "some_string");
        assert_eq!(s.transform("someString"), "some_string");
        assert_eq!(s.transform("HTTPServer"), "http_server");
        assert_eq!(s.transform("already_snake"), "already_snake");
        assert_eq!(s.transform("Field1Name"), "field1_name");
        assert_eq!(s.transform("XMLHttpRequest"), "xml_http_request");
        assert_eq!(s.transform(""), "");
    }

    #[test]
    fn camel_case_joins_words() {
        let c = NamingStyle::Camel;
        assert_eq!(c.transform("SomeString"), "someString");
        assert_eq!(c.transform("list_of_strings"), "listOfStrings");
        assert_eq!(c.transform("ID"), "id");
        assert_eq!(c.transform("URLValue"), "urlValue");
    }

    #[test]
    fn naming_style_parses_from_config_names() {
        assert_eq!("snake".parse::<NamingStyle>().unwrap(), NamingStyle::Snake);
        assert!("kebab".parse::<NamingStyle>().is_err());
        assert_eq!(NamingStyle::Camel.to_string(), "camel");
    }
}
