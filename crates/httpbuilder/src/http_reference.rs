use std::fmt::{self, Display};

use serde::{de::Visitor, Deserialize, Serialize};

/// Points at a single value of an inbound request, written `header:{name}` or `query:{name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpReference {
    Header(String),
    Query(String),
}

impl Serialize for HttpReference {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HttpReference {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ReferenceVisitor;

        impl Visitor<'_> for ReferenceVisitor {
            type Value = HttpReference;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a reference to a header or query")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                let Some((prefix, name)) = v.split_once(':') else {
                    return Err(E::custom("expected format: header:{name} or query:{name}"));
                };
                if name.is_empty() {
                    return Err(E::custom(format!("empty name in reference {v}")));
                }
                match prefix {
                    "header" => Ok(HttpReference::Header(name.to_string())),
                    "query" => Ok(HttpReference::Query(name.to_string())),
                    prefix => Err(E::custom(format!(
                        "expected format: header:{{...}} or query:{{...}} but got {}:{{...}}",
                        prefix
                    ))),
                }
            }
        }

        deserializer.deserialize_str(ReferenceVisitor)
    }
}

impl Display for HttpReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header(s) => write!(f, "header:{}", s),
            Self::Query(s) => write!(f, "query:{}", s),
        }
    }
}

impl HttpReference {
    /// Field name used when the referenced value is logged.
    pub fn name(&self) -> &str {
        match self {
            Self::Header(s) | Self::Query(s) => s,
        }
    }
}
