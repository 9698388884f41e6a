use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserializer, Error, Visitor};
use serde::ser::Serializer;

use super::traits::TextMarshal;

/// Serialize a `TextMarshal` type as its rendered string
pub fn serialize_text<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: TextMarshal,
    S: Serializer,
{
    serializer.collect_str(value)
}

/// Deserialize a `TextMarshal` type from a string
pub fn deserialize_text<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: TextMarshal,
    D: Deserializer<'de>,
{
    deserializer.deserialize_str(TextVisitor::strict())
}

/// Deserialize a `TextMarshal` type from a string or a bare number
///
/// Lets yaml like `ports: [80, "8080:80/udp"]` through, where serde would
/// otherwise refuse the unquoted integer.
pub fn deserialize_relaxed_text<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: TextMarshal,
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(TextVisitor::relaxed())
}

struct TextVisitor<T> {
    relaxed: bool,
    marker: PhantomData<fn() -> T>,
}

impl<T> TextVisitor<T> {
    fn strict() -> Self {
        TextVisitor { relaxed: false, marker: PhantomData }
    }

    fn relaxed() -> Self {
        TextVisitor { relaxed: true, marker: PhantomData }
    }

    fn visit_number<E>(self, v: impl ToString) -> Result<T, E>
    where
        T: TextMarshal,
        E: Error,
    {
        if !self.relaxed {
            return Err(E::custom("expected a string"));
        }
        v.to_string().parse().map_err(E::custom)
    }
}

impl<'de, T: TextMarshal> Visitor<'de> for TextVisitor<T> {
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.relaxed {
            formatter.write_str("a string or unsigned integer")
        } else {
            formatter.write_str("a string")
        }
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> where E: Error {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> where E: Error {
        self.visit_number(v)
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> where E: Error {
        self.visit_number(v)
    }
}

#[cfg(test)]
mod tests {
    use crate::{IngressRule, Port};

    #[derive(Deserialize, Serialize)]
    struct Doc {
        ports: Vec<Port>,
        #[serde(default)]
        ingress: Vec<IngressRule>,
    }

    #[test]
    fn deserialize_mixed_ports() {
        let doc: Doc = serde_yaml::from_str("ports: [80, '8080:9090/udp']").unwrap();
        assert_eq!(doc.ports.len(), 2);
        assert_eq!(doc.ports[0].port, 80);
        assert_eq!(doc.ports[0].containerPort, 80);
        assert_eq!(doc.ports[1].containerPort, 9090);
        assert_eq!(doc.ports[1].protocol, "UDP");
    }

    #[test]
    fn deserialize_invalid_port_fails() {
        let res: Result<Doc, _> = serde_yaml::from_str("ports: ['http']");
        let err = res.err().unwrap().to_string();
        assert!(err.contains("invalid port http"), "{}", err);
    }

    #[test]
    fn deserialize_negative_port_fails() {
        let res: Result<Doc, _> = serde_yaml::from_str("ports: [-1]");
        assert!(res.is_err());
    }

    #[test]
    fn ingress_refuses_numbers() {
        let res: Result<Doc, _> = serde_json::from_str(r#"{"ports": [], "ingress": [80]}"#);
        assert!(res.is_err());
    }

    #[test]
    fn serialize_as_strings() {
        let doc = Doc {
            ports: vec!["8080:80/tcp".parse().unwrap()],
            ingress: vec!["example.com/api".parse().unwrap()],
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["ports"][0], "8080:80/tcp");
        assert_eq!(json["ingress"][0], "http://example.com:80/api");
    }
}
