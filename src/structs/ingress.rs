use std::fmt;
use std::str::FromStr;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use url::Url;

use super::traits::{TextMarshal, Verify};
use super::{ErrorKind, Result, ResultExt};
use crate::deserializers;

const DEFAULT_SCHEME: &str = "http";
const DEFAULT_PORT: u16 = 80;

/// Ingress rule routing external traffic to a host, port and path
///
/// Written in manifests as a url: `[SCHEME://]HOST[:PORT][PATH]`.
/// The scheme defaults to http and the port to 80, regardless of scheme.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IngressRule {
    /// Lower case url scheme
    pub scheme: String,
    /// Host name, unvalidated and without ipv6 brackets
    pub host: String,
    /// Url path, possibly empty
    pub path: String,
    pub port: u16,
}

impl Default for IngressRule {
    fn default() -> Self {
        IngressRule {
            scheme: DEFAULT_SCHEME.into(),
            host: String::new(),
            path: String::new(),
            port: DEFAULT_PORT,
        }
    }
}

fn is_delimiter(c: char) -> bool {
    c == '/' || c == '?' || c == '#'
}

/// Host and explicit port text of a url authority, as written
///
/// `url` lowercases hosts and hides ports matching the scheme default, so the
/// authority text is the only way to tell `https://host:443` from `https://host`.
fn split_authority(authority: &str) -> (&str, Option<&str>) {
    let hostport = match authority.rfind('@') {
        Some(i) => &authority[i + 1..],
        None => authority,
    };
    let (host, rest) = if hostport.starts_with('[') {
        match hostport.find(']') {
            Some(i) => (&hostport[1..i], &hostport[i + 1..]),
            None => (&hostport[1..], ""),
        }
    } else {
        match hostport.find(':') {
            Some(i) => (&hostport[..i], &hostport[i..]),
            None => (hostport, ""),
        }
    };
    let port = rest.strip_prefix(':').filter(|p| !p.is_empty());
    (host, port)
}

impl IngressRule {
    pub fn parse(s: &str) -> Result<IngressRule> {
        if s.is_empty() {
            bail!(ErrorKind::MissingValue("invalid ingress rule".into()));
        }
        // a scheme separator after the first delimiter belongs to the path or query
        let has_scheme = s.find("://").map_or(false, |i| !s[..i].contains(is_delimiter));
        let raw = if has_scheme {
            s.to_string()
        } else {
            format!("{}://{}", DEFAULT_SCHEME, s)
        };
        // syntax check only, host and path are taken from the text below
        let url = Url::parse(&raw).chain_err(|| ErrorKind::MalformedUrl(s.into()))?;

        let after_scheme = &raw[raw.find("://").map(|i| i + 3).unwrap_or(0)..];
        let authority_end = after_scheme.find(is_delimiter).unwrap_or(after_scheme.len());
        let (authority, rest) = after_scheme.split_at(authority_end);
        let (host, explicit_port) = split_authority(authority);

        let port = match explicit_port {
            Some(_) => url.port_or_known_default().unwrap_or(DEFAULT_PORT),
            None => DEFAULT_PORT,
        };
        let path = match rest.find(|c: char| c == '?' || c == '#') {
            Some(i) => &rest[..i],
            None => rest,
        };

        let res = IngressRule {
            scheme: url.scheme().to_string(),
            host: host.to_string(),
            path: path.to_string(),
            port,
        };
        trace!("Parsed ingress rule '{}' as {:?}", s, res);
        Ok(res)
    }
}

impl FromStr for IngressRule {
    type Err = super::Error;

    fn from_str(s: &str) -> Result<Self> {
        IngressRule::parse(s)
    }
}

/// Renders `scheme://host:port/path`
///
/// Defaults are applied to what gets written, never to the value itself.
/// The port is always explicit, even when it matches the scheme.
impl fmt::Display for IngressRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scheme = if self.scheme.is_empty() { DEFAULT_SCHEME } else { self.scheme.as_str() };
        let port = if self.port == 0 { DEFAULT_PORT } else { self.port };
        if self.host.contains(':') {
            write!(f, "{}://[{}]:{}", scheme, self.host, port)?;
        } else {
            write!(f, "{}://{}:{}", scheme, self.host, port)?;
        }
        if !self.path.is_empty() && !self.path.starts_with('/') {
            f.write_str("/")?;
        }
        f.write_str(&self.path)
    }
}

impl TextMarshal for IngressRule {}

impl Serialize for IngressRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        deserializers::serialize_text(self, serializer)
    }
}

impl<'de> Deserialize<'de> for IngressRule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializers::deserialize_text(deserializer)
    }
}

impl Verify for IngressRule {
    // only checks what parsing cannot guarantee; hostnames are not validated
    fn verify(&self) -> Result<()> {
        if self.host.is_empty() {
            bail!("Ingress rule {} has no host", self);
        }
        Ok(())
    }
}
