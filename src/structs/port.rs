use std::fmt;
use std::str::FromStr;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use super::traits::{TextMarshal, Verify};
use super::{ErrorKind, Result};
use crate::deserializers;

/// Port exposed by a service
///
/// Written in manifests as `PORT[:TARGET_PORT][/PROTOCOL]`, e.g. `8080:80/tcp`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Port {
    /// Port exposed outside the pod
    pub port: u16,
    /// Port the container listens on (same as `port` unless given)
    pub containerPort: u16,
    /// Upper cased protocol token, empty when unspecified
    pub protocol: String,
}

/// Plain decimal port, no sign or whitespace
fn parse_number(text: &str) -> Option<u16> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

impl Port {
    pub fn parse(s: &str) -> Result<Port> {
        if s.is_empty() {
            bail!(ErrorKind::MissingValue("missing port value".into()));
        }

        let mut parts = s.split('/');
        let ports = parts.next().unwrap_or_default();
        let protocol = parts.next().unwrap_or_default().to_uppercase();
        if parts.next().is_some() {
            bail!(ErrorKind::InvalidPortSpec(s.into()));
        }

        // segments past the target port are ignored
        let mut segments = ports.split(':');
        let external = segments.next().unwrap_or_default();
        let port = parse_number(external)
            .ok_or_else(|| ErrorKind::InvalidPort(external.into()))?;

        let containerPort = match segments.next() {
            Some(target) => parse_number(target)
                .ok_or_else(|| ErrorKind::InvalidTargetPort(target.into()))?,
            None => port,
        };

        let res = Port { port, containerPort, protocol };
        trace!("Parsed port spec '{}' as {:?}", s, res);
        Ok(res)
    }
}

impl FromStr for Port {
    type Err = super::Error;

    fn from_str(s: &str) -> Result<Self> {
        Port::parse(s)
    }
}

/// Renders back into port notation
///
/// Built back to front so absent trailing pieces leave no separators behind.
/// A target port equal to the exposed port is implicit and never written out.
impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut v = String::new();
        if !self.protocol.is_empty() {
            v = format!("/{}", self.protocol.to_lowercase());
        }
        if self.containerPort != 0 && self.containerPort != self.port {
            v = format!(":{}{}", self.containerPort, v);
        }
        if self.port != 0 {
            v = format!("{}{}", self.port, v);
        }
        f.write_str(&v)
    }
}

impl TextMarshal for Port {}

impl Serialize for Port {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        deserializers::serialize_text(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Port {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializers::deserialize_relaxed_text(deserializer)
    }
}

impl Verify for Port {
    fn verify(&self) -> Result<()> {
        if self.port == 0 {
            bail!("Port {:?} does not expose anything", self.to_string());
        }
        if self.containerPort == 0 {
            bail!("Port {} needs a non-zero container port", self.port);
        }
        Ok(())
    }
}
