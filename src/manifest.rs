use regex::Regex;

use std::collections::BTreeSet;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use super::structs::{IngressRule, Port};
use super::traits::Verify;
use super::{ErrorKind, Result, ResultExt};

/// Network section of a service manifest, serializable from yaml
///
/// ```yaml
/// name: webapp
/// ports:
/// - 80
/// - 8443:443/tcp
/// ingress:
/// - webapp.example.com/api
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Manifest {
    /// Name of the service
    pub name: String,

    /// Ports exposed by the service
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<Port>,

    /// Ingress rules routing external traffic to the service
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingress: Vec<IngressRule>,
}

impl Manifest {
    /// Parse a manifest from yaml
    pub fn from_yaml(data: &str) -> Result<Manifest> {
        Ok(serde_yaml::from_str(data)?)
    }

    /// Read a manifest file in an arbitrary path
    pub fn read(pth: &Path) -> Result<Manifest> {
        trace!("Using manifest in {}", pth.display());
        if !pth.exists() {
            bail!("Manifest file {} does not exist", pth.display())
        }
        let mut f = File::open(pth)?;
        let mut data = String::new();
        f.read_to_string(&mut data)?;
        Manifest::from_yaml(&data).chain_err(|| format!("Failed to parse {}", pth.display()))
    }

    /// Yaml with every port and ingress rule in canonical notation
    pub fn normalised(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn verify_ports(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for p in &self.ports {
            p.verify()?;
            if !seen.insert(p.port) {
                bail!("Port {} is exposed more than once", p.port);
            }
        }
        Ok(())
    }
}

impl Verify for Manifest {
    fn verify(&self) -> Result<()> {
        // limit to 50 characters, alphanumeric, dashes for sanity.
        // 63 is kube dns limit (13 char suffix buffer)
        let re = Regex::new(r"^[0-9a-z\-]{1,50}$")?;
        if !re.is_match(&self.name) {
            bail!("Please use a short, lower case service names with dashes");
        }
        if self.name.ends_with('-') || self.name.starts_with('-') {
            bail!("Please use dashes to separate words only");
        }
        self.verify_ports().chain_err(|| ErrorKind::InvalidManifest(self.name.clone()))?;
        for r in &self.ingress {
            r.verify().chain_err(|| ErrorKind::InvalidManifest(self.name.clone()))?;
        }
        debug!("Verified {} ports and {} ingress rules for {}",
            self.ports.len(), self.ingress.len(), self.name);
        Ok(())
    }
}
