/// Allow normal error handling from structs
pub use super::{Error, ErrorKind, Result, ResultExt};
/// Marshalling and verification behaviour
pub use super::traits;

// Notations embedded as plain strings in manifests

/// Port notation `PORT[:TARGET_PORT][/PROTOCOL]`
pub mod port;
pub use self::port::Port;

/// Ingress url notation `[SCHEME://]HOST[:PORT][PATH]`
pub mod ingress;
pub use self::ingress::IngressRule;
