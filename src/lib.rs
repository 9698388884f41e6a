#![allow(renamed_and_removed_lints)]
#![allow(non_snake_case)]

#[macro_use]
extern crate serde_derive;
extern crate serde;
extern crate serde_json;
extern crate serde_yaml;

#[macro_use]
extern crate log;

extern crate regex;
extern crate url;

#[macro_use]
extern crate error_chain;
error_chain! {
    types {
        Error, ErrorKind, ResultExt, Result;
    }
    links {}
    foreign_links {
        Io(::std::io::Error);
        Utf8(::std::str::Utf8Error);
        SerdeY(serde_yaml::Error);
        SerdeJ(serde_json::Error);
        Regex(regex::Error);
    }
    errors {
        MissingValue(msg: String) {
            description("missing value")
            display("{}", msg)
        }
        InvalidPort(value: String) {
            description("invalid port")
            display("invalid port {}", value)
        }
        InvalidTargetPort(value: String) {
            description("invalid target port")
            display("invalid target port {}", value)
        }
        InvalidPortSpec(spec: String) {
            description("port spec has too many protocol separators")
            display("invalid port spec '{}': expected PORT[:TARGET_PORT][/PROTOCOL]", spec)
        }
        MalformedUrl(rule: String) {
            description("invalid ingress rule")
            display("invalid ingress rule '{}'", rule)
        }
        InvalidManifest(svc: String) {
            description("manifest does not validate")
            display("manifest for {} does not validate", &svc)
        }
    }
}

/// Port and ingress rule notations
pub mod structs;
pub use structs::{IngressRule, Port};

/// Behavioural traits shared by the notations
pub mod traits;
pub use traits::{TextMarshal, Verify};

/// Serde glue for types that live as strings in documents
pub mod deserializers;

/// Network section of a service manifest
pub mod manifest;
pub use manifest::Manifest;
