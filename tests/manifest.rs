mod common;

use common::fixture;

use helmspec::{ErrorKind, IngressRule, Manifest, Port, Verify};

#[test]
fn read_and_verify() {
    let mf = Manifest::read(&fixture("webapp.yml")).unwrap();
    assert_eq!(mf.name, "webapp");
    assert_eq!(mf.ports, vec![
        Port { port: 80, containerPort: 80, protocol: "".into() },
        Port { port: 8443, containerPort: 443, protocol: "TCP".into() },
        Port { port: 9090, containerPort: 9091, protocol: "UDP".into() },
    ]);
    assert_eq!(mf.ingress[1], IngressRule {
        scheme: "https".into(),
        host: "webapp.example.com".into(),
        path: "/".into(),
        port: 8443,
    });
    assert!(mf.verify().is_ok());
}

#[test]
fn normalised_output_reparses() {
    let mf = Manifest::read(&fixture("webapp.yml")).unwrap();
    let out = mf.normalised().unwrap();
    assert!(out.contains("9090:9091/udp"), "{}", out);
    assert!(out.contains("http://webapp.example.com:80/api"), "{}", out);
    assert!(out.contains("https://webapp.example.com:8443/"), "{}", out);
    assert_eq!(Manifest::from_yaml(&out).unwrap(), mf);
}

#[test]
fn duplicate_ports_fail_verification() {
    let mf = Manifest::read(&fixture("duplicate-ports.yml")).unwrap();
    let err = mf.verify().unwrap_err();
    match err.kind() {
        ErrorKind::InvalidManifest(svc) => assert_eq!(svc, "webapp"),
        k => panic!("unexpected error {:?}", k),
    }
}

#[test]
fn missing_file_fails() {
    assert!(Manifest::read(&fixture("nope.yml")).is_err());
}
