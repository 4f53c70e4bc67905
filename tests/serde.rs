#![cfg(feature = "serde1")]

use indoc::indoc;
use nig::dist::{Gaussian, InvGamma, NigSamples, NormalInvGamma};

#[test]
fn nig_from_yaml() {
    let yaml = indoc!(
        "
        m: 0.0
        v: 0.054
        a: 1.12
        b: 0.4
        "
    );
    let nig: NormalInvGamma = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(nig, NormalInvGamma::new(0.0, 0.054, 1.12, 0.4).unwrap());
}

#[test]
fn invalid_nig_yaml_is_rejected() {
    let yaml = indoc!(
        "
        m: 0.0
        v: -1.0
        a: 1.12
        b: 0.4
        "
    );
    let res: Result<NormalInvGamma, _> = serde_yaml::from_str(yaml);
    assert!(res.is_err());
}

#[test]
fn missing_field_is_rejected() {
    let res: Result<NormalInvGamma, _> =
        serde_yaml::from_str("m: 0.0\nv: 1.0\na: 1.0\n");
    assert!(res.is_err());
}

#[test]
fn nig_json_roundtrip() {
    let nig = NormalInvGamma::new(0.1, 1.2, 2.3, 3.4).unwrap();
    let json = serde_json::to_string(&nig).unwrap();
    assert_eq!(json, r#"{"m":0.1,"v":1.2,"a":2.3,"b":3.4}"#);
    let back: NormalInvGamma = serde_json::from_str(&json).unwrap();
    assert_eq!(nig, back);
}

#[test]
fn invalid_gaussian_json_is_rejected() {
    let res: Result<Gaussian, _> =
        serde_json::from_str(r#"{"mu":0.0,"sigma":0.0}"#);
    assert!(res.is_err());
}

#[test]
fn invgamma_from_yaml() {
    let ig: InvGamma =
        serde_yaml::from_str("shape: 1.12\nscale: 0.4\n").unwrap();
    assert_eq!(ig, InvGamma::new(1.12, 0.4).unwrap());
}

#[test]
fn samples_json_roundtrip() {
    let samples: NigSamples =
        vec![(0.5, 1.0), (-1.0, 2.5)].into_iter().collect();
    let json = serde_json::to_string(&samples).unwrap();
    assert_eq!(json, r#"{"means":[0.5,-1.0],"variances":[1.0,2.5]}"#);
    let back: NigSamples = serde_json::from_str(&json).unwrap();
    assert_eq!(samples, back);
}

#[test]
fn mismatched_samples_json_is_rejected() {
    let json = r#"{"means":[0.0,1.0,2.0],"variances":[1.0]}"#;
    let res: Result<NigSamples, _> = serde_json::from_str(json);
    let err = res.unwrap_err().to_string();
    assert!(err.contains("3 means and 1 variances"), "{err}");
}

#[test]
fn mismatched_samples_yaml_is_rejected() {
    let yaml = indoc!(
        "
        means: [0.0]
        variances: []
        "
    );
    let res: Result<NigSamples, _> = serde_yaml::from_str(yaml);
    assert!(res.is_err());
}
