use std::fs;
use std::path::Path;

use ape_core::config::ApeConfig;
use ape_core::container::{resolve_poi, ApeRoot, Poi};
use ape_util::errors::ApeError;
use tempfile::TempDir;

fn make_root() -> TempDir {
    let tmp = TempDir::new().unwrap();
    for dir in [
        "sdox/products/dev",
        "sdox/products/prod",
        "sdox/products/_template",
        "sdox/products/.hidden",
        "herbert/products/website",
        "featuremodel",
        "not_a_container/src",
    ] {
        fs::create_dir_all(tmp.path().join(dir)).unwrap();
    }
    tmp
}

fn config_for(root: &Path) -> ApeConfig {
    ApeConfig::from_vars([("APE_ROOT_DIR", root.to_string_lossy().into_owned())])
}

#[test]
fn test_containers_require_products_dir() {
    let tmp = make_root();
    let root = ApeRoot::new(tmp.path());
    assert_eq!(root.containers().unwrap(), vec!["herbert", "sdox"]);
}

#[test]
fn test_products_skip_hidden_and_underscore_entries() {
    let tmp = make_root();
    let root = ApeRoot::new(tmp.path());
    assert_eq!(root.products("sdox").unwrap(), vec!["dev", "prod"]);
    assert!(root.products("missing").unwrap().is_empty());
}

#[test]
fn test_product_dir_layout() {
    let root = ApeRoot::new("/ape");
    assert_eq!(
        root.product_dir("sdox", "dev"),
        Path::new("/ape/sdox/products/dev")
    );
}

#[test]
fn test_locate_existing_product() {
    let tmp = make_root();
    let root = ApeRoot::new(tmp.path());
    let dir = root.locate(&Poi::parse("sdox:dev", None).unwrap()).unwrap();
    assert_eq!(dir, tmp.path().join("sdox"));
}

#[test]
fn test_locate_unknown_container_and_product() {
    let tmp = make_root();
    let root = ApeRoot::new(tmp.path());
    assert!(matches!(
        root.locate(&Poi::parse("nope:dev", None).unwrap()),
        Err(ApeError::ContainerNotFound { .. })
    ));
    assert!(matches!(
        root.locate(&Poi::parse("sdox:nope", None).unwrap()),
        Err(ApeError::ProductNotFound { .. })
    ));
}

#[test]
fn test_resolve_poi_explicit() {
    let tmp = make_root();
    let (dir, product) = resolve_poi(&config_for(tmp.path()), Some("herbert:website")).unwrap();
    assert_eq!(dir, tmp.path().join("herbert"));
    assert_eq!(product, "website");
}

#[test]
fn test_resolve_poi_from_active_environment() {
    let config = ApeConfig::from_vars([("CONTAINER_DIR", "/ape/sdox"), ("PRODUCT_NAME", "dev")]);
    let (dir, product) = resolve_poi(&config, None).unwrap();
    assert_eq!(dir, Path::new("/ape/sdox"));
    assert_eq!(product, "dev");
}

#[test]
fn test_resolve_poi_without_environment_fails() {
    assert!(matches!(
        resolve_poi(&ApeConfig::default(), None),
        Err(ApeError::EnvironmentIncomplete { .. })
    ));
}
