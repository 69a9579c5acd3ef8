use ape_feaquencer::{get_total_order, FeatureDependencies, FeatureDependency, OrderError};

const SELECTION: [&str; 8] = [
    "django_productline",
    "schnadmin2",
    "styler",
    "django_productline.features.djpladmin",
    "schnadmin2_sidenav",
    "django_productline.features.development",
    "lessbuilder",
    "statics",
];

fn feature_dependencies() -> FeatureDependencies {
    FeatureDependencies::from_json(
        r#"{
            "django_productline.features.staticfiles": {"after": ["django_productline"]},
            "django_productline": {"first": true},
            "schnadmin2": {"after": ["lessbuilder", "django_productline.features.djpladmin"]},
            "schnadmin2_sidenav": {"after": ["schnadmin2"]},
            "django_productline.features.development": {"last": true},
            "lessbuilder": {"after": ["styler"]},
            "statics": {"after": ["lessbuilder"]}
        }"#,
    )
    .unwrap()
}

fn position(order: &[String], feature: &str) -> usize {
    order
        .iter()
        .position(|f| f == feature)
        .unwrap_or_else(|| panic!("{feature} missing from {order:?}"))
}

#[test]
fn test_multiple_first_conditions() {
    let mut deps = feature_dependencies();
    deps.get_mut("lessbuilder").unwrap().first = true;
    assert!(matches!(
        get_total_order(&SELECTION, &deps),
        Err(OrderError::MultipleFirstConditions { .. })
    ));
}

#[test]
fn test_multiple_first_conditions_independent_of_declaration_order() {
    let deps: FeatureDependencies = [
        (
            "late",
            FeatureDependency {
                first: true,
                ..Default::default()
            },
        ),
        (
            "early",
            FeatureDependency {
                first: true,
                ..Default::default()
            },
        ),
    ]
    .into_iter()
    .collect();
    assert!(matches!(
        get_total_order(&["early", "late"], &deps),
        Err(OrderError::MultipleFirstConditions { .. })
    ));
}

#[test]
fn test_multiple_last_conditions() {
    let mut deps = feature_dependencies();
    deps.get_mut("lessbuilder").unwrap().last = true;
    assert!(matches!(
        get_total_order(&SELECTION, &deps),
        Err(OrderError::MultipleLastConditions { .. })
    ));
}

#[test]
fn test_first_feature_comes_first() {
    let order = get_total_order(&SELECTION, &feature_dependencies()).unwrap();
    assert_eq!(position(&order, "django_productline"), 0);
}

#[test]
fn test_styler_after_first() {
    let order = get_total_order(&SELECTION, &feature_dependencies()).unwrap();
    assert!(position(&order, "styler") >= 1);
}

#[test]
fn test_lessbuilder_after_styler() {
    let order = get_total_order(&SELECTION, &feature_dependencies()).unwrap();
    assert!(position(&order, "styler") < position(&order, "lessbuilder"));
}

#[test]
fn test_last_feature_comes_last() {
    let order = get_total_order(&SELECTION, &feature_dependencies()).unwrap();
    assert_eq!(
        position(&order, "django_productline.features.development"),
        order.len() - 1
    );
}

#[test]
fn test_every_after_relation_holds() {
    let deps = feature_dependencies();
    let order = get_total_order(&SELECTION, &deps).unwrap();
    assert_eq!(order.len(), SELECTION.len());
    for (feature, dep) in deps.iter() {
        if !SELECTION.contains(&feature) {
            continue;
        }
        for other in &dep.after {
            assert!(
                position(&order, other) < position(&order, feature),
                "{other} must precede {feature} in {order:?}"
            );
        }
    }
}

#[test]
fn test_graph_cycle_error() {
    let mut deps = feature_dependencies();
    // statics after lessbuilder, lessbuilder after statics
    deps.get_mut("lessbuilder").unwrap().after = vec!["statics".to_string()];
    match get_total_order(&SELECTION, &deps) {
        Err(OrderError::GraphCycle { path }) => {
            assert!(path.len() >= 2);
            assert_eq!(path.first(), path.last());
        }
        other => panic!("expected a cycle, got {other:?}"),
    }
}

#[test]
fn test_identical_inputs_give_identical_orders() {
    let deps = feature_dependencies();
    assert_eq!(
        get_total_order(&SELECTION, &deps).unwrap(),
        get_total_order(&SELECTION, &deps).unwrap()
    );
}
