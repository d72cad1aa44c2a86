//! Integration tests for variant expansion and augmentation

use asset_variants::{Axis, ConfigurationError, GeneratorConfig, Replacement, Value, VariantGenerator};
use pretty_assertions::assert_eq;

fn paths(generator: &VariantGenerator) -> Vec<String> {
    generator
        .generate()
        .expect("Should generate")
        .into_iter()
        .map(|v| v.path)
        .collect()
}

#[test]
fn test_count_is_product_of_deduplicated_axes() {
    let mut g = VariantGenerator::default();
    g.densities([1.0, 1.5, 2.0, 2.0])
        .sizes([(320.0, 480.0), (640.0, 960.0)])
        .rotate(true)
        .caps([(0.0, 0.0), (0.0, 20.0)])
        .formats(["png", "jpg", "png"])
        .filenames(["splash"])
        .directories(["ios", "android"]);

    let raw = g.raw().unwrap();
    assert_eq!(raw.len(), 3 * 4 * 2 * 2 * 2);
}

#[test]
fn test_rotated_duplicates_collapse() {
    let mut g = VariantGenerator::default();
    g.size(57.0, 57.0).rotate(true).filename("icon").directory("out");
    assert_eq!(g.raw().unwrap().len(), 1);
}

#[test]
fn test_path_building() {
    let mut g = VariantGenerator::default();
    g.size(57.0, 57.0).filename("icon").directory("out").format("PNG");
    assert_eq!(paths(&g), vec!["out/icon.png"]);

    let mut g = VariantGenerator::new(GeneratorConfig::new().with_add_extension(false));
    g.size(57.0, 57.0).filename("icon").directory("out").format("PNG");
    assert_eq!(paths(&g), vec!["out/icon"]);
}

#[test]
fn test_missing_required_axes() {
    let mut g = VariantGenerator::default();
    assert_eq!(
        g.generate().unwrap_err(),
        ConfigurationError::missing_axis(Axis::Size)
    );
    g.size(1.0, 1.0);
    assert_eq!(
        g.generate().unwrap_err(),
        ConfigurationError::missing_axis(Axis::Filename)
    );
    g.filename("a");
    assert_eq!(
        g.generate().unwrap_err(),
        ConfigurationError::missing_axis(Axis::Directory)
    );
}

#[test]
fn test_ios_icon_set() {
    let mut g = VariantGenerator::default();
    g.densities([1.0, 2.0])
        .sizes([(57.0, 57.0), (72.0, 72.0)])
        .filename("Icon")
        .directory("ios")
        .procedure("filename", |v, _| {
            let mut name = v.filename.clone();
            if v.width == 72.0 {
                name.push_str("-72");
            }
            if v.retina {
                name.push_str("@2x");
            }
            name
        });

    insta::assert_snapshot!(paths(&g).join("\n"), @r"
    ios/Icon.png
    ios/Icon-72.png
    ios/Icon@2x.png
    ios/Icon-72@2x.png
    ");
}

#[test]
fn test_compute_replaces_axis_field() {
    let mut g = VariantGenerator::default();
    g.size(320.0, 480.0)
        .filename("Default")
        .directory("out")
        .compute(Axis::Directory, |v, _| {
            if v.portrait {
                "out/portrait"
            } else {
                "out/landscape"
            }
        });
    assert_eq!(paths(&g), vec!["out/portrait/Default.png"]);
}

#[test]
fn test_replace_literal_and_computed() {
    let mut g = VariantGenerator::default();
    g.densities([1.0, 2.0])
        .size(10.0, 10.0)
        .filename("icon-DENSITY-SIZE")
        .directory("out")
        .replace("filename", "SIZE", "small")
        .replace(
            "filename",
            "DENSITY",
            Replacement::computed(|v| format!("{}x", v.density)),
        );
    assert_eq!(
        paths(&g),
        vec!["out/icon-1x-small.png", "out/icon-2x-small.png"]
    );
}

#[test]
fn test_replace_only_first_occurrence() {
    let mut g = VariantGenerator::default();
    g.size(10.0, 10.0)
        .filename("a-a")
        .directory("out")
        .replace("filename", "a", "b");
    let v = &g.generate().unwrap()[0];
    assert_eq!(v.filename, "b-a");
    assert_eq!(v.path, "out/b-a.png");
}

#[test]
fn test_replace_ignores_non_text_fields() {
    let mut g = VariantGenerator::default();
    g.size(10.0, 10.0)
        .filename("icon")
        .directory("out")
        .data("scale", 2)
        .replace("scale", "2", "3");
    let v = &g.generate().unwrap()[0];
    assert_eq!(v.get("scale"), Some(Value::Number(2.0)));
}

#[test]
fn test_caps_keep_declared_size() {
    let mut g = VariantGenerator::default();
    g.size(320.0, 480.0)
        .caps([(0.0, 20.0), (0.0, 40.0)])
        .filename("Default")
        .directory("out");
    let heights: Vec<_> = g
        .generate()
        .unwrap()
        .iter()
        .map(|v| (v.original_height, v.height))
        .collect();
    assert_eq!(heights, vec![(480.0, 460.0), (480.0, 440.0)]);
}

#[test]
fn test_procedure_sees_generator() {
    let mut g = VariantGenerator::default();
    g.size(10.0, 10.0)
        .filename("icon")
        .directory("out")
        .procedure("family", |_, generator| {
            if generator.config().add_extension {
                "with-ext"
            } else {
                "bare"
            }
        });
    let v = &g.generate().unwrap()[0];
    assert_eq!(v.get("family"), Some(Value::from("with-ext")));
}

#[test]
fn test_variant_json_record() {
    let mut g = VariantGenerator::default();
    g.density(2.0)
        .size(57.0, 57.0)
        .filename("icon")
        .directory("ios")
        .data("platform", "ios");
    let json = serde_json::to_value(&g.generate().unwrap()[0]).unwrap();
    assert_eq!(json["path"], "ios/icon.png");
    assert_eq!(json["retina"], true);
    assert_eq!(json["platform"], "ios");
    assert_eq!(json["size"], serde_json::json!([57.0, 57.0]));
}
