//! Integration tests for manifests rendered through the SVG backend

use asset_variants::layout::Dimension;
use asset_variants::{
    build, BuildError, ConstraintError, DrawError, Manifest, SvgBackend, SvgConfig,
};
use pretty_assertions::assert_eq;

const SPLASH: &str = r##"
[[generator]]
densities = [1, 2]
sizes = [[320, 480]]
caps = [[0, 20]]
filenames = ["Default"]
directories = ["ios"]
rotate = true
[generator.data]
platform = "ios"

[[generator]]
sizes = [[48, 48]]
formats = ["PNG"]
filenames = ["icon"]
directories = ["android/drawable-mdpi"]

[[layer]]
fill = "#ffffff"

[[layer]]
repeat = "noise.png"

[[layer]]
place = "logo.png"
at = "centre: (50%, 50%), size: (50%, 25%)"

[[layer]]
rect = "#333333"
at = "left: 0, right: 0, bottom: 0, height: 10"
"##;

#[test]
fn test_manifest_plan() {
    let manifest = Manifest::from_str(SPLASH).expect("Should load");
    let variants = manifest.variants().expect("Should generate");

    let summary = variants
        .iter()
        .map(|v| format!("{} {}x{}@{}", v.path, v.width, v.height, v.density))
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(summary, @r"
    ios/Default.png 480x300@1
    ios/Default.png 320x460@1
    ios/Default.png 480x300@2
    ios/Default.png 320x460@2
    android/drawable-mdpi/icon.png 48x48@1
    ");
}

#[test]
fn test_manifest_preview_renders_every_variant() {
    let manifest = Manifest::from_str(SPLASH).unwrap();
    let variants = manifest.variants().unwrap();
    let config = SvgConfig::new().with_pretty_print(false);
    let mut backend = SvgBackend::new(config);

    let rendered = build(&variants, "assets", &mut backend, |canvas| {
        manifest.draw(canvas)
    })
    .expect("Should render");

    assert_eq!(rendered.len(), variants.len());
    let retina_portrait = &rendered[3].output;
    assert!(retina_portrait.contains(r#"viewBox="0 0 640 920""#));
    assert!(retina_portrait.contains(
        r#"<image class="av-image" href="assets/logo.png" x="160" y="345" width="320" height="230" preserveAspectRatio="none"/>"#
    ));
    assert!(retina_portrait.contains(
        r##"<rect class="av-rect" x="0" y="900" width="640" height="20" fill="#333333"/>"##
    ));
    assert!(retina_portrait.contains(r#"href="assets/noise.png""#));
}

#[test]
fn test_preview_stops_at_first_failing_variant() {
    let manifest = Manifest::from_str(
        r#"
[[generator]]
sizes = [[100, 100], [20, 20]]
filenames = ["badge"]
directories = ["a", "b"]

[[layer]]
rect = "red"
at = "top: 0, left: 0, size: (10, 10)"
"#,
    )
    .unwrap();
    let variants = manifest.variants().unwrap();
    let mut drawn = vec![];

    let err = build(&variants, ".", &mut SvgBackend::default(), |canvas| {
        drawn.push(canvas.variant().path.clone());
        if canvas.variant().width < 50.0 {
            return Err(ConstraintError::unresolved(Dimension::Horizontal).into());
        }
        manifest.draw(canvas)
    })
    .unwrap_err();

    let BuildError::Render { path, source } = &err;
    assert_eq!(path, "a/badge.png");
    assert!(matches!(source, DrawError::Constraint(_)));
    assert_eq!(drawn, vec!["a/badge.png", "b/badge.png", "a/badge.png"]);
}

#[test]
fn test_manifest_rejects_unknown_keys() {
    let err = Manifest::from_str("[[generator]]\ndensity = [1]\n").unwrap_err();
    assert!(err.to_string().starts_with("failed to parse manifest TOML"));
}
