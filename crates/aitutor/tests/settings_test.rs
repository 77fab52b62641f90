use aitutor::{ConfigErrorKind, GeminiConfig, Settings, Template};
use std::io::Write;

#[test]
fn test_from_file_applies_overrides_to_registry() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[gemini]
text_model = "gemini-2.5-flash"
timeout_secs = 30

[templates.summarize]
max_output_tokens = 256

[templates.default]
temperature = 0.1

[images]
dir = "/var/lib/aitutor/images"
"#
    )
    .unwrap();

    let settings = Settings::from_file(file.path()).unwrap();
    let registry = settings.registry().unwrap();

    let summarize = registry.get(Template::Summarize);
    assert_eq!(*summarize.max_output_tokens(), Some(256));
    assert_eq!(*summarize.temperature(), Some(0.3));

    assert_eq!(*registry.get(Template::Default).temperature(), Some(0.1));
    assert_eq!(
        registry.get_by_name(Some("unknown")),
        registry.get(Template::Default)
    );
    assert_eq!(
        settings.images.dir,
        std::path::PathBuf::from("/var/lib/aitutor/images")
    );
}

#[test]
fn test_gemini_section_overrides_models_and_timeout() {
    let settings: Settings = r#"
        [gemini]
        image_model = "custom-image-model"
        timeout_secs = 15
    "#
    .parse()
    .unwrap();

    let config = GeminiConfig::builder().api_key("test-key").build().unwrap();
    let config = settings.apply_to(config);

    assert_eq!(config.image_model(), "custom-image-model");
    assert_eq!(config.text_model(), "gemini-2.0-flash");
    assert_eq!(*config.timeout_secs(), 15);
}

#[test]
fn test_missing_file_is_a_config_error() {
    let err = Settings::from_file("/definitely/not/here.toml").unwrap_err();
    match err.kind {
        ConfigErrorKind::Read { path, .. } => assert_eq!(path, "/definitely/not/here.toml"),
        other => panic!("expected a read error, got {other}"),
    }
}
