#[cfg(test)]
mod tests {
    use crate::cli::ServeArgs;
    use crate::config::{BriskConfig, DEFAULT_PORT, DEFAULT_PROXY};
    use crate::error::{CliError, ConfigError};
    use brisk_scripts::TransformPreset;
    use brisk_styles::CompatFloor;
    use serial_test::serial;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn load(root: &Path, serve: Option<&ServeArgs>) -> crate::Result<BriskConfig> {
        BriskConfig::load(root, None, serve)
    }

    #[test]
    #[serial]
    fn test_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let config = load(dir.path(), None).unwrap();

        assert_eq!(config, BriskConfig::default());
        assert_eq!(config.styles.entry, PathBuf::from("assets/sass/main.scss"));
        assert_eq!(config.styles.watch, "assets/sass/**/*");
        assert_eq!(config.scripts.entry, PathBuf::from("assets/js/main.js"));
        assert_eq!(config.server.proxy, DEFAULT_PROXY);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.compat_floor().unwrap(), CompatFloor::Ie(10));
        assert_eq!(
            config.presets().unwrap(),
            vec![TransformPreset::Es2015, TransformPreset::React]
        );
        config.validate().unwrap();
    }

    #[test]
    #[serial]
    fn test_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("brisk.toml"),
            r#"
[styles]
compatibility = "ie9"
debounce = 250

[server]
proxy = "localhost:8080"
open = false
"#,
        )
        .unwrap();

        let config = load(dir.path(), None).unwrap();
        assert_eq!(config.styles.compatibility, "ie9");
        assert_eq!(config.styles.debounce, 250);
        assert_eq!(config.scripts.debounce, 100);
        assert_eq!(config.server.proxy, "localhost:8080");
        assert!(!config.server.open);
        // untouched fields keep their defaults
        assert_eq!(config.styles.entry, PathBuf::from("assets/sass/main.scss"));
        assert_eq!(config.server.port, DEFAULT_PORT);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file_and_flags_override_env() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("brisk.toml"), "[server]\nport = 4000\n").unwrap();

        unsafe {
            std::env::set_var("BRISK_SERVER_PORT", "5000");
            std::env::set_var("BRISK_SERVER_BROWSER", "firefox");
        }

        let from_env = load(dir.path(), None).unwrap();
        assert_eq!(from_env.server.port, 5000);
        assert_eq!(from_env.server.browser, "firefox");

        let flags = ServeArgs {
            port: Some(6000),
            no_open: true,
            ..ServeArgs::default()
        };
        let from_flags = load(dir.path(), Some(&flags)).unwrap();
        assert_eq!(from_flags.server.port, 6000);
        assert_eq!(from_flags.server.browser, "firefox");
        assert!(!from_flags.server.open);

        unsafe {
            std::env::remove_var("BRISK_SERVER_PORT");
            std::env::remove_var("BRISK_SERVER_BROWSER");
        }
    }

    #[test]
    #[serial]
    fn test_unrelated_env_is_ignored() {
        let dir = TempDir::new().unwrap();
        unsafe {
            std::env::set_var("BRISK_LOG", "debug");
        }
        let result = load(dir.path(), None);
        unsafe {
            std::env::remove_var("BRISK_LOG");
        }
        assert!(result.is_ok());
    }

    #[test]
    #[serial]
    fn test_unknown_field_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("brisk.toml"), "[styles]\nentyr = \"x.scss\"\n").unwrap();

        let err = load(dir.path(), None).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::InvalidValue { .. })));
    }

    #[test]
    #[serial]
    fn test_explicit_config_must_exist() {
        let dir = TempDir::new().unwrap();
        let err = BriskConfig::load(dir.path(), Some(Path::new("missing.toml")), None).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::NotFound(_))));
    }

    #[test]
    #[serial]
    fn test_explicit_config_relative_to_root() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("theme.toml"), "[server]\nproxy = \"theme.test\"\n").unwrap();

        let config =
            BriskConfig::load(dir.path(), Some(Path::new("theme.toml")), None).unwrap();
        assert_eq!(config.server.proxy, "theme.test");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = BriskConfig::default();
        config.styles.compatibility = "netscape4".to_string();
        assert!(config.validate().is_err());

        let mut config = BriskConfig::default();
        config.scripts.presets = vec!["stage-0".to_string()];
        assert!(config.validate().is_err());

        let mut config = BriskConfig::default();
        config.styles.watch = "assets/[sass".to_string();
        assert!(config.validate().is_err());

        let mut config = BriskConfig::default();
        config.server.proxy = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(CliError::Config(ConfigError::MissingField { .. }))
        ));

        let mut config = BriskConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = BriskConfig::default();
        config.scripts.entry = PathBuf::new();
        assert!(matches!(
            config.validate(),
            Err(CliError::Config(ConfigError::MissingField { field, .. })) if field == "scripts.entry"
        ));

        let mut config = BriskConfig::default();
        config.styles.browsers = vec![];
        assert!(config.validate().is_err());
    }
}
