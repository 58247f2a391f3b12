use std::{collections::BTreeSet, fs};

use anyhow::{Context, Result};
use camino::Utf8Path;
use serde::Deserialize;

use crate::host::Stylesheet;

/// Bootstrap settings, usually read from a `Mooring.toml` shipped next to the application.
#[derive(Clone, Deserialize, PartialEq, Eq, Debug)]
#[serde(default, rename_all = "kebab-case")]
pub struct BootstrapConfig {
    /// Id of the attachment point.
    pub target: String,
    /// Id of a child of the target to insert before.
    pub anchor: Option<String>,
    pub stylesheets: Vec<Stylesheet>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            target: "app".to_string(),
            anchor: None,
            stylesheets: vec![],
        }
    }
}

impl BootstrapConfig {
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("`{path}` is not a valid config file"))?;

        let (config, unused) =
            Self::parse_tracking(&contents).with_context(|| format!("failed to parse `{path}`"))?;
        for key in unused {
            tracing::warn!("{path}: unused config key: {key}");
        }
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let (config, unused) = Self::parse_tracking(contents)?;
        for key in unused {
            tracing::warn!("unused config key: {key}");
        }
        Ok(config)
    }

    fn parse_tracking(contents: &str) -> Result<(Self, BTreeSet<String>)> {
        let mut unused = BTreeSet::new();
        let config: Self =
            serde_ignored::deserialize(toml::Deserializer::new(contents), |path| {
                unused.insert(path.to_string());
            })?;
        Ok((config, unused))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_targets_app() {
        let config = BootstrapConfig::parse("").unwrap();
        assert_eq!(config, BootstrapConfig::default());
        assert_eq!(config.target, "app");
    }

    #[test]
    fn parses_stylesheets() {
        let config = BootstrapConfig::parse(
            r#"
            target = "root"
            anchor = "footer"
            stylesheets = [
                { href = "app.css" },
                { inline = "body { margin: 0 }" },
            ]
            "#,
        )
        .unwrap();

        assert_eq!(config.target, "root");
        assert_eq!(config.anchor.as_deref(), Some("footer"));
        assert_eq!(
            config.stylesheets,
            vec![
                Stylesheet::Href("app.css".into()),
                Stylesheet::Inline("body { margin: 0 }".into()),
            ]
        );
    }

    #[test]
    fn tracks_unused_keys() {
        let (config, unused) =
            BootstrapConfig::parse_tracking("target = \"main\"\ntheme = \"dark\"\n").unwrap();

        assert_eq!(config.target, "main");
        assert_eq!(unused.into_iter().collect::<Vec<_>>(), vec!["theme"]);
    }

    #[test]
    fn rejects_malformed_stylesheet() {
        assert!(BootstrapConfig::parse("stylesheets = [{ url = \"x\" }]").is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = BootstrapConfig::load(Utf8Path::new("does/not/exist.toml")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.toml"));
    }
}
