//! Config file loading: a TOML file of named sections, one managed server
//! per section.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, bail};
use serde::Deserialize;
use srvmux_core::{InterfaceOptions, ServerSettings};

/// One named section of the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionConfig {
    /// Registry key selecting the interface variant.
    pub interface: String,
    #[serde(flatten)]
    pub interface_options: InterfaceOptions,
    #[serde(flatten)]
    pub server: ServerSettings,
}

fn section_names(sections: &BTreeMap<String, SectionConfig>) -> String {
    sections
        .keys()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load `path` and pick `section`, or the file's only section when none is
/// named.
pub fn load_section(path: &Path, section: Option<&str>) -> anyhow::Result<SectionConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let mut sections: BTreeMap<String, SectionConfig> =
        toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))?;

    match section {
        Some(name) => match sections.remove(name) {
            Some(config) => Ok(config),
            None => bail!(
                "no section `{name}` in {} (available: {})",
                path.display(),
                section_names(&sections)
            ),
        },
        None => {
            if sections.len() > 1 {
                bail!(
                    "{} has multiple sections; pick one with --section (available: {})",
                    path.display(),
                    section_names(&sections)
                );
            }
            match sections.into_iter().next() {
                Some((_, config)) => Ok(config),
                None => bail!("config file {} has no sections", path.display()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp config");
        file.write_all(contents.as_bytes()).expect("write config");
        file.flush().expect("flush");
        file
    }

    const SAMPLE: &str = r#"
[survival]
interface = "tmux"
session = "mc"
window = "server"
socket_path = "/tmp/mc.sock"
server_jar = "/srv/mc/server.jar"
java_options = "-Xmx4G -Xms4G"

[creative]
interface = "tmux-pane"
session = "mc"
pane = "0.1"
server_jar = "/srv/creative/server.jar"
"#;

    #[test]
    fn loads_named_section_with_defaults_applied() {
        let file = config_file(SAMPLE);
        let config = load_section(file.path(), Some("survival")).expect("section");

        assert_eq!(config.interface, "tmux");
        assert_eq!(config.interface_options.session, "mc");
        assert_eq!(config.interface_options.window, "server");
        assert_eq!(
            config.interface_options.socket_path.as_deref(),
            Some("/tmp/mc.sock")
        );
        assert_eq!(config.server.java_options, "-Xmx4G -Xms4G");
        // Unset fields fall back to their defaults.
        assert_eq!(config.server.java_path, "java");
        assert_eq!(config.server.server_args, "nogui");
        assert_eq!(
            config.server.log_file(),
            std::path::PathBuf::from("/srv/mc/server.log")
        );
    }

    #[test]
    fn single_section_is_picked_without_a_name() {
        let file = config_file(
            r#"
[only]
interface = "tmux"
server_jar = "/srv/mc/server.jar"
"#,
        );
        let config = load_section(file.path(), None).expect("only section");
        assert_eq!(config.interface, "tmux");
        assert_eq!(config.interface_options.session, "0");
    }

    #[test]
    fn multiple_sections_require_an_explicit_choice() {
        let file = config_file(SAMPLE);
        let err = load_section(file.path(), None).expect_err("ambiguous");
        let msg = err.to_string();
        assert!(msg.contains("--section"));
        assert!(msg.contains("creative"));
        assert!(msg.contains("survival"));
    }

    #[test]
    fn unknown_section_lists_available_ones() {
        let file = config_file(SAMPLE);
        let err = load_section(file.path(), Some("hardcore")).expect_err("missing");
        assert!(err.to_string().contains("survival"));
    }
}
