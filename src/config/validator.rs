use anyhow::Result;
use colored::Colorize;
use std::collections::HashSet;
use std::path::Path;

/// Flags configuration keys that intact does not recognize
pub struct ConfigValidator {
    /// Leaf keys recognized by intact, in `section.key` form
    known_fields: HashSet<&'static str>,
    /// Recognized section names
    known_sections: HashSet<&'static str>,
}

impl ConfigValidator {
    /// Create a new validator with known configuration fields
    #[must_use]
    pub fn new() -> Self {
        let known_sections = HashSet::from(["hashing", "logging"]);
        let known_fields = HashSet::from([
            "hashing.chunk_size",
            "logging.level",
            "logging.file",
            "logging.color",
        ]);

        Self {
            known_fields,
            known_sections,
        }
    }

    /// Validate a configuration file and warn about unknown keys
    ///
    /// Unknown keys are ignored by the loader, so they only produce warnings
    /// on stderr; they never fail the run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub fn validate_config_file(&self, config_path: &Path) -> Result<()> {
        if !config_path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(config_path)?;
        let unknown = self.unknown_fields(&content)?;

        if !unknown.is_empty() {
            eprintln!("{}", "Configuration warnings:".yellow().bold());
            for field in &unknown {
                eprintln!("  Unknown configuration field: {}", field.yellow());
            }
            eprintln!();
        }

        Ok(())
    }

    /// Collect the dotted paths of unrecognized keys in `content`
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is not valid TOML
    pub fn unknown_fields(&self, content: &str) -> Result<Vec<String>> {
        let parsed: toml::Table = toml::from_str(content)?;
        let mut unknown = Vec::new();

        for (section, value) in &parsed {
            if !self.known_sections.contains(section.as_str()) {
                unknown.push(section.clone());
                continue;
            }

            if let toml::Value::Table(map) = value {
                for key in map.keys() {
                    let full_key = format!("{section}.{key}");
                    if !self.known_fields.contains(full_key.as_str()) {
                        unknown.push(full_key);
                    }
                }
            } else {
                // A section name used as a plain key
                unknown.push(section.clone());
            }
        }

        unknown.sort();
        Ok(unknown)
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}
