//! Registry settings from environment: `CSC_STRICT`, `CSC_DEFAULT_STAGE`, `CSC_DEFAULT_REGION`.

pub const DEFAULT_STAGE: &str = "dev";
pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Reject a second application or a reused resource name instead of overwriting.
    pub strict: bool,
    pub default_stage: String,
    pub default_region: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            strict: false,
            default_stage: DEFAULT_STAGE.into(),
            default_region: DEFAULT_REGION.into(),
        }
    }
}

impl Settings {
    /// Read settings from the process environment. Unset or empty variables keep the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Settings::default();
        Settings {
            strict: get("CSC_STRICT").map(|v| is_truthy(&v)).unwrap_or(defaults.strict),
            default_stage: get("CSC_DEFAULT_STAGE").unwrap_or(defaults.default_stage),
            default_region: get("CSC_DEFAULT_REGION").unwrap_or(defaults.default_region),
        }
    }

    pub fn strict(mut self, on: bool) -> Self {
        self.strict = on;
        self
    }
}

fn is_truthy(s: &str) -> bool {
    matches!(s.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(Settings::from_lookup(lookup(&[])), Settings::default());
    }

    #[test]
    fn overrides_are_read() {
        let settings = Settings::from_lookup(lookup(&[
            ("CSC_STRICT", "Yes"),
            ("CSC_DEFAULT_STAGE", "prod"),
            ("CSC_DEFAULT_REGION", " eu-central-1 "),
        ]));
        assert!(settings.strict);
        assert_eq!(settings.default_stage, "prod");
        assert_eq!(settings.default_region, "eu-central-1");
    }

    #[test]
    fn unrecognised_strict_value_is_false() {
        let settings = Settings::from_lookup(lookup(&[("CSC_STRICT", "maybe"), ("CSC_DEFAULT_STAGE", "")]));
        assert!(!settings.strict);
        assert_eq!(settings.default_stage, DEFAULT_STAGE);
    }
}
