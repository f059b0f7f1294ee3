use crate::WeftConfig;

/// Settings that are accepted but have no effect in combination with the rest of the config.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// `layer.<toml_key>` only applies when `layer.remap_arguments` is enabled.
    RequiresArgumentRemapping { toml_key: &'static str },
    /// `layer.ci` is set but `layer.skip_ci` is disabled, so the flag is ignored.
    CiFlagIgnored,
}

impl WeftConfig {
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let layer = &self.layer;
        if !layer.remap_arguments && layer.skip_different {
            warnings.push(ConfigWarning::RequiresArgumentRemapping {
                toml_key: "skip_different",
            });
        }
        if layer.ci && !layer.skip_ci {
            warnings.push(ConfigWarning::CiFlagIgnored);
        }
        warnings
    }
}
