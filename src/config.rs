use serde::Deserialize;

/// Knobs for [`AtomMapper`](crate::AtomMapper).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapperConfig {
    /// Give every unlabeled atom a fresh label before mapping, numbering
    /// upward from the reaction's largest label: reactant atoms first, then
    /// product atoms, each in node order. Such labels only ever produce
    /// one-sided entries.
    pub synthesize_labels: bool,
    /// Fail a reaction whose combination count exceeds this. `None` means
    /// every combination is enumerated.
    pub max_combinations: Option<usize>,
}

impl MapperConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = MapperConfig::default();
        assert!(!config.synthesize_labels);
        assert_eq!(config.max_combinations, None);
    }

    #[test]
    fn partial_json() {
        let config = MapperConfig::from_json(r#"{"max_combinations": 50}"#).unwrap();
        assert_eq!(config.max_combinations, Some(50));
        assert!(!config.synthesize_labels);
    }

    #[test]
    fn unknown_fields_rejected() {
        assert!(MapperConfig::from_json(r#"{"max_combos": 50}"#).is_err());
    }
}
