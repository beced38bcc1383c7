//! Benchmark configuration
//!
//! Settings come from a JSON file (`appsettings.json` by default) and may be
//! overridden from the command line before the run starts.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use tracing::{debug, info};

use crate::core::collection::{CollectionKind, Element};
use crate::error::{HarnessError, Result};

pub const DEFAULT_SETTINGS_FILE: &str = "appsettings.json";

/// Tunable parameters of one benchmark invocation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BenchmarkingParameters {
    #[serde(rename = "RepeatCount", deserialize_with = "validate_positive_usize")]
    pub repeat_count: usize,
    #[serde(rename = "PopulationSize", deserialize_with = "validate_positive_usize")]
    pub population_size: usize,
    /// Zero builds empty instances; only the size, miss, traversal and grow
    /// steps are timed then
    #[serde(rename = "ElementsPerInstance")]
    pub elements_per_instance: usize,
    #[serde(rename = "LookupIterations", deserialize_with = "validate_positive_usize")]
    pub lookup_iterations: usize,
    #[serde(rename = "Collection", default)]
    pub collection: CollectionKind,
}

impl Default for BenchmarkingParameters {
    fn default() -> Self {
        Self {
            repeat_count: 5,
            population_size: 10_000,
            elements_per_instance: 1_000,
            lookup_iterations: 10,
            collection: CollectionKind::HashSet,
        }
    }
}

fn validate_positive_usize<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = i64::deserialize(deserializer)?;
    if value > 0 {
        usize::try_from(value).map_err(serde::de::Error::custom)
    } else {
        Err(serde::de::Error::custom("Value must be positive"))
    }
}

impl BenchmarkingParameters {
    /// Load parameters from `path`, falling back to defaults when the file is absent
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let params = Self::from_json(&content)?;
                debug!(path = %path.display(), ?params, "loaded settings");
                Ok(params)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "settings file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        // values rejected by the field validators are configuration errors,
        // malformed JSON stays a settings error
        let params: Self = serde_json::from_str(content).map_err(|e| match e.classify() {
            Category::Data => HarnessError::InvalidConfiguration(e.to_string()),
            _ => HarnessError::Json(e),
        })?;
        params.validate()?;
        Ok(params)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Check every count is positive and the element domain fits in [`Element`]
    pub fn validate(&self) -> Result<()> {
        validate_dimensions(
            self.repeat_count,
            self.population_size,
            self.elements_per_instance,
            self.lookup_iterations,
        )
    }
}

/// Shared validation for settings and the trial runner
///
/// Instance `i` holds `i*E .. (i+1)*E`; the grow step later inserts
/// `P*E + i`, so the largest element ever produced is `P*E + P - 1`.
/// `E` may be zero, every other count must be positive.
pub fn validate_dimensions(
    repeat_count: usize,
    population_size: usize,
    elements_per_instance: usize,
    lookup_iterations: usize,
) -> Result<()> {
    let checks = [
        ("repeat count", repeat_count),
        ("population size", population_size),
        ("lookup iterations", lookup_iterations),
    ];
    for (name, value) in checks {
        if value < 1 {
            return Err(HarnessError::InvalidConfiguration(format!(
                "{name} must be at least 1, got {value}"
            )));
        }
    }

    let domain = population_size
        .checked_mul(elements_per_instance)
        .and_then(|n| n.checked_add(population_size))
        .and_then(|n| Element::try_from(n).ok());
    if domain.is_none() {
        return Err(HarnessError::InvalidConfiguration(format!(
            "element domain {population_size} x {elements_per_instance} does not fit in i64"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pascal_case_settings() {
        let params = BenchmarkingParameters::from_json(
            r#"{
                "RepeatCount": 3,
                "PopulationSize": 100,
                "ElementsPerInstance": 10,
                "LookupIterations": 2,
                "Collection": "HashMap"
            }"#,
        )
        .unwrap();
        assert_eq!(params.repeat_count, 3);
        assert_eq!(params.population_size, 100);
        assert_eq!(params.elements_per_instance, 10);
        assert_eq!(params.lookup_iterations, 2);
        assert_eq!(params.collection, CollectionKind::HashMap);
    }

    #[test]
    fn collection_defaults_to_hash_set() {
        let params = BenchmarkingParameters::from_json(
            r#"{"RepeatCount":1,"PopulationSize":1,"ElementsPerInstance":1,"LookupIterations":1}"#,
        )
        .unwrap();
        assert_eq!(params.collection, CollectionKind::HashSet);
    }

    #[test]
    fn rejects_non_positive_values() {
        for bad in ["0", "-4"] {
            let json = format!(
                r#"{{"RepeatCount":{bad},"PopulationSize":1,"ElementsPerInstance":1,"LookupIterations":1}}"#
            );
            assert!(matches!(
                BenchmarkingParameters::from_json(&json),
                Err(HarnessError::InvalidConfiguration(_))
            ));
        }
        let negative_elements =
            r#"{"RepeatCount":1,"PopulationSize":1,"ElementsPerInstance":-1,"LookupIterations":1}"#;
        assert!(matches!(
            BenchmarkingParameters::from_json(negative_elements),
            Err(HarnessError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_settings_error() {
        assert!(matches!(
            BenchmarkingParameters::from_json("{ \"RepeatCount\": "),
            Err(HarnessError::Json(_))
        ));
    }

    #[test]
    fn empty_instances_are_allowed() {
        let params = BenchmarkingParameters::from_json(
            r#"{
                "RepeatCount": 1,
                "PopulationSize": 100000,
                "ElementsPerInstance": 0,
                "LookupIterations": 1,
                "Collection": "HashMap"
            }"#,
        )
        .unwrap();
        assert_eq!(params.elements_per_instance, 0);
        validate_dimensions(1, 3, 0, 1).unwrap();
    }

    #[test]
    fn validate_rejects_zero_counts() {
        let params = BenchmarkingParameters {
            lookup_iterations: 0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(HarnessError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn validate_rejects_oversized_domain() {
        let params = BenchmarkingParameters {
            population_size: usize::MAX / 2,
            elements_per_instance: 4,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(HarnessError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn defaults_are_valid() {
        BenchmarkingParameters::default().validate().unwrap();
    }
}
