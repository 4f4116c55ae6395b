use thiserror::Error;

#[derive(Error, Debug)]
pub enum MechworksError {
    #[error("Illegal placement: {0}")]
    Placement(#[from] crate::world::legality::PlacementError),

    #[error("Scenario load failed: {0}")]
    Load(#[from] crate::world::loader::LoadError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] crate::core::config::ConfigError),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MechworksError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::loader::ScenarioLoader;

    #[test]
    fn test_load_failure_wraps_source() {
        let err: MechworksError = ScenarioLoader::load_from_str("dimension = ")
            .map(|_| ())
            .unwrap_err()
            .into();
        assert!(matches!(err, MechworksError::Load(_)));
        assert!(err.to_string().starts_with("Scenario load failed: "));
    }
}
