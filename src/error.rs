use crate::config::ConfigError;
use crate::screening::provider::ProviderError;
use crate::telemetry::TelemetryError;
use std::fmt;

/// Fatal failures surfaced by the binary: bad configuration, telemetry setup,
/// socket binding, or a provider client that cannot be constructed. Screening
/// failures never reach this type; the pipeline folds them into verdicts.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Provider(ProviderError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {err}"),
            AppError::Telemetry(err) => write!(f, "telemetry error: {err}"),
            AppError::Io(err) => write!(f, "io error: {err}"),
            AppError::Provider(err) => write!(f, "provider error: {err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Provider(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ProviderError> for AppError {
    fn from(value: ProviderError) -> Self {
        Self::Provider(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_keep_their_detail_and_source() {
        let err = AppError::from(ConfigError::MissingApiKey);
        assert!(err.to_string().contains("RIOT_API_KEY"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn provider_errors_carry_the_upstream_status() {
        let err = AppError::from(ProviderError::UpstreamDown(503));
        assert!(err.to_string().contains("503"));
    }
}
