use thiserror::Error;

/// Errors raised while validating a [`crate::SensorConfig`].
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("horizontal_resolution must be at least 1")]
    ZeroHorizontalResolution,

    #[error("vertical_channels must be at least 1")]
    ZeroVerticalChannels,

    #[error("min_range must be non-negative, got {0}")]
    NegativeMinRange(f32),

    #[error("max_range ({max}) must be greater than min_range ({min})")]
    MaxRangeNotGreaterThanMin { min: f32, max: f32 },

    #[error("vertical_fov_upper ({upper}) must be >= vertical_fov_lower ({lower})")]
    FovUpperBelowLower { upper: f32, lower: f32 },

    #[error("noise_stddev must be non-negative, got {0}")]
    NegativeNoiseStddev(f32),

    #[error("config field `{field}` must be finite, got {value}")]
    NonFiniteField { field: &'static str, value: f32 },
}
