use crate::format::MAX_SEGMENTS;
use crate::ItreeError;

/// Parsing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of segments accepted by `decode_with`. Never above the
    /// record capacity.
    pub max_levels: usize,
}

impl Config {
    /// Config limiting paths to `max_levels` segments (`1..=16`).
    pub fn with_max_levels(max_levels: usize) -> Result<Self, ItreeError> {
        if max_levels < 1 || max_levels > MAX_SEGMENTS {
            return Err(ItreeError::Config(format!(
                "max levels must be 1..={MAX_SEGMENTS}, got {max_levels}"
            )));
        }
        Ok(Self { max_levels })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_levels: MAX_SEGMENTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        assert_eq!(Config::default().max_levels, 16);
        assert_eq!(Config::with_max_levels(4).unwrap().max_levels, 4);
        assert!(Config::with_max_levels(0).is_err());
        assert!(Config::with_max_levels(17).is_err());
    }
}
