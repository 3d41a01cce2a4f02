//! Matching modes.

use std::fmt;

/// Mode selects how hosts that rules do not fully cover are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Return the empty string unless a rule matches completely.
    #[default]
    Strict,
    /// Always return a plausible suffix, falling back to heuristics for
    /// unknown or truncated suffixes.
    Permissive,
}

impl Mode {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Strict => "STRICT",
            Mode::Permissive => "PERMISSIVE",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "STRICT" => Ok(Mode::Strict),
            "PERMISSIVE" => Ok(Mode::Permissive),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("strict".parse(), Ok(Mode::Strict));
        assert_eq!("PERMISSIVE".parse(), Ok(Mode::Permissive));
        assert_eq!("fuzzy".parse::<Mode>(), Err(()));
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(Mode::Strict.to_string(), "STRICT");
        assert_eq!(Mode::Permissive.to_string(), "PERMISSIVE");
    }
}
