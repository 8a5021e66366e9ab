//! View scopes: a restricted reader's visibility over business units.

/// Sentinel unit granting visibility over every business unit.
pub const ALL_UNITS: &str = "ALL";

/// The business units a restricted reader may see.
///
/// Assigned as a comma-separated list (e.g. `"CVS, CNS"`); elements are
/// trimmed, and the sentinel `ALL` anywhere in the list lifts the unit
/// restriction entirely. The raw assignment string is kept so accounts round
/// trip through the store unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewScope {
    raw: String,
    /// `None` when the sentinel is present.
    units: Option<Vec<String>>,
}

impl ViewScope {
    /// Parse an assignment string. Returns `None` when the string contains no
    /// units at all (empty or only separators); the role model turns that
    /// into its own validation error.
    pub fn parse(raw: &str) -> Option<Self> {
        let units: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|unit| !unit.is_empty())
            .map(str::to_string)
            .collect();

        if units.is_empty() {
            return None;
        }

        let units = if units.iter().any(|unit| unit == ALL_UNITS) {
            None
        } else {
            Some(units)
        };

        Some(Self {
            raw: raw.to_string(),
            units,
        })
    }

    /// The assignment string exactly as given.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the scope covers every business unit.
    pub fn is_all(&self) -> bool {
        self.units.is_none()
    }

    /// The concrete units, or `None` for an unrestricted scope.
    pub fn units(&self) -> Option<&[String]> {
        self.units.as_deref()
    }
}

impl core::fmt::Display for ViewScope {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.raw)
    }
}
