//! Navigable location and history.
//!
//! Dialog visibility is mirrored in the `addJoke` query parameter of the current
//! [`Location`]. A [`NavigationHost`] owns the history stack; every location it
//! reports, whether from an in-app push or from back/forward navigation, is fed
//! back to the controller the same way.

use std::fmt;

/// Query parameter that mirrors dialog visibility.
pub const DIALOG_PARAM: &str = "addJoke";

/// A shareable location: a path plus ordered query parameters.
///
/// # Examples
///
/// ```
/// use jokebox::infrastructure::Location;
///
/// let location = Location::parse("/?lang=fr");
/// let open = location.with_dialog(true);
/// assert_eq!(open.to_string(), "/?lang=fr&addJoke=true");
/// assert!(open.dialog_requested());
///
/// let closed = open.with_dialog(false);
/// assert_eq!(closed.to_string(), "/?lang=fr");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            query: Vec::new(),
        }
    }
}

impl Location {
    /// Parses `path?key=value&flag` into a location. Never fails.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let (path, query) = raw.split_once('?').unwrap_or((raw, ""));
        let path = if path.is_empty() { "/" } else { path };

        let query = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (key.to_string(), value.to_string())
            })
            .collect();

        Self {
            path: path.to_string(),
            query,
        }
    }

    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// True only when the dialog parameter is present and equal to `true`.
    #[must_use]
    pub fn dialog_requested(&self) -> bool {
        self.param(DIALOG_PARAM) == Some("true")
    }

    /// Copy of this location with the dialog parameter set or removed,
    /// keeping every other parameter.
    #[must_use]
    pub fn with_dialog(&self, open: bool) -> Self {
        let mut query: Vec<(String, String)> = self
            .query
            .iter()
            .filter(|(name, _)| name != DIALOG_PARAM)
            .cloned()
            .collect();

        if open {
            query.push((DIALOG_PARAM.to_string(), "true".to_string()));
        }

        Self {
            path: self.path.clone(),
            query,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        for (index, (key, value)) in self.query.iter().enumerate() {
            let separator = if index == 0 { '?' } else { '&' };
            write!(f, "{separator}{key}={value}")?;
        }
        Ok(())
    }
}

/// History capability provided by the presentation layer.
pub trait NavigationHost: Send {
    /// Location currently shown.
    fn current(&self) -> Location;

    /// Pushes a new entry, discarding any forward entries.
    fn push(&mut self, location: Location);

    /// Steps back; returns the new current location, or `None` at the start.
    fn back(&mut self) -> Option<Location>;

    /// Steps forward; returns the new current location, or `None` at the end.
    fn forward(&mut self) -> Option<Location>;
}

/// In-memory history stack.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Location>,
    index: usize,
}

impl MemoryHistory {
    #[must_use]
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(Location::default())
    }
}

impl NavigationHost for MemoryHistory {
    fn current(&self) -> Location {
        self.entries.get(self.index).cloned().unwrap_or_default()
    }

    fn push(&mut self, location: Location) {
        self.entries.truncate(self.index + 1);
        self.entries.push(location);
        self.index = self.entries.len() - 1;
    }

    fn back(&mut self) -> Option<Location> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    fn forward(&mut self) -> Option<Location> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialog_param_must_equal_true() {
        assert!(!Location::parse("/?addJoke=false").dialog_requested());
        assert!(!Location::parse("/?addJoke").dialog_requested());
        assert!(Location::parse("/jokes?addJoke=true").dialog_requested());
    }

    #[test]
    fn parse_and_display_agree() {
        let raw = "/jokes?q=cats&addJoke=true";
        assert_eq!(Location::parse(raw).to_string(), raw);
        assert_eq!(Location::parse("").to_string(), "/");
    }

    #[test]
    fn push_truncates_forward_entries() {
        let mut history = MemoryHistory::default();
        history.push(Location::parse("/?addJoke=true"));
        assert_eq!(history.back(), Some(Location::default()));

        history.push(Location::parse("/?q=x"));
        assert_eq!(history.forward(), None);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn back_and_forward_walk_the_stack() {
        let mut history = MemoryHistory::default();
        let open = Location::default().with_dialog(true);
        history.push(open.clone());

        assert_eq!(history.back(), Some(Location::default()));
        assert_eq!(history.back(), None);
        assert_eq!(history.forward(), Some(open));
    }
}
