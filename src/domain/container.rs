use serde::Serialize;

/// Runtime-specific state names and the canonical name they map to.
///
/// Every backend reports container state with its own words; the dashboard
/// only ever sees the right-hand side of this table. Add a row when a new
/// backend introduces a synonym.
pub const STATE_VOCABULARY: &[(&str, &str)] = &[("stopped", "exited")];

/// Canonical state reported by a running container.
pub const STATE_RUNNING: &str = "running";

/// Maps a raw runtime state to the canonical vocabulary, passing unknown
/// values through untouched.
pub fn canonical_state(raw: &str) -> &str {
    STATE_VOCABULARY
        .iter()
        .find(|(source, _)| *source == raw)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(raw)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Container {
    pub id: String,
    pub name: String,
    pub image: String,
    /// Already normalized through [`canonical_state`].
    pub state: String,
}

impl Container {
    pub fn is_running(&self) -> bool {
        self.state == STATE_RUNNING
    }

    pub fn matches(&self, name_or_id: &str) -> bool {
        self.id == name_or_id || self.name == name_or_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub id: String,
    pub name: String,
    pub tag: String,
}

impl Image {
    /// `name:tag`, or whichever half is present.
    pub fn reference(&self) -> String {
        match (self.name.is_empty(), self.tag.is_empty()) {
            (false, false) => format!("{}:{}", self.name, self.tag),
            (false, true) => self.name.clone(),
            (true, false) => format!("<none>:{}", self.tag),
            (true, true) => "<none>".to_string(),
        }
    }
}

/// Self-reported runtime health. The schema belongs to the runtime, so the
/// document is kept as decoded.
pub type SystemStatus = serde_json::Map<String, serde_json::Value>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_maps_to_exited() {
        assert_eq!(canonical_state("stopped"), "exited");
    }

    #[test]
    fn unknown_states_pass_through() {
        assert_eq!(canonical_state("running"), "running");
        assert_eq!(canonical_state("paused"), "paused");
        assert_eq!(canonical_state(""), "");
        assert_eq!(canonical_state("Stopped"), "Stopped");
    }

    #[test]
    fn vocabulary_targets_are_canonical() {
        for (_, canonical) in STATE_VOCABULARY {
            assert_eq!(canonical_state(canonical), *canonical);
        }
    }

    #[test]
    fn container_matches_by_id_or_name() {
        let container = Container {
            id: "abc123".to_string(),
            name: "web".to_string(),
            image: "nginx".to_string(),
            state: "running".to_string(),
        };

        assert!(container.matches("abc123"));
        assert!(container.matches("web"));
        assert!(!container.matches("nginx"));
        assert!(container.is_running());
    }

    #[test]
    fn image_reference_formats() {
        let image = |name: &str, tag: &str| Image {
            id: "img".to_string(),
            name: name.to_string(),
            tag: tag.to_string(),
        };

        assert_eq!(image("nginx", "latest").reference(), "nginx:latest");
        assert_eq!(image("nginx", "").reference(), "nginx");
        assert_eq!(image("", "latest").reference(), "<none>:latest");
        assert_eq!(image("", "").reference(), "<none>");
    }
}
