use serde_json::Value as Json;


/// An ordered list of named debug values. Names may repeat
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DebugInfo {
    entries: Vec<(String, Json)>,
}


impl DebugInfo {
    pub fn new() -> DebugInfo {
        DebugInfo::default()
    }

    pub fn add<V: Into<Json>>(&mut self, name: &str, value: V) {
        self.entries.push((name.to_owned(), value.into()));
    }

    pub fn entries(&self) -> &[(String, Json)] {
        &self.entries
    }

    /// Every value added under `name`, in the order they were added
    pub fn get_all(&self, name: &str) -> Vec<&Json> {
        self.entries.iter()
            .filter(|&&(ref entry_name, _)| entry_name == name)
            .map(|&(_, ref value)| value)
            .collect()
    }

    /// Renders as `[[name, value], ...]`
    pub fn to_json(&self) -> Json {
        Json::Array(self.entries.iter().map(|&(ref name, ref value)| {
            Json::Array(vec![Json::String(name.clone()), value.clone()])
        }).collect())
    }
}
