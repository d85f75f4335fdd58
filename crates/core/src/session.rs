use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    Summary,
    Answer,
}

/// Last generated value per action, owned by a single interactive session.
#[derive(Debug, Default)]
pub struct SessionState {
    values: HashMap<SessionKey, String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&mut self, key: SessionKey, value: String) {
        self.values.insert(key, value);
    }

    pub fn get(&self, key: SessionKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }
}
