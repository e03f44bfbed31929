use serde::{Deserialize, Serialize};

/// Resolves texture names from the primitive form to resource paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureLibrary {
    root: String,
}

impl Default for TextureLibrary {
    fn default() -> Self {
        Self::new("../textures")
    }
}

impl TextureLibrary {
    pub fn new(root: impl Into<String>) -> Self {
        let mut root = root.into();
        while root.len() > 1 && root.ends_with('/') {
            root.pop();
        }
        Self { root }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Path of the texture called `name`. Leading slashes on `name` are ignored.
    pub fn resolve(&self, name: &str) -> String {
        format!("{}/{}", self.root, name.trim().trim_start_matches('/'))
    }
}
