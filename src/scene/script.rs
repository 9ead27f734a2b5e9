/// Script attached to one or more nodes through `extras.scripts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub uri: String,
    /// Defaults to the uri
    pub name: String,
}

impl Script {
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        let uri = uri.into();
        Self {
            name: uri.clone(),
            uri,
        }
    }
}
