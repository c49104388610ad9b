use serde::Serialize;

/// One entry of the service catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDescriptor {
    pub namespace: String,
    pub alias: String,
    /// ARN patterns with named capture groups, one group per dimension.
    pub dimension_patterns: Vec<String>,
}

impl ServiceDescriptor {
    pub fn new<I, S>(namespace: &str, alias: &str, dimension_patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            namespace: namespace.to_string(),
            alias: alias.to_string(),
            dimension_patterns: dimension_patterns.into_iter().map(Into::into).collect(),
        }
    }
}
