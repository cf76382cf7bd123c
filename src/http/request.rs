use reqwest::Method;

/// A call against the versioned API: method, endpoint path, query
/// parameters and an optional suffix such as an artwork id.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub params: Vec<(String, String)>,
    pub path_append: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Vec::new(),
            path_append: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn append_path(mut self, suffix: impl Into<String>) -> Self {
        self.path_append = Some(suffix.into());
        self
    }

    /// Endpoint path with the suffix, relative to the API root.
    pub fn full_path(&self) -> String {
        match &self.path_append {
            Some(suffix) => format!("{}{}", self.path, suffix),
            None => self.path.clone(),
        }
    }
}
