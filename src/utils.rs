use ::serde::Deserialize;

// Upper bound on any caller-supplied list size
const MAX_LIST_LIMIT: u64 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    #[serde(default)]
    limit: u64,
}

impl LimitParams {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }

    /// The requested limit, or `default` when absent or zero.
    pub fn limit_or(&self, default: u64) -> u64 {
        if self.limit == 0 {
            default
        } else {
            self.limit.min(MAX_LIST_LIMIT)
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AuthorsParams {
    #[serde(default)]
    page: u64,
    #[serde(default)]
    pub query: Option<String>,
}

impl AuthorsParams {
    pub fn page(&self) -> u64 {
        self.page.max(1)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AvatarParams {
    #[serde(default)]
    pub filename: Option<String>,
}

impl AvatarParams {
    pub fn filename(&self) -> &str {
        self.filename
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or("avatar")
    }
}
