//! Batch-level request parameters

/// Parameters that apply to a whole pushed batch
///
/// Values are kept as the caller sent them; they are validated when the
/// import profile is built. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushParams {
    /// Account the batch belongs to
    pub screen_name: Option<String>,

    /// Name of a harvesting frequency (e.g. `DAILY`)
    pub harvesting_freq: Option<String>,

    /// Profile lifetime in seconds, as text
    pub lifetime: Option<String>,

    /// URL of the source file or feed
    pub url: Option<String>,

    /// Host that pushed the batch
    pub client_host: String,
}

impl PushParams {
    /// Parameters for an anonymous push from `client_host`
    #[must_use]
    pub fn from_host(client_host: impl Into<String>) -> Self {
        Self {
            client_host: client_host.into(),
            ..Self::default()
        }
    }

    /// Screen name, if non-empty
    #[must_use]
    pub fn screen_name(&self) -> Option<&str> {
        non_empty(self.screen_name.as_deref())
    }

    /// Harvesting frequency name, if non-empty
    #[must_use]
    pub fn harvesting_freq(&self) -> Option<&str> {
        non_empty(self.harvesting_freq.as_deref())
    }

    /// Lifetime text, if non-empty
    #[must_use]
    pub fn lifetime(&self) -> Option<&str> {
        non_empty(self.lifetime.as_deref())
    }

    /// Source URL, empty when the caller sent none
    #[must_use]
    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
