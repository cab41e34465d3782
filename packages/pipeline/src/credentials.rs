// ABOUTME: In-memory provider credentials and dispatch path selection
// ABOUTME: User-entered keys take priority over the ambient fallback; only Gemini can go live

use std::collections::HashMap;
use std::fmt;

use auditflow_core::ProviderKind;

/// API keys held for the session only. Never persisted, never printed.
#[derive(Clone, Default, PartialEq)]
pub struct Credentials {
    user_keys: HashMap<ProviderKind, String>,
    ambient: Option<String>,
}

impl Credentials {
    /// `ambient` is the fallback key from the environment, consulted only when the user field is empty
    pub fn new(ambient: Option<String>) -> Self {
        Self {
            user_keys: HashMap::new(),
            ambient: ambient.filter(|key| !key.trim().is_empty()),
        }
    }

    /// Replace the key the user entered for `provider`; an empty key clears it
    pub fn set_user_key(&mut self, provider: ProviderKind, key: impl Into<String>) {
        let key = key.into();
        if key.trim().is_empty() {
            self.user_keys.remove(&provider);
        } else {
            self.user_keys.insert(provider, key);
        }
    }

    pub fn user_key(&self, provider: ProviderKind) -> Option<&str> {
        self.user_keys.get(&provider).map(String::as_str)
    }

    /// Credential for a live call to `provider`, if one can be made at all
    pub fn live_credential(&self, provider: ProviderKind) -> Option<&str> {
        if !provider.supports_live_calls() {
            return None;
        }
        self.user_key(provider).or(self.ambient.as_deref())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut providers: Vec<_> = self.user_keys.keys().map(|p| p.as_str()).collect();
        providers.sort_unstable();
        f.debug_struct("Credentials")
            .field("user_keys", &providers)
            .field("ambient", &self.ambient.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Which branch a run takes
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum DispatchPath<'a> {
    Live { credential: &'a str },
    Simulation,
}

impl DispatchPath<'_> {
    pub fn is_live(&self) -> bool {
        matches!(self, DispatchPath::Live { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            DispatchPath::Live { .. } => "live",
            DispatchPath::Simulation => "simulation",
        }
    }
}

impl fmt::Debug for DispatchPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchPath::Live { .. } => f.write_str("Live { credential: <redacted> }"),
            DispatchPath::Simulation => f.write_str("Simulation"),
        }
    }
}

/// Live only for the real-capable provider with a credential available; everything else simulates.
pub fn select_dispatch_path(provider: ProviderKind, credentials: &Credentials) -> DispatchPath<'_> {
    match credentials.live_credential(provider) {
        Some(credential) => DispatchPath::Live { credential },
        None => DispatchPath::Simulation,
    }
}
