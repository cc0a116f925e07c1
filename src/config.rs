use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DOC_ROOT: &str = "/usr/share/runtime/docs/doc/";
pub const DEFAULT_RUNTIME: &str = "org.gnome.Sdk//49";
pub const DEFAULT_SANDBOX_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct Config {
    pub doc_root: PathBuf,
    pub runtime: String,
    pub sandbox_timeout: Duration,
    pub allow_sandbox: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            doc_root: PathBuf::from(DEFAULT_DOC_ROOT),
            runtime: DEFAULT_RUNTIME.to_string(),
            sandbox_timeout: DEFAULT_SANDBOX_TIMEOUT,
            allow_sandbox: true,
        }
    }
}

impl Config {
    pub fn with_doc_root(mut self, doc_root: impl Into<PathBuf>) -> Self {
        self.doc_root = doc_root.into();
        self
    }

    pub fn with_runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = runtime.into();
        self
    }

    pub fn with_sandbox_timeout(mut self, timeout: Duration) -> Self {
        self.sandbox_timeout = timeout;
        self
    }

    pub fn with_sandbox(mut self, allow: bool) -> Self {
        self.allow_sandbox = allow;
        self
    }
}
