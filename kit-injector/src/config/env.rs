use std::path::Path;

/// Load environment variables from .env files with proper precedence
///
/// Precedence (later entries override earlier):
/// 1. .env (base defaults)
/// 2. .env.local (local overrides, not committed)
/// 3. Actual system environment variables (highest priority)
///
/// Returns the number of files that were found and loaded.
pub fn load_dotenv(project_root: &Path) -> usize {
    // dotenvy never overwrites a variable that is already set, so the most
    // specific file is loaded first
    [".env.local", ".env"]
        .iter()
        .filter(|name| dotenvy::from_path(project_root.join(name)).is_ok())
        .count()
}

/// Get an environment variable with a default value
///
/// # Example
/// ```
/// use kit_injector::config::env;
///
/// let strict: bool = env("INJECTOR_STRICT", false);
/// ```
pub fn env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env_optional(key).unwrap_or(default)
}

/// Get an optional environment variable
///
/// # Example
/// ```
/// use kit_injector::config::env_optional;
///
/// let strict: Option<bool> = env_optional("INJECTOR_STRICT");
/// ```
pub fn env_optional<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
