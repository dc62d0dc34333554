use std::sync::LazyLock;

use derive_from_env::FromEnv;

#[derive(FromEnv)]
#[from_env(prefix = "CHANLOG")]
#[allow(non_snake_case)]
pub struct ChanlogEnv {
    #[from_env(default = "true")]
    pub STRICT_LEVELS: bool,
    #[from_env(default = "true")]
    pub COLOR: bool,
}

impl Default for ChanlogEnv {
    fn default() -> Self {
        Self {
            STRICT_LEVELS: true,
            COLOR: true,
        }
    }
}

/// Defaults read once from `CHANLOG_*` environment variables.
/// Malformed values fall back to the defaults.
pub static CHANLOG_ENV: LazyLock<ChanlogEnv> =
    LazyLock::new(|| ChanlogEnv::from_env().unwrap_or_default());
