use std::env;

pub const DEFAULT_POOL_SIZE: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    pub strip_base_path: Option<String>,
    pub pool_size: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            strip_base_path: None,
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl BridgeConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let strip_base_path = lookup("ALB_BRIDGE_STRIP_BASE_PATH").filter(|v| !v.trim().is_empty());

        let pool_size = match lookup("ALB_BRIDGE_POOL_SIZE") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                Ok(_) => return Err("ALB_BRIDGE_POOL_SIZE: must be greater than zero".to_string()),
                Err(e) => return Err(format!("ALB_BRIDGE_POOL_SIZE: {}", e)),
            },
            None => DEFAULT_POOL_SIZE,
        };

        Ok(Self {
            strip_base_path,
            pool_size,
        })
    }
}
