pub struct ServerSettings {
    pub default_port: u16,
    pub database_path: &'static str,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            default_port: 3000,
            database_path: "courtside.db",
        }
    }
}

pub struct ScoringSettings {
    /// Capacity of the broadcast channel feeding the push transport.
    pub push_channel_capacity: usize,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            push_channel_capacity: 256,
        }
    }
}

#[derive(Default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub scoring: ScoringSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}
