use crate::config;

pub fn load_settings() -> config::Settings {
    if config::resolve_config_path().is_none_or(|p| !p.exists()) {
        eprintln!("vivace: configuration file not found, using default values");
    }

    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("vivace: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("vivace: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}
