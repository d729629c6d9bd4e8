pub mod starter_settings;

pub use starter_settings::starter_settings_yaml;
