use powerset_macros::config;

use crate::logger::LogLevel;

pub trait IntoOr<T> {
    fn into_or(self, or: T) -> T;
}

impl<T> IntoOr<Option<T>> for Option<T> {
    fn into_or(self, or: Option<T>) -> Option<T> {
        match self {
            Some(t) => Some(t),
            None => or,
        }
    }
}

impl<T> IntoOr<T> for Option<T> {
    fn into_or(self, or: T) -> T {
        self.unwrap_or(or)
    }
}

config! {
    pub struct LoggerConfig {
        enabled: bool = false,
        log_file: bool = false,
        log_level: LogLevel = LogLevel::Warn,
    }
}

config! {
    /// How automaton data is labelled in the graph and table views.
    pub struct ViewConfig {
        /// Shown instead of the epsilon marker on NFA edges and table rows.
        epsilon_label: String = crate::automaton::nfa::EPSILON_LABEL.to_string(),
        /// Shown in DFA table rows that have no transition.
        none_marker: String = "-".to_string(),
    }
}

config! {
    pub struct PowersetConfig {
        view: ViewConfig (Option<PartialViewConfig> = ViewConfig::default()),
        logger: LoggerConfig (Option<PartialLoggerConfig> = LoggerConfig::default()),
    }
}

#[test]
fn test_config_defaults() {
    let config = PowersetConfig::default();
    assert_eq!(config.get_view().get_epsilon_label(), "ε");
    assert_eq!(config.get_view().get_none_marker(), "-");
    assert!(!config.get_logger().get_enabled());
    assert_eq!(*config.get_logger().get_log_level(), LogLevel::Warn);
}

#[test]
fn test_config_partial_toml() {
    let config = PowersetConfig::from_toml_str(
        r#"
        [view]
        none_marker = "∅"

        [logger]
        enabled = true
        log_level = "Debug"
        "#,
    )
    .unwrap();

    assert_eq!(config.get_view().get_none_marker(), "∅");
    assert_eq!(config.get_view().get_epsilon_label(), "ε");
    assert!(*config.get_logger().get_enabled());
    assert!(!config.get_logger().get_log_file());
    assert_eq!(*config.get_logger().get_log_level(), LogLevel::Debug);
}

#[test]
fn test_config_rejects_unknown_keys() {
    assert!(PowersetConfig::from_toml_str("[view]\nnone = \"x\"").is_err());
}
