use crate::components::theme::Theme;
use log::LevelFilter;

#[derive(Debug, Default, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub theme: Theme,
    /// Initial score-tracking flag for the session.
    pub score_tracking: bool,
}

impl AppSettings {
    /// Read `BRACKETUI_LOG`, `BRACKETUI_THEME` and `BRACKETUI_SCORING`.
    pub fn load() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            full_screen: false,
            log_level: var("BRACKETUI_LOG").as_deref().and_then(parse_level),
            theme: var("BRACKETUI_THEME")
                .as_deref()
                .and_then(parse_theme)
                .unwrap_or_default(),
            score_tracking: var("BRACKETUI_SCORING")
                .as_deref()
                .map(parse_flag)
                .unwrap_or(false),
        }
    }
}

fn parse_level(raw: &str) -> Option<LevelFilter> {
    raw.trim().parse().ok()
}

fn parse_theme(raw: &str) -> Option<Theme> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "dark" => Some(Theme::Dark),
        "light" => Some(Theme::Light),
        _ => None,
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> AppSettings {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppSettings::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_env() {
        let s = settings(&[]);
        assert_eq!(s.log_level, None);
        assert_eq!(s.theme, Theme::Dark);
        assert!(!s.score_tracking);
        assert!(!s.full_screen);
    }

    #[test]
    fn reads_overrides() {
        let s = settings(&[
            ("BRACKETUI_LOG", "debug"),
            ("BRACKETUI_THEME", "Light"),
            ("BRACKETUI_SCORING", "true"),
        ]);
        assert_eq!(s.log_level, Some(LevelFilter::Debug));
        assert_eq!(s.theme, Theme::Light);
        assert!(s.score_tracking);
    }

    #[test]
    fn bad_values_fall_back() {
        let s = settings(&[
            ("BRACKETUI_LOG", "loud"),
            ("BRACKETUI_THEME", "neon"),
            ("BRACKETUI_SCORING", "maybe"),
        ]);
        assert_eq!(s.log_level, None);
        assert_eq!(s.theme, Theme::Dark);
        assert!(!s.score_tracking);
    }
}
