//! Background theme selection.

use serde::Serialize;

// ---

/// Exactly one background is active for a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Night,
    Stormy,
    Rainy,
    Snowy,
    Misty,
    Sunny,
    Cloudy,
    Default,
}

impl Theme {
    // ---
    /// Pick the theme for a provider condition code. Night always wins.
    pub fn select(condition_code: u16, night: bool) -> Self {
        // ---
        if night {
            return Theme::Night;
        }

        match condition_code {
            200..=299 => Theme::Stormy,
            300..=599 => Theme::Rainy,
            600..=699 => Theme::Snowy,
            700..=799 => Theme::Misty,
            800 => Theme::Sunny,
            801..=u16::MAX => Theme::Cloudy,
            _ => Theme::Default,
        }
    }

    /// CSS class applied to the app container.
    pub fn css_class(self) -> &'static str {
        match self {
            Theme::Night => "bg-night",
            Theme::Stormy => "bg-stormy",
            Theme::Rainy => "bg-rainy",
            Theme::Snowy => "bg-snowy",
            Theme::Misty => "bg-misty",
            Theme::Sunny => "bg-sunny",
            Theme::Cloudy => "bg-cloudy",
            Theme::Default => "bg-default",
        }
    }
}
