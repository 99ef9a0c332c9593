/// Visual mode of the UI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Interpret the stored value. Only `light` selects the light theme.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Indicator shown in the title bar
    pub fn symbol(&self) -> &'static str {
        match self {
            Theme::Dark => "☾",
            Theme::Light => "☀",
        }
    }
}
