pub const PATH_INDEX: &str = "/";
pub const PATH_GARDEN_TEMPS: &str = "/garden_temps";

// The index page forms submit to these literal, already-encoded paths.
pub const PATH_USER_TOGGLE_ON: &str = "/method=%22post%22?toggle_led=On";
pub const PATH_USER_TOGGLE_OFF: &str = "/method=%22post%22?toggle_led=Off";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Index,
    GardenTemps,
    UserToggleOn,
    UserToggleOff,
    NotFound,
}

impl Route {
    /// Exact string match, no normalisation.
    pub fn resolve(path: &str) -> Self {
        match path {
            PATH_INDEX => Self::Index,
            PATH_GARDEN_TEMPS => Self::GardenTemps,
            PATH_USER_TOGGLE_ON => Self::UserToggleOn,
            PATH_USER_TOGGLE_OFF => Self::UserToggleOff,
            _ => Self::NotFound,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::GardenTemps => "garden_temps",
            Self::UserToggleOn => "led_on",
            Self::UserToggleOff => "led_off",
            Self::NotFound => "not_found",
        }
    }
}
