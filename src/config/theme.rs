use serde::{Deserialize, Serialize};

use crate::ui::window::WindowTheme;

/// ```yaml
/// theme:
///   tab_group:
///     focused_border:
///       border: rounded | plain | double | thick
///       border_style:
///         fg: name | hex | integer
///       margin: { top: 2 }
///     blurred_border: ...
///     navbar:
///       padding: { left: 1, right: 1 }
///     navbar_title_unselected:
///       fg: name | hex | integer
///       bg: name | hex | integer
///       modifier: reversed | bold
///       padding: { left: 2, right: 2 }
///     navbar_title_selected: ...
///   help:
///     fg: name | hex | integer
/// ```
#[derive(Clone, Default, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Theme {
    #[serde(flatten)]
    pub window: WindowTheme,
}
