use ratatui::{
    style::Color,
    text::Text,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{
    event::{Effect, Event},
    logger,
};

use super::{
    key::KeyMap,
    layout::{join_horizontal, join_vertical},
    style::BoxStyle,
    Panel,
};

pub const NAVBAR_DIVIDER: &str = " • ";

/// Which items receive the events a tab group is updated with.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum UpdatePolicy {
    /// Every item sees every event, hidden or not. Hidden tabs stay live.
    #[default]
    Broadcast,
    /// Only the active item sees events.
    ActiveOnly,
}

/// ```yaml
/// tab_group:
///   focused_border:
///     margin: { top: 2 }
///   navbar:
///     padding: { left: 1, right: 1 }
///   navbar_title_selected:
///     fg: "#ffffff"
///     bg: 5
///     padding: { left: 2, right: 2 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TabGroupTheme {
    pub focused_border: BoxStyle,
    pub blurred_border: BoxStyle,
    pub navbar: BoxStyle,
    pub navbar_title_unselected: BoxStyle,
    pub navbar_title_selected: BoxStyle,
}

impl Default for TabGroupTheme {
    fn default() -> Self {
        Self {
            focused_border: BoxStyle::new().margin(2, 0, 0, 0),
            blurred_border: BoxStyle::new().margin(2, 0, 0, 0),
            navbar: BoxStyle::new().padding(0, 1, 0, 1),
            navbar_title_unselected: BoxStyle::new()
                .bg(Color::Rgb(0x37, 0x3b, 0x41))
                .fg(Color::Indexed(240))
                .padding(0, 2, 0, 2),
            navbar_title_selected: BoxStyle::new()
                .bg(Color::Indexed(5))
                .fg(Color::Rgb(0xff, 0xff, 0xff))
                .padding(0, 2, 0, 2),
        }
    }
}

impl TabGroupTheme {
    /// Rows of a tab group's height not given to the active panel's content:
    /// the border frame and the navbar.
    pub fn reserved_rows(&self) -> u16 {
        let title = self
            .navbar_title_selected
            .vertical_frame_size()
            .max(self.navbar_title_unselected.vertical_frame_size());

        self.focused_border
            .vertical_frame_size()
            .saturating_add(self.navbar.vertical_frame_size())
            .saturating_add(title)
            .saturating_add(1)
    }
}

/// A titled panel owned by a [`TabGroup`].
pub struct TabItem {
    title: String,
    panel: Box<dyn Panel>,
}

impl TabItem {
    pub fn new(title: impl Into<String>, panel: impl Panel + 'static) -> Self {
        Self {
            title: title.into(),
            panel: Box::new(panel),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn panel(&self) -> &dyn Panel {
        self.panel.as_ref()
    }

    pub fn panel_mut(&mut self) -> &mut dyn Panel {
        self.panel.as_mut()
    }
}

pub type TabGroupOption = Box<dyn FnOnce(&mut TabGroup)>;

pub fn with_key_map(key_map: KeyMap) -> TabGroupOption {
    Box::new(move |tg| tg.key_map = key_map)
}

pub fn with_theme(theme: TabGroupTheme) -> TabGroupOption {
    Box::new(move |tg| tg.theme = theme)
}

pub fn with_update_policy(policy: UpdatePolicy) -> TabGroupOption {
    Box::new(move |tg| tg.update_policy = policy)
}

#[derive(Default)]
pub struct TabGroupBuilder {
    key_map: KeyMap,
    theme: TabGroupTheme,
    update_policy: UpdatePolicy,
    items: Vec<TabItem>,
}

impl TabGroupBuilder {
    pub fn key_map(mut self, key_map: KeyMap) -> Self {
        self.key_map = key_map;
        self
    }

    pub fn theme(mut self, theme: TabGroupTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn update_policy(mut self, policy: UpdatePolicy) -> Self {
        self.update_policy = policy;
        self
    }

    pub fn item(mut self, title: impl Into<String>, panel: impl Panel + 'static) -> Self {
        self.items.push(TabItem::new(title, panel));
        self
    }

    pub fn items(mut self, items: impl IntoIterator<Item = TabItem>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn build(self) -> TabGroup {
        TabGroup {
            key_map: self.key_map,
            theme: self.theme,
            update_policy: self.update_policy,
            items: self.items,
            ..Default::default()
        }
    }
}

/// Tab container: a navbar of titles above the active item's view.
///
/// The active tab is identified by `current_index` alone. It is always a
/// valid index while the group has items. With no items every navigation
/// call is a no-op and only the empty navbar is rendered.
#[derive(Default)]
pub struct TabGroup {
    pub key_map: KeyMap,
    items: Vec<TabItem>,
    current_index: usize,
    width: u16,
    height: u16,
    focused: bool,
    theme: TabGroupTheme,
    update_policy: UpdatePolicy,
}

impl TabGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a default group and applies `options` in order.
    pub fn with_options(options: impl IntoIterator<Item = TabGroupOption>) -> Self {
        let mut tg = Self::default();

        for option in options {
            option(&mut tg);
        }

        logger!(
            debug,
            "tab_group: options applied (update_policy={})",
            tg.update_policy
        );

        tg
    }

    pub fn builder() -> TabGroupBuilder {
        TabGroupBuilder::default()
    }

    pub fn add_item(&mut self, item: TabItem) -> &mut Self {
        self.items.push(item);
        self
    }

    pub fn items(&self) -> &[TabItem] {
        &self.items
    }

    pub fn theme(&self) -> &TabGroupTheme {
        &self.theme
    }

    pub fn update_policy(&self) -> UpdatePolicy {
        self.update_policy
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }
}

// Lifecycle
impl TabGroup {
    /// Init effects of every item, in item order.
    pub fn init(&mut self) -> Vec<Effect> {
        self.items
            .iter_mut()
            .flat_map(|item| item.panel.init())
            .collect()
    }

    /// Applies tab navigation for matching keys, then forwards `ev` to the
    /// items selected by the update policy. The navigation key itself is
    /// forwarded as well.
    pub fn update(&mut self, ev: &Event) -> Vec<Effect> {
        if let Some(key) = ev.key() {
            if self.key_map.tab_next.matches(key) {
                self.next_tab();
            } else if self.key_map.tab_prev.matches(key) {
                self.prev_tab();
            }
        }

        self.update_items(ev)
    }

    fn update_items(&mut self, ev: &Event) -> Vec<Effect> {
        match self.update_policy {
            UpdatePolicy::Broadcast => self
                .items
                .iter_mut()
                .filter_map(|item| item.panel.update(ev))
                .collect(),
            UpdatePolicy::ActiveOnly => self
                .active_item_mut()
                .and_then(|item| item.panel.update(ev))
                .into_iter()
                .collect(),
        }
    }

    pub fn focus(&mut self) -> Option<Effect> {
        self.focused = true;
        None
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Every item gets the same size, so switching tabs never resizes.
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width.saturating_sub(self.theme.focused_border.horizontal_frame_size());
        self.height = height;

        self.theme.focused_border.set_width(self.width);
        self.theme.blurred_border.set_width(self.width);
        self.theme.navbar.set_width(self.width);

        for item in self.items.iter_mut() {
            item.panel.set_size(self.width, self.height);
        }
    }
}

// Tab
impl TabGroup {
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_active(&self, index: usize) -> bool {
        index < self.items.len() && index == self.current_index
    }

    pub fn active_item(&self) -> Option<&TabItem> {
        self.items.get(self.current_index)
    }

    pub fn active_item_mut(&mut self) -> Option<&mut TabItem> {
        self.items.get_mut(self.current_index)
    }

    /// Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.items.len() {
            self.activate(index);
        }
    }

    pub fn next_tab(&mut self) {
        if self.items.is_empty() {
            return;
        }

        self.activate((self.current_index + 1) % self.items.len());
    }

    pub fn prev_tab(&mut self) {
        if self.items.is_empty() {
            return;
        }

        self.activate((self.current_index + self.items.len() - 1) % self.items.len());
    }

    fn activate(&mut self, index: usize) {
        self.current_index = index;

        logger!(
            debug,
            "tab_group: activate tab index={} title={:?}",
            index,
            self.items[index].title
        );
    }
}

// Render
impl TabGroup {
    /// Titles joined by the divider, before the navbar style is applied.
    pub fn navbar_titles(&self) -> Text<'static> {
        let mut blocks = Vec::with_capacity(self.items.len() * 2);

        for (index, item) in self.items.iter().enumerate() {
            if 0 < index {
                blocks.push(Text::raw(NAVBAR_DIVIDER));
            }

            let style = if self.is_active(index) {
                &self.theme.navbar_title_selected
            } else {
                &self.theme.navbar_title_unselected
            };

            blocks.push(style.render(item.title.as_str()));
        }

        join_horizontal(blocks)
    }

    pub fn view(&self) -> Text<'static> {
        let navbar = self.theme.navbar.render(self.navbar_titles());

        let border = if self.focused {
            &self.theme.focused_border
        } else {
            &self.theme.blurred_border
        };

        match self.active_item() {
            Some(item) => border.render(join_vertical([navbar, item.panel.view()])),
            None => border.render(navbar),
        }
    }
}

impl Panel for TabGroup {
    fn init(&mut self) -> Vec<Effect> {
        TabGroup::init(self)
    }

    fn update(&mut self, ev: &Event) -> Option<Effect> {
        Effect::batch(TabGroup::update(self, ev))
    }

    fn set_size(&mut self, width: u16, height: u16) {
        TabGroup::set_size(self, width, height)
    }

    fn view(&self) -> Text<'static> {
        TabGroup::view(self)
    }
}
