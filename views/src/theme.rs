//! Colour themes: the built-in table, colour blending and the rules that turn
//! a saved theme preference into a complete theme.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

pub const DEFAULT_THEME: &str = "denim";
pub const CUSTOM_THEME_TYPE: &str = "custom";

const TYPE: &str = "type";
const CODE_THEME: &str = "codeTheme";

/// Built-in themes by config name. Every entry defines the same keys.
const BUILT_IN: &[(&str, &[(&str, &str)])] = &[
    (
        "denim",
        &[
            ("type", "Denim"),
            ("sidebarBg", "#1e325c"),
            ("sidebarText", "#ffffff"),
            ("sidebarUnreadText", "#ffffff"),
            ("sidebarTextHoverBg", "#28427b"),
            ("sidebarTextActiveBorder", "#5d89ea"),
            ("sidebarTextActiveColor", "#ffffff"),
            ("sidebarHeaderBg", "#192a4d"),
            ("sidebarHeaderTextColor", "#ffffff"),
            ("sidebarTeamBarBg", "#14213e"),
            ("onlineIndicator", "#3db887"),
            ("awayIndicator", "#ffbc1f"),
            ("dndIndicator", "#d24b4e"),
            ("mentionBg", "#ffffff"),
            ("mentionBj", "#ffffff"),
            ("mentionColor", "#1e325c"),
            ("centerChannelBg", "#ffffff"),
            ("centerChannelColor", "#3f4350"),
            ("newMessageSeparator", "#cc8f00"),
            ("linkColor", "#386fe5"),
            ("buttonBg", "#1c58d9"),
            ("buttonColor", "#ffffff"),
            ("errorTextColor", "#d24b4e"),
            ("mentionHighlightBg", "#ffd470"),
            ("mentionHighlightLink", "#1b1d22"),
            ("codeTheme", "github"),
        ],
    ),
    (
        "sapphire",
        &[
            ("type", "Sapphire"),
            ("sidebarBg", "#174ab5"),
            ("sidebarText", "#ffffff"),
            ("sidebarUnreadText", "#ffffff"),
            ("sidebarTextHoverBg", "#2a58ba"),
            ("sidebarTextActiveBorder", "#57b5f0"),
            ("sidebarTextActiveColor", "#ffffff"),
            ("sidebarHeaderBg", "#1542a2"),
            ("sidebarHeaderTextColor", "#ffffff"),
            ("sidebarTeamBarBg", "#13389a"),
            ("onlineIndicator", "#3db887"),
            ("awayIndicator", "#ffbc1f"),
            ("dndIndicator", "#d24b4e"),
            ("mentionBg", "#ffffff"),
            ("mentionBj", "#ffffff"),
            ("mentionColor", "#174ab5"),
            ("centerChannelBg", "#ffffff"),
            ("centerChannelColor", "#3f4350"),
            ("newMessageSeparator", "#15b7b7"),
            ("linkColor", "#1c58d9"),
            ("buttonBg", "#1c58d9"),
            ("buttonColor", "#ffffff"),
            ("errorTextColor", "#d24b4e"),
            ("mentionHighlightBg", "#7ff0f0"),
            ("mentionHighlightLink", "#0d6e6e"),
            ("codeTheme", "github"),
        ],
    ),
    (
        "quartz",
        &[
            ("type", "Quartz"),
            ("sidebarBg", "#f4f4f6"),
            ("sidebarText", "#090a0b"),
            ("sidebarUnreadText", "#2d3039"),
            ("sidebarTextHoverBg", "#ebebef"),
            ("sidebarTextActiveBorder", "#32a4ec"),
            ("sidebarTextActiveColor", "#2d3039"),
            ("sidebarHeaderBg", "#e8e9ed"),
            ("sidebarHeaderTextColor", "#2d3039"),
            ("sidebarTeamBarBg", "#dddfe4"),
            ("onlineIndicator", "#3db887"),
            ("awayIndicator", "#f5ab07"),
            ("dndIndicator", "#d24b4e"),
            ("mentionBg", "#1c58d9"),
            ("mentionBj", "#1c58d9"),
            ("mentionColor", "#ffffff"),
            ("centerChannelBg", "#ffffff"),
            ("centerChannelColor", "#3f4350"),
            ("newMessageSeparator", "#15b7b7"),
            ("linkColor", "#1c58d9"),
            ("buttonBg", "#1c58d9"),
            ("buttonColor", "#ffffff"),
            ("errorTextColor", "#d24b4e"),
            ("mentionHighlightBg", "#7ff0f0"),
            ("mentionHighlightLink", "#0d6e6e"),
            ("codeTheme", "github"),
        ],
    ),
    (
        "indigo",
        &[
            ("type", "Indigo"),
            ("sidebarBg", "#0f1a2e"),
            ("sidebarText", "#ffffff"),
            ("sidebarUnreadText", "#ffffff"),
            ("sidebarTextHoverBg", "#222c3f"),
            ("sidebarTextActiveBorder", "#1279ba"),
            ("sidebarTextActiveColor", "#ffffff"),
            ("sidebarHeaderBg", "#152231"),
            ("sidebarHeaderTextColor", "#dddfe4"),
            ("sidebarTeamBarBg", "#05080e"),
            ("onlineIndicator", "#3db887"),
            ("awayIndicator", "#f5ab00"),
            ("dndIndicator", "#d24b4e"),
            ("mentionBg", "#1c58d9"),
            ("mentionBj", "#1c58d9"),
            ("mentionColor", "#ffffff"),
            ("centerChannelBg", "#0f1a2e"),
            ("centerChannelColor", "#dddfe4"),
            ("newMessageSeparator", "#81a3ef"),
            ("linkColor", "#5d89ea"),
            ("buttonBg", "#1c58d9"),
            ("buttonColor", "#ffffff"),
            ("errorTextColor", "#d24b4e"),
            ("mentionHighlightBg", "#133a91"),
            ("mentionHighlightLink", "#a4f4f4"),
            ("codeTheme", "solarized-dark"),
        ],
    ),
    (
        "onyx",
        &[
            ("type", "Onyx"),
            ("sidebarBg", "#202228"),
            ("sidebarText", "#ffffff"),
            ("sidebarUnreadText", "#ffffff"),
            ("sidebarTextHoverBg", "#25262a"),
            ("sidebarTextActiveBorder", "#4a7ae8"),
            ("sidebarTextActiveColor", "#ffffff"),
            ("sidebarHeaderBg", "#24272d"),
            ("sidebarHeaderTextColor", "#dddfe4"),
            ("sidebarTeamBarBg", "#292c33"),
            ("onlineIndicator", "#3db887"),
            ("awayIndicator", "#f5ab00"),
            ("dndIndicator", "#d24b4e"),
            ("mentionBg", "#4b7ce7"),
            ("mentionBj", "#4b7ce7"),
            ("mentionColor", "#ffffff"),
            ("centerChannelBg", "#191b1f"),
            ("centerChannelColor", "#dddfe4"),
            ("newMessageSeparator", "#1adbdb"),
            ("linkColor", "#5d89ea"),
            ("buttonBg", "#386fe5"),
            ("buttonColor", "#ffffff"),
            ("errorTextColor", "#da6c6e"),
            ("mentionHighlightBg", "#0d6e6e"),
            ("mentionHighlightLink", "#a4f4f4"),
            ("codeTheme", "monokai"),
        ],
    ),
];

/// A theme as a map from key (`sidebarBg`, `codeTheme`, ...) to value.
/// Keys outside the built-in set are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Theme(pub BTreeMap<String, String>);

impl Theme {
    /// Parse a saved theme. Non-string values are dropped; a value that is
    /// not a JSON object gives `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(raw) {
            Ok(map) => Some(Theme(
                map.into_iter()
                    .filter_map(|(key, value)| match value {
                        serde_json::Value::String(s) => Some((key, s)),
                        _ => None,
                    })
                    .collect(),
            )),
            Err(error) => {
                debug!(%error, "ignoring unreadable theme preference");
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    fn has(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_empty())
    }

    fn from_table(entries: &[(&str, &str)]) -> Self {
        Theme(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

fn table(name: &str) -> Option<&'static [(&'static str, &'static str)]> {
    BUILT_IN
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, entries)| *entries)
}

fn default_table() -> &'static [(&'static str, &'static str)] {
    BUILT_IN[0].1
}

/// Built-in theme by config name (`denim`, `onyx`, ...).
pub fn built_in(name: &str) -> Option<Theme> {
    table(name).map(Theme::from_table)
}

/// Built-in theme by its `type` value (`Denim`, `Onyx`, ...).
pub fn built_in_by_type(theme_type: &str) -> Option<Theme> {
    BUILT_IN
        .iter()
        .map(|(_, entries)| *entries)
        .find(|entries| entries.iter().any(|&(k, v)| k == TYPE && v == theme_type))
        .map(Theme::from_table)
}

pub fn is_built_in(name: &str) -> bool {
    table(name).is_some()
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Rgba {
    red: f64,
    green: f64,
    blue: f64,
}

fn parse_color(raw: &str) -> Option<Rgba> {
    let raw = raw.trim();
    if let Some(hex) = raw.strip_prefix('#') {
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(f64::from);
        return match hex.len() {
            3 => {
                let digits: Vec<String> = hex.chars().map(|c| format!("{c}{c}")).collect();
                Some(Rgba {
                    red: channel(&digits[0])?,
                    green: channel(&digits[1])?,
                    blue: channel(&digits[2])?,
                })
            }
            6 => Some(Rgba {
                red: channel(hex.get(0..2)?)?,
                green: channel(hex.get(2..4)?)?,
                blue: channel(hex.get(4..6)?)?,
            }),
            _ => None,
        };
    }

    let inner = raw
        .strip_prefix("rgba(")
        .or_else(|| raw.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let parts: Vec<f64> = inner
        .split(',')
        .map(|p| p.trim().parse().ok())
        .collect::<Option<_>>()?;
    match parts[..] {
        [red, green, blue] | [red, green, blue, _] => Some(Rgba { red, green, blue }),
        _ => None,
    }
}

/// Mix `foreground` over `background` at `opacity`, as lowercase `#rrggbb`.
/// Each channel is floored. `None` when either colour is unreadable.
pub fn blend_colors(background: &str, foreground: &str, opacity: f64) -> Option<String> {
    let bg = parse_color(background)?;
    let fg = parse_color(foreground)?;
    let mix = |f: f64, b: f64| (f * opacity + b * (1.0 - opacity)).floor().clamp(0.0, 255.0) as u8;
    Some(format!(
        "#{:02x}{:02x}{:02x}",
        mix(fg.red, bg.red),
        mix(fg.green, bg.green),
        mix(fg.blue, bg.blue)
    ))
}

/// Complete a saved theme.
///
/// A theme whose `type` names a built-in starts from that built-in. Colours
/// the user saved are lowercased and win. `mentionBj` stands in for a
/// missing `mentionBg`; a missing `sidebarTeamBarBg` is the header colour
/// darkened by a fifth. Anything still missing comes from the default theme.
pub fn with_defaults(saved: &Theme) -> Theme {
    let defaults = default_table();
    let mut theme = match saved.get(TYPE) {
        Some(t) if t != CUSTOM_THEME_TYPE => built_in_by_type(t).unwrap_or_else(|| saved.clone()),
        _ => saved.clone(),
    };

    for &(key, _) in defaults {
        if key == TYPE || key == CODE_THEME {
            continue;
        }
        if let Some(value) = saved.get(key).filter(|v| !v.is_empty()) {
            theme.0.insert(key.to_string(), value.to_lowercase());
        }
    }

    if !saved.has("mentionBg")
        && let Some(old) = saved.get("mentionBj").filter(|v| !v.is_empty())
    {
        theme.0.insert("mentionBg".into(), old.to_lowercase());
    }

    if !saved.has("sidebarTeamBarBg")
        && let Some(header) = saved.get("sidebarHeaderBg")
        && let Some(blended) = blend_colors(header, "#000000", 0.2)
    {
        theme.0.insert("sidebarTeamBarBg".into(), blended);
    }

    for &(key, value) in defaults {
        if key != TYPE && !theme.has(key) {
            theme.0.insert(key.to_string(), value.to_string());
        }
    }
    theme
}

/// The theme to render: the saved preference when readable, else the named
/// built-in default.
pub fn resolve(saved: Option<&str>, default_name: &str) -> Theme {
    match saved.and_then(Theme::parse) {
        Some(theme) => with_defaults(&theme),
        None => built_in(default_name)
            .or_else(|| built_in(DEFAULT_THEME))
            .unwrap_or_default(),
    }
}
