/// Systemdata key holding the currently selected product icon.
pub const SYSTEMDATA_ICON_KEY: &str = "settings:icon";

/// Bootstrap icon names selectable from the settings page.
pub const ICONS: &[&str] = &[
    // a
    "airplane", "asterisk", "at",
    // b
    "backpack", "balloon", "bandaid", "bell", "bicycle", "book", "bookmark", "bookmark-plus",
    "bookmarks", "bookshelf", "brightness-alt-high", "brightness-alt-high-fill",
    "brightness-alt-low", "brightness-alt-low-fill", "brightness-high", "brightness-high-fill",
    "brightness-low", "brightness-low-fill", "broadcast", "broadcast-pin",
    // c
    "cassette", "chat-left", "chat-left-text", "chat-right", "chat-right-text", "chat-square",
    "chat-square-text", "clipboard", "cloud", "cloud-drizzle", "cloud-fog", "cloud-hail",
    "cloud-haze2", "cloud-lightning", "cloud-lightning-rain", "cloud-moon", "cloud-rain",
    "cloud-rain-heavy", "cloud-sleet", "cloud-snow", "cloud-sun", "clouds", "cloudy", "code",
    "collection", "command", "cookie", "cup", "cup-hot",
    // d
    "dash-circle", "database",
    // e
    "egg", "egg-fried", "envelope", "envelope-open", "envelope-paper", "eyeglasses",
    // f
    "feather", "feather2", "flower1", "flower2", "flower3",
    // h
    "hand-thumbs-down", "hand-thumbs-up", "headphones", "heart", "house", "highlighter",
    // j
    "journal",
    // l
    "lightbulb",
    // m
    "mailbox", "mailbox-flag", "megaphone", "mic", "minecart", "moon", "moon-stars",
    // n
    "nut",
    // o
    "outlet",
    // p
    "paperclip", "pen", "pencil",
];
