// ABOUTME: Centralized constants for the imgcat command-line front end
// ABOUTME: Contains sizing defaults, config locations, and environment variable names

/// Default sizing when the caller gives no height
pub mod sizing {
    /// Pixel rows assumed per terminal line when converting image height to rows
    pub const DEFAULT_PIXELS_PER_LINE: u32 = 24;

    /// Rows used when the image height cannot be read from its header
    pub const FALLBACK_ROWS: u32 = 10;

    /// Rows kept free below the image so the prompt does not scroll it away
    pub const TERMINAL_MARGIN_ROWS: u16 = 9;
}

/// Configuration file locations
pub mod paths {
    /// Directory name under the user config directory
    pub const CONFIG_DIR: &str = "imgcat";

    /// File name inside the config directory
    pub const CONFIG_FILE: &str = "config.toml";

    /// Project-local config file name
    pub const LOCAL_CONFIG_FILE: &str = "imgcat.toml";
}

/// Environment variables read by the CLI
pub mod env_vars {
    /// Force a protocol (iterm2, kitty) or disable output (none)
    pub const FORCE_PROTOCOL: &str = "IMGCAT_FORCE_PROTOCOL";

    pub const XDG_CONFIG_HOME: &str = "XDG_CONFIG_HOME";
}

/// Cursor control used to reserve space for images drawn through tmux
pub mod cursor {
    pub const HIDE: &[u8] = b"\x1b[?25l";
    pub const SHOW: &[u8] = b"\x1b[?25h";
}
