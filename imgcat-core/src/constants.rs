// ABOUTME: Centralized constants for the imgcat core
// ABOUTME: Contains escape-sequence markers, protocol limits, and environment variable names

/// Raw control bytes and escape-sequence markers
pub mod escapes {
    /// Escape byte
    pub const ESC: u8 = 0x1b;

    /// Bell byte, the legacy OSC terminator
    pub const BEL: u8 = 0x07;

    /// Operating System Command introducer
    pub const OSC: &[u8] = b"\x1b]";

    /// Control Sequence Introducer
    pub const CSI: &[u8] = b"\x1b[";

    /// String Terminator
    pub const ST: &[u8] = b"\x1b\\";

    /// tmux DCS passthrough start marker
    pub const TMUX_WRAP_START: &[u8] = b"\x1bPtmux;";

    /// tmux DCS passthrough end marker
    pub const TMUX_WRAP_END: &[u8] = b"\x1b\\";
}

/// iTerm2 inline image protocol
pub mod iterm2 {
    /// Start of an inline file transfer, following the OSC introducer
    pub const FILE_PREFIX: &[u8] = b"1337;File=";
}

/// Kitty graphics protocol
pub mod kitty {
    /// Application Program Command introducer for graphics commands
    pub const APC_GRAPHICS: &[u8] = b"\x1b_G";

    /// Maximum base64 bytes per chunk (must be a multiple of 4)
    pub const CHUNK_SIZE: usize = 4096;

    /// Transmission format code for PNG data
    pub const FORMAT_PNG: u32 = 100;
}

/// Terminal families known to lack any inline image capability
pub mod terminals {
    pub const KNOWN_UNSUPPORTED: &[&str] = &["Apple_Terminal", "linux", "dumb"];

    /// Reason attached to an unsupported outcome
    pub const UNSUPPORTED_REASON: &str = "no inline image support";
}

/// Environment variables read by the detection boundary
pub mod env_vars {
    pub const TMUX: &str = "TMUX";
    pub const TERM_PROGRAM: &str = "TERM_PROGRAM";
    pub const TERM: &str = "TERM";
}
