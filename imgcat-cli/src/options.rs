// ABOUTME: Resolves effective render options from flags, config file, and environment override
// ABOUTME: Precedence is command-line flag, then IMGCAT_FORCE_PROTOCOL, then config, then defaults

use crate::cli::Cli;
use crate::config::{Config, ForcedProtocol};
use crate::constants::sizing;
use imgcat_core::{Dimension, Protocol, Terminator, TransportContext, TransportSelector};

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub protocol: Protocol,
    pub terminator: Terminator,
    pub width: Dimension,
    /// `None` means derive a height from the image
    pub height: Option<Dimension>,
    pub preserve_aspect_ratio: bool,
    pub pixels_per_line: u32,
    pub force: bool,
    /// Treat every terminal as unsupported (IMGCAT_FORCE_PROTOCOL=none)
    pub disabled: bool,
    pub unsupported_terminals: Vec<String>,
    pub dry_run: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            protocol: Protocol::default(),
            terminator: Terminator::default(),
            width: Dimension::Auto,
            height: None,
            preserve_aspect_ratio: true,
            pixels_per_line: sizing::DEFAULT_PIXELS_PER_LINE,
            force: false,
            disabled: false,
            unsupported_terminals: Vec::new(),
            dry_run: false,
        }
    }
}

impl RenderOptions {
    pub fn resolve(cli: &Cli, config: &Config, forced: Option<ForcedProtocol>) -> Self {
        let forced_protocol = match forced {
            Some(ForcedProtocol::Use(protocol)) => Some(protocol),
            _ => None,
        };

        let protocol = cli
            .protocol
            .or(forced_protocol)
            .or_else(|| config.protocol())
            .unwrap_or_default();

        let terminator = if cli.bel || config.use_bel.unwrap_or(false) {
            Terminator::Bel
        } else {
            Terminator::St
        };

        Self {
            protocol,
            terminator,
            width: cli.width.unwrap_or_default(),
            height: cli.height,
            preserve_aspect_ratio: !cli.no_preserve_aspect_ratio,
            pixels_per_line: cli
                .pixels_per_line
                .or(config.pixels_per_line)
                .unwrap_or(sizing::DEFAULT_PIXELS_PER_LINE),
            force: cli.force,
            disabled: forced == Some(ForcedProtocol::Disabled),
            unsupported_terminals: config.unsupported_terminals.clone().unwrap_or_default(),
            dry_run: cli.dry_run,
        }
    }

    /// Selector for one invocation against the given context
    pub fn selector(&self, context: &TransportContext) -> TransportSelector {
        let mut selector = TransportSelector::new()
            .with_unsupported_list(self.unsupported_terminals.iter().cloned())
            .force(self.force);
        if self.disabled {
            selector = selector.with_unsupported(context.terminal_family.clone());
        }
        selector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["imgcat"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let options = RenderOptions::resolve(&cli(&["a.png"]), &Config::default(), None);
        assert_eq!(options, RenderOptions::default());
    }

    #[test]
    fn test_flag_beats_env_beats_config() {
        let config = Config {
            protocol: Some("iterm2".to_string()),
            ..Default::default()
        };
        let forced = Some(ForcedProtocol::Use(Protocol::Kitty));

        let options = RenderOptions::resolve(&cli(&["a.png"]), &config, forced);
        assert_eq!(options.protocol, Protocol::Kitty);

        let options =
            RenderOptions::resolve(&cli(&["--protocol", "iterm2", "a.png"]), &config, forced);
        assert_eq!(options.protocol, Protocol::ITerm2);

        let config = Config {
            protocol: Some("kitty".to_string()),
            ..Default::default()
        };
        let options = RenderOptions::resolve(&cli(&["a.png"]), &config, None);
        assert_eq!(options.protocol, Protocol::Kitty);
    }

    #[test]
    fn test_config_values_apply() {
        let config = Config {
            pixels_per_line: Some(16),
            use_bel: Some(true),
            unsupported_terminals: Some(vec!["vt100".to_string()]),
            ..Default::default()
        };
        let options = RenderOptions::resolve(&cli(&["a.png"]), &config, None);
        assert_eq!(options.pixels_per_line, 16);
        assert_eq!(options.terminator, Terminator::Bel);
        assert_eq!(options.unsupported_terminals, vec!["vt100".to_string()]);

        let options =
            RenderOptions::resolve(&cli(&["--pixels-per-line", "30", "a.png"]), &config, None);
        assert_eq!(options.pixels_per_line, 30);
    }

    #[test]
    fn test_disabled_marks_current_terminal_unsupported() {
        let options = RenderOptions::resolve(
            &cli(&["a.png"]),
            &Config::default(),
            Some(ForcedProtocol::Disabled),
        );
        assert!(options.disabled);

        let context = TransportContext::new("iTerm.app");
        assert!(options.selector(&context).is_unsupported("iTerm.app"));
    }

    #[test]
    fn test_configured_unsupported_terminals() {
        let options = RenderOptions {
            unsupported_terminals: vec!["unsupported-emulator-x".to_string()],
            ..Default::default()
        };
        let selector = options.selector(&TransportContext::new("anything"));
        assert!(selector.is_unsupported("unsupported-emulator-x"));
        assert!(selector.is_unsupported("Apple_Terminal"));
        assert!(!selector.is_unsupported("anything"));
    }
}
