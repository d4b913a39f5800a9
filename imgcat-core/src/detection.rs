// ABOUTME: Boundary that gathers terminal and multiplexer signals from the environment
// ABOUTME: Produces an explicit TransportContext so the encoder and selector stay pure

use crate::constants::env_vars;
use crate::transport::TransportContext;
use std::env;
use std::io::IsTerminal;

impl TransportContext {
    /// Read the current process environment. Call once per image; the
    /// environment may differ between calls.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok(), std::io::stdout().is_terminal())
    }

    /// Build a context from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F, output_interactive: bool) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let tmux = lookup(env_vars::TMUX).unwrap_or_default();
        let term_program = lookup(env_vars::TERM_PROGRAM).unwrap_or_default();
        let term = lookup(env_vars::TERM).unwrap_or_default();

        let context = Self {
            multiplexer_active: detect_tmux(&tmux),
            terminal_family: determine_terminal_name(&term_program, &term),
            output_interactive,
        };

        log::debug!(
            "Transport context: terminal={}, multiplexer={}, interactive={}",
            context.terminal_family,
            context.multiplexer_active,
            context.output_interactive
        );
        context
    }
}

fn detect_tmux(tmux: &str) -> bool {
    // tmux sets TMUX to "<socket>,<pid>,<session>"; the socket path contains "tmux"
    tmux.contains("tmux")
}

fn determine_terminal_name(term_program: &str, term: &str) -> String {
    if !term_program.is_empty() {
        term_program.to_string()
    } else if !term.is_empty() {
        term.to_string()
    } else {
        "unknown".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_tmux_detection() {
        let ctx = TransportContext::from_vars(
            lookup(&[
                ("TMUX", "/tmp/tmux-1000/default,1234,0"),
                ("TERM_PROGRAM", "tmux"),
            ]),
            true,
        );
        assert!(ctx.multiplexer_active);
        assert_eq!(ctx.terminal_family, "tmux");
    }

    #[test]
    fn test_tmux_variable_without_tmux_socket() {
        let ctx = TransportContext::from_vars(lookup(&[("TMUX", "/tmp/other,1,0")]), true);
        assert!(!ctx.multiplexer_active);
    }

    #[test]
    fn test_terminal_family_fallbacks() {
        let ctx = TransportContext::from_vars(
            lookup(&[("TERM_PROGRAM", "iTerm.app"), ("TERM", "xterm-256color")]),
            true,
        );
        assert_eq!(ctx.terminal_family, "iTerm.app");

        let ctx = TransportContext::from_vars(lookup(&[("TERM", "xterm-256color")]), false);
        assert_eq!(ctx.terminal_family, "xterm-256color");
        assert!(!ctx.output_interactive);

        let ctx = TransportContext::from_vars(lookup(&[("TERM_PROGRAM", "")]), true);
        assert_eq!(ctx.terminal_family, "unknown");
    }

    #[test]
    #[serial]
    fn test_from_env_reads_fresh_values() {
        let original_tmux = env::var("TMUX").ok();
        let original_term_program = env::var("TERM_PROGRAM").ok();

        unsafe {
            env::set_var("TMUX", "/tmp/tmux-501/default,99,1");
            env::set_var("TERM_PROGRAM", "WezTerm");
        }
        let ctx = TransportContext::from_env();
        assert!(ctx.multiplexer_active);
        assert_eq!(ctx.terminal_family, "WezTerm");

        // A later call must observe the changed environment
        unsafe {
            env::remove_var("TMUX");
        }
        let ctx = TransportContext::from_env();
        assert!(!ctx.multiplexer_active);

        // Restore env
        unsafe {
            if let Some(val) = original_tmux {
                env::set_var("TMUX", val);
            } else {
                env::remove_var("TMUX");
            }
            if let Some(val) = original_term_program {
                env::set_var("TERM_PROGRAM", val);
            } else {
                env::remove_var("TERM_PROGRAM");
            }
        }
    }
}
