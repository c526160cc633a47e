//! Display state with the validity-token protocol.
//!
//! Key ideas:
//! - Every command mints a fresh token, whether or not the text changed, so
//!   every command restarts the countdown to expiry.
//! - The outbound channel only sees a publish when the text actually changed.
//! - A scheduled expiry captures the token it was armed with; at fire time it
//!   may only clear the display if that token is still current. Cancellation
//!   of a superseded timer is therefore an optimization, never a correctness
//!   mechanism: a late fire is a harmless no-op.
//!
//! This module is pure and lock-free. The service layer wraps `DisplayCore`
//! in the single mutex that serializes the command path and the timer path.

/// Opaque generation token for a pending expiry.
///
/// Minted strictly increasing per `DisplayCore`; two tokens from the same
/// core are equal only if they come from the same mint, and a later mint
/// always compares greater than an earlier one. The ordering lets the
/// timer layer tell a stale arming request from a fresh one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct Token(u64);

/// Outcome of applying a command to the display state.
#[derive(Debug, Copy, Clone)]
pub struct Applied {
    /// True iff the text changed and was handed to the outbound channel.
    pub published: bool,
    /// The freshly minted token; arm the expiry timer with exactly this.
    pub token: Token,
}

/// The single source of truth: last published text plus current token.
///
/// Created idle at service start and alive for the process lifetime.
#[derive(Debug)]
pub struct DisplayCore {
    text: String,
    token: Token,
    next_token: u64,
}

impl DisplayCore {
    /// Start idle (empty text) with a fresh token.
    pub fn new() -> Self {
        Self {
            text: String::new(),
            token: Token(0),
            next_token: 1,
        }
    }

    /// Last text accepted for publishing; empty means idle.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The currently valid expiry token.
    pub fn token(&self) -> Token {
        self.token
    }

    pub fn is_idle(&self) -> bool {
        self.text.is_empty()
    }

    fn mint(&mut self) -> Token {
        let token = Token(self.next_token);
        self.next_token += 1;
        self.token = token;
        token
    }

    /// Apply a rendered command.
    ///
    /// Always mints a new token: a repeated identical command restarts the
    /// expiry countdown even though nothing new goes out on the wire.
    pub fn apply(&mut self, text: &str) -> Applied {
        let published = self.text != text;
        if published {
            self.text.clear();
            self.text.push_str(text);
        }
        Applied {
            published,
            token: self.mint(),
        }
    }

    /// Attempt to expire the generation identified by `token`.
    ///
    /// Returns true and resets to idle iff `token` is still current; a stale
    /// token means a newer command already superseded this expiry and the
    /// call is a no-op.
    pub fn expire(&mut self, token: Token) -> bool {
        if self.token != token {
            return false;
        }
        self.text.clear();
        self.mint();
        true
    }
}

impl Default for DisplayCore {
    fn default() -> Self {
        Self::new()
    }
}
