use crate::cancel::CancelToken;

/// Keeps at most one search run live at a time.
///
/// Each [`begin`](Session::begin) cancels the token of the previous run
/// before handing out a fresh one, so a run still paused on an old token
/// stops publishing as soon as a new run starts.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<CancelToken>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the previous run (if any) and return the token for a new one.
    pub fn begin(&mut self) -> CancelToken {
        self.stop();
        let token = CancelToken::new();
        self.current = Some(token.clone());
        token
    }

    /// Cancel the current run. Harmless if it already finished.
    pub fn stop(&self) {
        if let Some(t) = &self.current {
            t.cancel();
        }
    }

    /// Token of the most recent run.
    pub fn current(&self) -> Option<&CancelToken> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_cancels_previous() {
        let mut s = Session::new();
        assert!(s.current().is_none());
        let first = s.begin();
        assert!(!first.is_cancelled());
        let second = s.begin();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert!(s.current().is_some_and(|t| !t.is_cancelled()));
    }

    #[test]
    fn stop_is_idempotent() {
        let mut s = Session::new();
        s.stop();
        let t = s.begin();
        s.stop();
        s.stop();
        assert!(t.is_cancelled());
    }
}
