use std::sync::atomic::{AtomicBool, Ordering};

/// Remembers whether the intro animation has been shown since startup.
#[derive(Debug, Default)]
pub struct IntroGate {
    shown: AtomicBool,
}

impl IntroGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// True for the first caller only.
    pub fn take_first_show(&self) -> bool {
        !self.shown.swap(true, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intro_shown_once() {
        let gate = IntroGate::new();
        assert!(gate.take_first_show());
        assert!(!gate.take_first_show());
        assert!(!gate.take_first_show());
    }
}
