// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tokio::sync::broadcast;

/// Slow subscribers that fall this far behind get
/// [`broadcast::error::RecvError::Lagged`] and skip ahead.
pub const MODULE_EVENT_CHANNEL_CAPACITY: usize = 1_000;

/// Something a user did to a module, published to its subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleEvent {
    /// Enter was pressed in a [`crate::LineInput`].
    LineCommitted(String),
    /// A [`crate::Button`] fired. `count` is the total number of presses so far.
    ButtonPressed { count: u64 },
    /// A [`crate::Toggle`] flipped to this value.
    Toggled(bool),
    TabSelected(usize),
    ListSelected(usize),
}

/// Per module event channel. Each module owns one, so there is no global multicast.
#[derive(Debug, Clone)]
pub struct ModuleEvents {
    sender: broadcast::Sender<ModuleEvent>,
}

impl Default for ModuleEvents {
    fn default() -> Self { Self::new() }
}

impl ModuleEvents {
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(MODULE_EVENT_CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Fire and forget. Nobody listening is not an error.
    pub fn emit(&self, event: ModuleEvent) {
        let _unused: Result<usize, _> = self.sender.send(event);
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ModuleEvent> { self.sender.subscribe() }
}
