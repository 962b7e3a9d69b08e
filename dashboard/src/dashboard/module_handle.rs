// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::{Arc, OnceLock,
                atomic::{AtomicBool, Ordering}};

use tokio::sync::broadcast::{self, error::RecvError};
use tokio_util::sync::CancellationToken;

use crate::{CellStyle, CursorHome, DashboardResult, LockExt, Module, ModuleEvent, Screen,
            Severity, StdMutex, core::log::module_log_layer::ModuleSinkPause};

/// Shared by every handle of one page: where to paint, and whether the page is the
/// one on screen.
#[derive(Debug, Default)]
pub(crate) struct PageLink {
    screen: OnceLock<Screen>,
    is_active: AtomicBool,
}

impl PageLink {
    pub(crate) fn attach(&self, screen: Screen) { let _unused = self.screen.set(screen); }

    pub(crate) fn set_active(&self, is_active: bool) {
        self.is_active.store(is_active, Ordering::SeqCst);
    }

    pub(crate) fn is_active(&self) -> bool { self.is_active.load(Ordering::SeqCst) }

    pub(crate) fn screen(&self) -> Option<&Screen> { self.screen.get() }
}

#[derive(Debug)]
struct ModuleHandleInner {
    title: String,
    module: StdMutex<Module>,
    link: Arc<PageLink>,
}

/// Shared reference to a [`Module`] living in a page. Safe to clone and send to
/// background workers, eg: one that logs into a text log.
///
/// Every mutation goes through the module's own lock, and if it changed something
/// visible, the module is repainted before the lock is released. So a render never
/// sees a half appended line and two writers never interleave on screen.
#[derive(Debug, Clone)]
pub struct ModuleHandle {
    inner: Arc<ModuleHandleInner>,
}

impl PartialEq for ModuleHandle {
    fn eq(&self, other: &Self) -> bool { Arc::ptr_eq(&self.inner, &other.inner) }
}

impl ModuleHandle {
    pub(crate) fn new(module: Module, link: Arc<PageLink>) -> Self {
        Self {
            inner: Arc::new(ModuleHandleInner {
                title: module.title().to_string(),
                module: StdMutex::new(module),
                link,
            }),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str { &self.inner.title }

    /// Run `f` on the module. Repaints if `f` returns `true`.
    pub fn apply(&self, f: impl FnOnce(&mut Module) -> bool) -> bool {
        let _pause = ModuleSinkPause::new();
        let mut module = self.inner.module.lock_or_recover();
        let changed = f(&mut module);
        if changed {
            self.paint_locked(&module);
        }
        changed
    }

    /// Run `f` on the module without repainting.
    pub fn update<R>(&self, f: impl FnOnce(&mut Module) -> R) -> R {
        let _pause = ModuleSinkPause::new();
        f(&mut self.inner.module.lock_or_recover())
    }

    pub fn read<R>(&self, f: impl FnOnce(&Module) -> R) -> R {
        let _pause = ModuleSinkPause::new();
        f(&self.inner.module.lock_or_recover())
    }

    /// See [`Module::add_text`].
    pub fn add_text(&self, text: &str) -> bool { self.apply(|it| it.add_text(text)) }

    /// See [`Module::clear`].
    pub fn clear(&self, refresh: bool) -> bool { self.apply(|it| it.clear(refresh)) }

    pub fn scroll_up(&self, amount: usize) -> bool { self.apply(|it| it.scroll_up(amount)) }

    pub fn scroll_down(&self, amount: usize) -> bool { self.apply(|it| it.scroll_down(amount)) }

    pub fn scroll_to(&self, line: usize) -> bool { self.apply(|it| it.scroll_to(line)) }

    pub fn page_up(&self) -> bool { self.apply(Module::page_up) }

    pub fn page_down(&self) -> bool { self.apply(Module::page_down) }

    pub fn set_progress(&self, current: u64, max: u64) -> bool {
        self.apply(|it| it.set_progress(current, max))
    }

    pub fn increment_progress(&self, by: u64) -> bool { self.apply(|it| it.increment_progress(by)) }

    pub fn set_cell(&self, x: u16, y: u16, ch: char, style: CellStyle) -> bool {
        self.apply(|it| it.set_cell(x, y, ch, style))
    }

    pub fn clear_cell(&self, x: u16, y: u16) -> bool { self.apply(|it| it.clear_cell(x, y)) }

    pub fn show_toast(&self, message: &str, severity: Severity) -> bool {
        self.apply(|it| it.show_toast(message, severity))
    }

    pub fn set_toggle(&self, is_on: bool) -> bool { self.apply(|it| it.set_toggle(is_on)) }

    pub fn set_label_text(&self, text: &str) -> bool { self.apply(|it| it.set_label_text(text)) }

    pub fn set_list_rows(&self, header: Option<String>, rows: Vec<String>) -> bool {
        self.apply(|it| it.set_list_rows(header, rows))
    }

    /// See [`Module::select_tab`].
    ///
    /// # Errors
    ///
    /// [`crate::DashboardError::IndexOutOfRange`] if there is no such tab.
    pub fn select_tab(&self, index: usize) -> DashboardResult<bool> {
        let mut result = Ok(false);
        self.apply(|it| {
            result = it.select_tab(index);
            matches!(result, Ok(true))
        });
        result
    }

    /// Repaint unconditionally.
    pub fn repaint(&self) {
        let _pause = ModuleSinkPause::new();
        self.paint_locked(&self.inner.module.lock_or_recover());
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ModuleEvent> {
        self.read(Module::subscribe)
    }

    /// Wait for the next line committed in this module (a line input). Returns `None`
    /// if `cancel` fires first, or the module is gone.
    pub async fn read_line(&self, cancel: CancellationToken) -> Option<String> {
        let mut receiver = self.subscribe();
        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => return None,
                result = receiver.recv() => match result {
                    Ok(ModuleEvent::LineCommitted(line)) => return Some(line),
                    Ok(_) | Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => return None,
                },
            }
        }
    }

    /// Move the focus flag. The module that gains focus owns the cursor, the one that
    /// loses it hides the cursor until the next owner paints.
    pub(crate) fn set_focus(&self, selected: bool) {
        let _pause = ModuleSinkPause::new();
        let mut module = self.inner.module.lock_or_recover();
        module.set_selected(selected);
        let cursor_home = CursorHome::Set(if selected { module.cursor_position() } else { None });
        self.paint_with(&module, cursor_home);
    }

    /// Caller holds the module lock. Takes the screen lock after it.
    fn paint_locked(&self, module: &Module) {
        let cursor_home = if module.is_selected() {
            CursorHome::Set(module.cursor_position())
        } else {
            CursorHome::Keep
        };
        self.paint_with(module, cursor_home);
    }

    fn paint_with(&self, module: &Module, cursor_home: CursorHome) {
        let link = &self.inner.link;
        if !link.is_active() {
            return;
        }
        let Some(screen) = link.screen() else {
            return;
        };
        if let Err(error) = screen.paint(module.rect(), &module.render(), cursor_home) {
            tracing::error!(message = "ModuleHandle::paint failed", title = %self.title(), ?error);
        }
    }
}
