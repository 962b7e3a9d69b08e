// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The [`ModuleManager`] owns the terminal device, the pages, and the input thread.
//!
//! Locks are always taken in this order, and released in reverse:
//! 1. manager state (pages, active page, key bindings),
//! 2. one module,
//! 3. the screen write section.
//!
//! User key handlers run with no lock held, so they may call back into the manager or
//! any module handle.

use std::{any::Any,
          fmt::{Debug, Formatter},
          ops::ControlFlow,
          panic::{AssertUnwindSafe, catch_unwind},
          sync::Arc,
          thread::JoinHandle};

use tokio::sync::broadcast;

use crate::{CursorHome, DEBUG_DASHBOARD_ROUTING, DashboardConfig, DashboardError,
            DashboardResult, GlobalAction, InputEvent, KeyPress, LockExt, Module,
            ModuleHandle, ModulePage, MouseButtons, MouseClick, Rect, RoutingContext, SGR_RESET,
            Screen, ScrollAction, Severity, StdMutex, TerminalDevice, route_key};

pub const INPUT_THREAD_NAME: &str = "dashboard-input";
pub const KEY_EVENT_CHANNEL_CAPACITY: usize = 1_000;

/// Called with the manager and the key that matched. An `Err` is shown in the focused
/// module, the session carries on.
pub type KeyHandler = Arc<dyn Fn(&ModuleManager, KeyPress) -> miette::Result<()> + Send + Sync>;

#[derive(Clone)]
struct KeyBinding {
    key: KeyPress,
    handler: KeyHandler,
}

impl Debug for KeyBinding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyBinding")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
struct ManagerState {
    pages: Vec<ModulePage>,
    active_page: usize,
    bindings: Vec<KeyBinding>,
    previous_buttons: MouseButtons,
}

impl ManagerState {
    fn active_page(&self) -> Option<&ModulePage> { self.pages.get(self.active_page) }

    fn active_page_mut(&mut self) -> Option<&mut ModulePage> { self.pages.get_mut(self.active_page) }

    fn focused_module(&self) -> Option<ModuleHandle> {
        self.active_page()?.selected_module().cloned()
    }

    /// The focused module if it scrolls, otherwise the first one on the page that does.
    fn scroll_target(&self) -> Option<ModuleHandle> {
        let page = self.active_page()?;
        page.selected_module()
            .filter(|it| it.read(Module::is_scrollable))
            .or_else(|| page.modules().iter().find(|it| it.read(Module::is_scrollable)))
            .cloned()
    }

    /// Where diagnostics go: the focused module if it takes text, otherwise the page's
    /// scroll target.
    fn report_target(&self) -> Option<ModuleHandle> {
        self.focused_module()
            .filter(|it| it.read(Module::is_scrollable))
            .or_else(|| self.scroll_target())
    }
}

#[derive(Debug)]
struct ManagerInner {
    config: DashboardConfig,
    screen: Screen,
    state: StdMutex<ManagerState>,
    key_events: broadcast::Sender<KeyPress>,
}

/// Safe to clone, all clones drive the same dashboard.
#[derive(Debug, Clone)]
pub struct ModuleManager {
    inner: Arc<ManagerInner>,
}

impl ModuleManager {
    /// Uses the backend picked by [`DashboardConfig::backend`].
    #[must_use]
    pub fn new(config: DashboardConfig) -> Self {
        let device = config.backend.create_device();
        Self::with_device(config, device)
    }

    #[must_use]
    pub fn with_device(config: DashboardConfig, device: Arc<dyn TerminalDevice>) -> Self {
        let (key_events, _) = broadcast::channel(KEY_EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(ManagerInner {
                config,
                screen: Screen::new(device),
                state: StdMutex::new(ManagerState::default()),
                key_events,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig { &self.inner.config }

    #[must_use]
    pub fn device(&self) -> &Arc<dyn TerminalDevice> { self.inner.screen.device() }

    /// Append a page and return its index. The first page becomes the active one.
    pub fn add_page(&self, page: ModulePage) -> usize {
        page.link().attach(self.inner.screen.clone());
        let index = {
            let mut state = self.inner.state.lock_or_recover();
            let index = state.pages.len();
            if index == 0 {
                page.link().set_active(true);
            }
            state.pages.push(page);
            index
        };
        if index == 0 {
            self.repaint_logging_errors();
        }
        index
    }

    /// Run `f` on the page at `index`, eg: to add modules once the page is live.
    ///
    /// # Errors
    ///
    /// [`DashboardError::NoSuchPage`] if there is no such page.
    pub fn with_page<R>(&self, index: usize, f: impl FnOnce(&mut ModulePage) -> R) -> DashboardResult<R> {
        let mut state = self.inner.state.lock_or_recover();
        let count = state.pages.len();
        state
            .pages
            .get_mut(index)
            .map(f)
            .ok_or(DashboardError::NoSuchPage { index, count })
    }

    #[must_use]
    pub fn page_count(&self) -> usize { self.inner.state.lock_or_recover().pages.len() }

    #[must_use]
    pub fn active_page_index(&self) -> usize { self.inner.state.lock_or_recover().active_page }

    /// First module titled `title`, searching pages in order.
    #[must_use]
    pub fn find_module(&self, title: &str) -> Option<ModuleHandle> {
        let state = self.inner.state.lock_or_recover();
        state
            .pages
            .iter()
            .find_map(|page| page.find_module(title).cloned())
    }

    /// Selected module of the active page.
    #[must_use]
    pub fn focused_module(&self) -> Option<ModuleHandle> {
        self.inner.state.lock_or_recover().focused_module()
    }

    /// Make page `index` the active one and repaint the whole screen.
    ///
    /// # Errors
    ///
    /// [`DashboardError::NoSuchPage`] if there is no such page, or the paint error.
    pub fn switch_page(&self, index: usize) -> DashboardResult<()> {
        {
            let mut state = self.inner.state.lock_or_recover();
            let count = state.pages.len();
            if index >= count {
                return Err(DashboardError::NoSuchPage { index, count });
            }
            if index == state.active_page {
                return Ok(());
            }
            if let Some(page) = state.active_page() {
                page.link().set_active(false);
            }
            state.active_page = index;
            state.pages[index].link().set_active(true);
        }
        self.repaint()
    }

    /// # Errors
    ///
    /// Returns the paint error.
    pub fn next_page(&self) -> DashboardResult<()> { self.step_page(1) }

    /// # Errors
    ///
    /// Returns the paint error.
    pub fn prev_page(&self) -> DashboardResult<()> {
        let count = self.page_count();
        self.step_page(count.saturating_sub(1))
    }

    fn step_page(&self, step: usize) -> DashboardResult<()> {
        let (active, count) = {
            let state = self.inner.state.lock_or_recover();
            (state.active_page, state.pages.len())
        };
        if count == 0 {
            return Ok(());
        }
        self.switch_page((active + step) % count)
    }

    /// Register a global key. Bindings are checked right after the quit key, before any
    /// built in routing. Later bindings for the same key never fire.
    pub fn bind_key(
        &self,
        key: KeyPress,
        handler: impl Fn(&ModuleManager, KeyPress) -> miette::Result<()> + Send + Sync + 'static,
    ) {
        self.inner.state.lock_or_recover().bindings.push(KeyBinding {
            key,
            handler: Arc::new(handler),
        });
    }

    /// Every key press read from the terminal, before routing.
    #[must_use]
    pub fn subscribe_keys(&self) -> broadcast::Receiver<KeyPress> { self.inner.key_events.subscribe() }

    /// Clear the screen and draw every module of the active page.
    ///
    /// # Errors
    ///
    /// Returns the flush error.
    pub fn repaint(&self) -> DashboardResult<()> {
        let state = self.inner.state.lock_or_recover();
        let Some(page) = state.active_page() else {
            return Ok(());
        };
        let (frames, cursor) = page.render_all();
        let frames: Vec<(Rect, &[String])> = frames
            .iter()
            .map(|(rect, rows)| (*rect, rows.as_slice()))
            .collect();
        self.inner
            .screen
            .paint_frames(true, &frames, CursorHome::Set(cursor))
    }

    fn repaint_logging_errors(&self) {
        if let Err(error) = self.repaint() {
            tracing::error!(message = "ModuleManager::repaint failed", ?error);
        }
    }

    /// Set up the terminal, paint the active page, and spawn the input thread. From
    /// here on the process ends through [`ModuleManager::quit`].
    ///
    /// # Errors
    ///
    /// The setup error (the terminal is restored first), or the thread spawn error.
    pub fn start(&self) -> miette::Result<JoinHandle<()>> {
        let device = self.device();
        if let Err(error) = device.setup() {
            let _unused: DashboardResult<()> = device.restore();
            return Err(error.into());
        }
        self.inner.screen.set_live(true);
        if let Some(title) = &self.inner.config.window_title {
            device.set_title(title);
        }
        self.repaint()?;

        let manager = self.clone();
        let join_handle = std::thread::Builder::new()
            .name(INPUT_THREAD_NAME.into())
            .spawn(move || manager.run_input_loop())
            .map_err(DashboardError::Io)?;
        Ok(join_handle)
    }

    /// Read and dispatch events until the quit key, end of input, or a fatal read
    /// error. Never returns. [`ModuleManager::start`] runs this on its own thread.
    pub fn run_input_loop(&self) -> ! {
        let device = self.device().clone();
        loop {
            match device.read_input() {
                Ok(Some(event)) => {
                    if self.handle_event_guarded(event).is_break() {
                        self.quit(None);
                    }
                }
                Ok(None) => {}
                Err(DashboardError::InputClosed) => self.quit(None),
                Err(error) => self.quit(Some(error.into())),
            }
        }
    }

    /// Restore the terminal and end the process, with status 1 if there's an `error`.
    pub fn quit(&self, error: Option<miette::Report>) -> ! {
        self.inner.screen.set_live(false);
        self.device().quit(&self.inner.config.exit_message, error)
    }

    /// [`ModuleManager::handle_event`], with a panic in a handler caught and reported
    /// like an error.
    pub fn handle_event_guarded(&self, event: InputEvent) -> ControlFlow<()> {
        match catch_unwind(AssertUnwindSafe(|| self.handle_event(event))) {
            Ok(flow) => flow,
            Err(payload) => {
                self.report_error(&format!("Panic: {}", panic_message(payload.as_ref())));
                ControlFlow::Continue(())
            }
        }
    }

    /// Dispatch one event. `Break` means the quit key was pressed. Handler errors are
    /// written into the focused module.
    pub fn handle_event(&self, event: InputEvent) -> ControlFlow<()> {
        match self.dispatch(event) {
            Ok(flow) => flow,
            Err(report) => {
                self.report_error(&format!("Error: {report}"));
                ControlFlow::Continue(())
            }
        }
    }

    fn dispatch(&self, event: InputEvent) -> miette::Result<ControlFlow<()>> {
        match event {
            InputEvent::Keyboard(key) => self.dispatch_key(key),
            InputEvent::Click(click) => {
                self.dispatch_click(click);
                Ok(ControlFlow::Continue(()))
            }
            InputEvent::MouseMove { .. } => Ok(ControlFlow::Continue(())),
            InputEvent::Resize { .. } => {
                self.repaint()?;
                Ok(ControlFlow::Continue(()))
            }
        }
    }

    fn dispatch_key(&self, key: KeyPress) -> miette::Result<ControlFlow<()>> {
        let _unused = self.inner.key_events.send(key);

        let (action, focused, binding) = {
            let state = self.inner.state.lock_or_recover();
            let focused = state.focused_module();
            let keys: Vec<KeyPress> = state.bindings.iter().map(|it| it.key).collect();
            let context = RoutingContext {
                quit_key: self.inner.config.quit_key,
                bindings: &keys,
                focused_is_line_input: focused
                    .as_ref()
                    .is_some_and(|it| it.read(Module::is_line_input)),
            };
            let action = route_key(key, context);
            let binding = match action {
                GlobalAction::UserBinding(index) => state.bindings.get(index).cloned(),
                _ => None,
            };
            (action, focused, binding)
        };

        DEBUG_DASHBOARD_ROUTING.then(|| {
            tracing::debug!(message = "ModuleManager::dispatch_key", key = %key, ?action);
        });

        match action {
            GlobalAction::Quit => return Ok(ControlFlow::Break(())),
            GlobalAction::UserBinding(_) => {
                if let Some(binding) = binding {
                    (binding.handler)(self, key)?;
                }
            }
            GlobalAction::Scroll(scroll) => {
                let target = self.inner.state.lock_or_recover().scroll_target();
                if let Some(target) = target {
                    target.apply(|it| match scroll {
                        ScrollAction::ToTop => it.scroll_to_top(),
                        ScrollAction::ToBottom => it.scroll_to_bottom(),
                        ScrollAction::PageUp => it.page_up(),
                        ScrollAction::PageDown => it.page_down(),
                        ScrollAction::Lines(delta) => it.scroll_by(delta),
                    });
                }
            }
            GlobalAction::HistoryBack => {
                if let Some(focused) = focused {
                    focused.apply(Module::history_back);
                }
            }
            GlobalAction::HistoryForward => {
                if let Some(focused) = focused {
                    focused.apply(Module::history_forward);
                }
            }
            GlobalAction::NextPage => self.next_page()?,
            GlobalAction::PrevPage => self.prev_page()?,
            GlobalAction::FocusNext => {
                if let Some(page) = self.inner.state.lock_or_recover().active_page_mut() {
                    page.select_next();
                }
            }
            GlobalAction::FocusPrev => {
                if let Some(page) = self.inner.state.lock_or_recover().active_page_mut() {
                    page.select_prev();
                }
            }
            GlobalAction::Commit { keep_scroll } => {
                if let Some(focused) = focused {
                    self.commit(&focused, keep_scroll);
                }
            }
            GlobalAction::Backspace => {
                if let Some(focused) = focused {
                    focused.apply(Module::backspace);
                }
            }
            GlobalAction::Paste => {
                if let Some(focused) = focused {
                    let text = self.device().get_clipboard();
                    focused.apply(|it| it.paste(&text));
                }
            }
            GlobalAction::Forward => {
                if let Some(focused) = focused {
                    focused.apply(|it| it.handle_key(key).needs_render());
                }
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Commit the focused line input. Unless `keep_scroll`, the page's scroll target
    /// jumps back to its live edge so the response to the line is visible.
    fn commit(&self, focused: &ModuleHandle, keep_scroll: bool) {
        let mut committed = None;
        focused.apply(|it| {
            committed = it.commit_line();
            committed.is_some()
        });
        DEBUG_DASHBOARD_ROUTING.then(|| {
            tracing::debug!(message = "ModuleManager::commit", title = %focused.title(), ?committed);
        });
        if keep_scroll || committed.is_none() {
            return;
        }
        let target = self.inner.state.lock_or_recover().scroll_target();
        if let Some(target) = target.filter(|it| it != focused) {
            target.apply(Module::scroll_to_bottom);
        }
    }

    /// Only a release is a click. It focuses the module under the pointer and is then
    /// handed to it.
    fn dispatch_click(&self, click: MouseClick) {
        let target = {
            let mut state = self.inner.state.lock_or_recover();
            let previous = std::mem::replace(&mut state.previous_buttons, click.buttons);
            if !click.is_release_of(previous) {
                return;
            }
            let Some(page) = state.active_page_mut() else {
                return;
            };
            let Some(index) = page.module_index_at(click.x, click.y) else {
                return;
            };
            page.set_selected(Some(index));
            page.modules().get(index).cloned().map(|it| (it, previous))
        };
        if let Some((handle, previous)) = target {
            handle.apply(|it| it.handle_click(click, previous).needs_render());
        }
    }

    /// Write a diagnostic line into the focused module (or the page's log).
    fn report_error(&self, message: &str) {
        tracing::error!(message = "ModuleManager: handler failed", error = %message);
        let target = self.inner.state.lock_or_recover().report_target();
        if let Some(target) = target {
            let style = Severity::Error.style();
            target.add_text(&format!("{style}{message}{SGR_RESET}"));
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Button, LineInput, MockTerminalDevice, ModifierKeysMask, ModuleEvent,
                RingBuffer, SpecialKey, TextLog, strip_control_sequences};

    fn manager() -> (ModuleManager, Arc<MockTerminalDevice>) {
        let device = Arc::new(MockTerminalDevice::new(vec![]));
        let manager = ModuleManager::with_device(DashboardConfig::default(), device.clone());
        (manager, device)
    }

    fn keys(text: &str) -> impl Iterator<Item = InputEvent> + '_ {
        text.chars().map(|it| InputEvent::Keyboard(KeyPress::char(it)))
    }

    fn enter() -> InputEvent { InputEvent::Keyboard(KeyPress::special(SpecialKey::Enter)) }

    fn click(buttons: MouseButtons, x: u16, y: u16) -> InputEvent {
        InputEvent::Click(MouseClick {
            buttons,
            x,
            y,
            mask: ModifierKeysMask::new(),
        })
    }

    /// Log on top, line input below.
    fn console_page(manager: &ModuleManager) -> (ModuleHandle, ModuleHandle) {
        let mut page = ModulePage::new("console");
        let log = page
            .add_module(Module::new(Rect::new(0, 0, 20, 5), "log", TextLog::new(100)))
            .unwrap();
        let input = page
            .add_module(Module::new(Rect::new(0, 5, 20, 3), "cmd", LineInput::new("> ", 10)))
            .unwrap();
        page.select("cmd");
        manager.add_page(page);
        (log, input)
    }

    #[test]
    fn test_type_hello_and_commit() {
        let (manager, _device) = manager();
        let mut page = ModulePage::new("main");
        let input = page
            .add_module(Module::new(Rect::new(0, 0, 20, 3), "cmd", LineInput::default()))
            .unwrap();
        manager.add_page(page);
        let mut events = input.subscribe();

        for event in keys("hello") {
            assert!(manager.handle_event(event).is_continue());
        }
        assert!(manager.handle_event(enter()).is_continue());

        assert_eq!(events.try_recv().unwrap(), ModuleEvent::LineCommitted("hello".into()));
        input.read(|module| {
            let line_input = module.line_input().unwrap();
            assert!(line_input.is_empty());
            assert_eq!(line_input.history().get(0).map(String::as_str), Some("hello"));
        });
    }

    #[test]
    fn test_quit_key_breaks() {
        let (manager, _device) = manager();
        let flow = manager.handle_event(InputEvent::Keyboard(KeyPress::ctrl('c')));
        assert!(flow.is_break());
    }

    #[test]
    fn test_tab_cycles_focus() {
        let (manager, _device) = manager();
        let (log, input) = console_page(&manager);
        let tab = InputEvent::Keyboard(KeyPress::special(SpecialKey::Tab));

        manager.handle_event(tab.clone());
        assert_eq!(manager.focused_module(), None);
        manager.handle_event(tab.clone());
        assert_eq!(manager.focused_module(), Some(log.clone()));
        manager.handle_event(tab);
        assert_eq!(manager.focused_module(), Some(input));
        assert!(!log.read(Module::is_selected));
    }

    #[test]
    fn test_page_switching() {
        let (manager, device) = manager();
        console_page(&manager);
        let mut second = ModulePage::new("second");
        second
            .add_module(Module::new(Rect::new(0, 0, 20, 3), "status", TextLog::new(10)))
            .unwrap();
        assert_eq!(manager.add_page(second), 1);
        let status = manager.find_module("status").unwrap();

        status.add_text("offscreen");
        assert_eq!(device.stdout_mock.get_copy_of_buffer_as_string(), "");

        manager.next_page().unwrap();
        assert_eq!(manager.active_page_index(), 1);
        manager.next_page().unwrap();
        assert_eq!(manager.active_page_index(), 0);
        manager.prev_page().unwrap();
        assert_eq!(manager.active_page_index(), 1);

        assert!(matches!(
            manager.switch_page(7),
            Err(DashboardError::NoSuchPage { index: 7, count: 2 })
        ));
    }

    #[test]
    fn test_page_switch_repaints_when_live() {
        let (manager, device) = manager();
        console_page(&manager);
        let mut second = ModulePage::new("second");
        second
            .add_module(Module::new(Rect::new(0, 0, 20, 3), "status", TextLog::new(10)))
            .unwrap();
        manager.add_page(second);
        manager.find_module("status").unwrap().add_text("offscreen");
        manager.inner.screen.set_live(true);

        let alt_right = KeyPress::with(
            crate::Key::SpecialKey(SpecialKey::Right),
            ModifierKeysMask::new().with_alt(),
        );
        manager.handle_event(InputEvent::Keyboard(alt_right));
        let output = device.stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
        assert!(output.contains("offscreen"));
    }

    #[test]
    fn test_click_release_focuses_and_presses() {
        let (manager, _device) = manager();
        let (_log, _input) = console_page(&manager);
        let button = manager
            .with_page(0, |page| {
                page.add_module(Module::new(Rect::new(0, 8, 10, 3), "go", Button::new("go")))
            })
            .unwrap()
            .unwrap();

        manager.handle_event(click(MouseButtons::LEFT, 2, 9));
        assert!(!button.read(Module::is_selected));
        manager.handle_event(click(MouseButtons::NONE, 2, 9));
        assert!(button.read(Module::is_selected));
        let count = button.read(|it| match it.kind() {
            crate::ModuleKind::Button(button) => button.press_count(),
            _ => 0,
        });
        assert_eq!(count, 1);
    }

    #[test]
    fn test_user_binding_and_error_report() {
        let (manager, _device) = manager();
        let (log, _input) = console_page(&manager);
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        manager.bind_key(KeyPress::special(SpecialKey::Insert), move |_, _| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            Err(miette::miette!("nope"))
        });

        let flow = manager.handle_event(InputEvent::Keyboard(KeyPress::special(SpecialKey::Insert)));
        assert!(flow.is_continue());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        // Focused module is the line input, so the report lands in the log.
        let rendered = log.read(Module::render).join("\n");
        assert!(strip_control_sequences(&rendered).contains("Error: nope"));
    }

    #[test]
    fn test_panicking_handler_is_reported() {
        let (manager, _device) = manager();
        let (log, _input) = console_page(&manager);
        manager.bind_key(KeyPress::special(SpecialKey::Insert), |_, _| panic!("boom"));

        let flow =
            manager.handle_event_guarded(InputEvent::Keyboard(KeyPress::special(SpecialKey::Insert)));
        assert!(flow.is_continue());
        let rendered = log.read(Module::render).join("\n");
        assert!(strip_control_sequences(&rendered).contains("Panic: boom"));
    }

    #[test]
    fn test_paste_and_backspace() {
        let device = Arc::new(MockTerminalDevice::new(vec![]).with_clipboard("abc"));
        let manager = ModuleManager::with_device(DashboardConfig::default(), device);
        let (_log, input) = console_page(&manager);

        manager.handle_event(InputEvent::Keyboard(KeyPress::ctrl('v')));
        manager.handle_event(InputEvent::Keyboard(KeyPress::special(SpecialKey::Backspace)));
        assert_eq!(input.read(|it| it.line_input().unwrap().text()), "ab");
    }

    #[test]
    fn test_commit_returns_log_to_live_edge() {
        let (manager, _device) = manager();
        let (log, _input) = console_page(&manager);
        log.add_text("1\n2\n3\n4\n5\n6");
        log.scroll_up(2);

        for event in keys("x") {
            manager.handle_event(event);
        }
        manager.handle_event(enter());
        assert_eq!(log.read(Module::scroll_offset), 0);

        log.scroll_up(2);
        let alt_enter = KeyPress::with(
            crate::Key::SpecialKey(SpecialKey::Enter),
            ModifierKeysMask::new().with_alt(),
        );
        manager.handle_event(InputEvent::Keyboard(alt_enter));
        assert_eq!(log.read(Module::scroll_offset), 2);
    }

    #[test]
    fn test_history_keys() {
        let (manager, _device) = manager();
        let (_log, input) = console_page(&manager);
        for line in ["one", "two"] {
            keys(line).for_each(|it| {
                manager.handle_event(it);
            });
            manager.handle_event(enter());
        }
        let up = InputEvent::Keyboard(KeyPress::special(SpecialKey::Up));
        manager.handle_event(up.clone());
        manager.handle_event(up);
        assert_eq!(input.read(|it| it.line_input().unwrap().text()), "one");
    }

    #[test]
    fn test_key_events_broadcast() {
        let (manager, _device) = manager();
        let mut keys_rx = manager.subscribe_keys();
        manager.handle_event(InputEvent::Keyboard(KeyPress::char('z')));
        assert_eq!(keys_rx.try_recv().unwrap(), KeyPress::char('z'));
    }

    #[test]
    fn test_start_sets_up_paints_and_quits_on_end_of_input() {
        let device = Arc::new(MockTerminalDevice::new(vec![]));
        let config = DashboardConfig::default().with_window_title("ops");
        let manager = ModuleManager::with_device(config, device.clone());
        console_page(&manager);

        let join_handle = manager.start().unwrap();
        // Mock quit panics instead of exiting the process.
        assert!(join_handle.join().is_err());

        assert_eq!(device.setup_count(), 1);
        assert_eq!(device.restore_count(), 1);
        assert_eq!(device.titles(), vec!["ops".to_string()]);
        assert!(
            device
                .stdout_mock
                .get_copy_of_buffer_as_string_strip_ansi()
                .contains(" cmd ")
        );
        // Cursor rests after the prompt.
        assert_eq!(device.last_cursor(), Some((3, 6)));
    }
}
