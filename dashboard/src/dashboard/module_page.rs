// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;

use crate::{DEBUG_DASHBOARD_FOCUS, DashboardError, DashboardResult, Module, ModuleHandle,
            PageLink, Rect};

/// An ordered group of modules sharing one focus slot. Modules are appended and never
/// removed. Titles are unique within a page.
#[derive(Debug)]
pub struct ModulePage {
    name: String,
    modules: Vec<ModuleHandle>,
    selected: Option<usize>,
    link: Arc<PageLink>,
}

impl ModulePage {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modules: vec![],
            selected: None,
            link: Arc::new(PageLink::default()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str { &self.name }

    #[must_use]
    pub fn modules(&self) -> &[ModuleHandle] { &self.modules }

    #[must_use]
    pub fn len(&self) -> usize { self.modules.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.modules.is_empty() }

    pub(crate) fn link(&self) -> &Arc<PageLink> { &self.link }

    /// Append a module. The first module added to a page gets the focus.
    ///
    /// # Errors
    ///
    /// [`DashboardError::DuplicateTitle`] if the title is taken.
    pub fn add_module(&mut self, module: Module) -> DashboardResult<ModuleHandle> {
        if self.find_module(module.title()).is_some() {
            return Err(DashboardError::DuplicateTitle {
                title: module.title().to_string(),
                page: self.name.clone(),
            });
        }
        let handle = ModuleHandle::new(module, self.link.clone());
        self.modules.push(handle.clone());
        if self.modules.len() == 1 {
            self.set_selected(Some(0));
        } else {
            handle.repaint();
        }
        Ok(handle)
    }

    /// Removal is unsupported, so this never changes the page.
    pub fn remove_module(&mut self, title: &str) -> bool {
        tracing::warn!(message = "ModulePage::remove_module is not supported", page = %self.name, title);
        false
    }

    #[must_use]
    pub fn find_module(&self, title: &str) -> Option<&ModuleHandle> {
        self.modules.iter().find(|it| it.title() == title)
    }

    /// `None` means nothing is focused.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> { self.selected }

    #[must_use]
    pub fn selected_module(&self) -> Option<&ModuleHandle> {
        self.selected.and_then(|it| self.modules.get(it))
    }

    /// Focus moves `0, 1, .., k - 1, none, 0, ..`.
    pub fn select_next(&mut self) -> Option<usize> {
        let next = match self.selected {
            None if self.modules.is_empty() => None,
            None => Some(0),
            Some(index) if index + 1 < self.modules.len() => Some(index + 1),
            Some(_) => None,
        };
        self.set_selected(next);
        next
    }

    /// Reverse of [`ModulePage::select_next`].
    pub fn select_prev(&mut self) -> Option<usize> {
        let prev = match self.selected {
            None => self.modules.len().checked_sub(1),
            Some(0) => None,
            Some(index) => Some(index - 1),
        };
        self.set_selected(prev);
        prev
    }

    /// Focus the module titled `title`. `false` if there is none.
    pub fn select(&mut self, title: &str) -> bool {
        match self.modules.iter().position(|it| it.title() == title) {
            Some(index) => {
                self.set_selected(Some(index));
                true
            }
            None => false,
        }
    }

    /// Topmost (last added) module whose rect contains the point.
    #[must_use]
    pub fn module_index_at(&self, x: u16, y: u16) -> Option<usize> {
        self.modules
            .iter()
            .rposition(|it| it.read(|module| module.rect().contains(x, y)))
    }

    /// Moves the focus flag and repaints the two affected modules.
    pub(crate) fn set_selected(&mut self, selected: Option<usize>) {
        if self.selected == selected {
            return;
        }
        DEBUG_DASHBOARD_FOCUS.then(|| {
            tracing::debug!(message = "ModulePage::set_selected", page = %self.name, from = ?self.selected, to = ?selected);
        });
        let previous = std::mem::replace(&mut self.selected, selected);
        if let Some(handle) = previous.and_then(|it| self.modules.get(it)) {
            handle.set_focus(false);
        }
        if let Some(handle) = selected.and_then(|it| self.modules.get(it)) {
            handle.set_focus(true);
        }
    }

    /// Rendered frames of every module, plus where the cursor should rest.
    pub(crate) fn render_all(&self) -> (Vec<(Rect, Vec<String>)>, Option<(u16, u16)>) {
        let frames = self
            .modules
            .iter()
            .map(|handle| handle.read(|it| (it.rect(), it.render())))
            .collect();
        let cursor = self
            .selected_module()
            .and_then(|handle| handle.read(Module::cursor_position));
        (frames, cursor)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Button, TextLog};

    fn page_of(count: usize) -> ModulePage {
        let mut page = ModulePage::new("main");
        for it in 0..count {
            let rect = Rect::new(0, u16::try_from(it * 3).unwrap(), 10, 3);
            page.add_module(Module::new(rect, format!("m{it}"), Button::new("ok")))
                .unwrap();
        }
        page
    }

    fn selected_flags(page: &ModulePage) -> Vec<bool> {
        page.modules()
            .iter()
            .map(|it| it.read(Module::is_selected))
            .collect()
    }

    #[test]
    fn test_first_module_is_auto_selected() {
        let page = page_of(2);
        assert_eq!(page.selected_index(), Some(0));
        assert_eq!(selected_flags(&page), vec![true, false]);
    }

    #[test]
    fn test_select_next_cycles_through_none() {
        let mut page = page_of(3);
        let visited: Vec<Option<usize>> = (0..6).map(|_| page.select_next()).collect();
        assert_eq!(visited, vec![Some(1), Some(2), None, Some(0), Some(1), Some(2)]);
        assert_eq!(selected_flags(&page), vec![false, false, true]);
    }

    #[test]
    fn test_select_prev_cycles_through_none() {
        let mut page = page_of(2);
        let visited: Vec<Option<usize>> = (0..4).map(|_| page.select_prev()).collect();
        assert_eq!(visited, vec![None, Some(1), Some(0), None]);
        assert_eq!(selected_flags(&page), vec![false, false]);
    }

    #[test]
    fn test_empty_page_selection() {
        let mut page = ModulePage::new("empty");
        assert_eq!(page.select_next(), None);
        assert_eq!(page.select_prev(), None);
        assert!(page.selected_module().is_none());
    }

    #[test]
    fn test_duplicate_title_rejected() {
        let mut page = page_of(1);
        let result = page.add_module(Module::new(Rect::new(0, 0, 5, 5), "m0", TextLog::default()));
        assert!(matches!(result, Err(DashboardError::DuplicateTitle { .. })));
        assert_eq!(page.len(), 1);
    }

    #[test]
    fn test_remove_is_noop() {
        let mut page = page_of(2);
        page.select_next();
        assert!(!page.remove_module("m0"));
        assert_eq!(page.len(), 2);
        assert_eq!(page.selected_index(), Some(1));
    }

    #[test]
    fn test_select_by_title_and_find() {
        let mut page = page_of(3);
        assert!(page.select("m2"));
        assert!(!page.select("nope"));
        assert_eq!(page.selected_module().map(ModuleHandle::title), Some("m2"));
        assert!(page.find_module("m1").is_some());
    }

    #[test]
    fn test_module_index_at() {
        let page = page_of(2);
        assert_eq!(page.module_index_at(1, 4), Some(1));
        assert_eq!(page.module_index_at(20, 4), None);
    }
}
