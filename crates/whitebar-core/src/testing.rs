//! Recording test doubles for the shell and the bar window.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::shell::{CallbackId, NewRequest, PositionRequest, RemoveRequest, Shell};
use crate::{Rect, Surface, WindowHandle, WindowResult};

/// One request received by [`MockShell`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    New(NewRequest),
    Query(PositionRequest),
    Set(PositionRequest),
    Remove(RemoveRequest),
}

#[derive(Default)]
struct State {
    live: HashSet<WindowHandle>,
    calls: Vec<Call>,
    shift: (i32, i32),
    refuse_new: bool,
    fail_set: bool,
    fail_remove: bool,
}

/// An in-memory shell registry. Clones share state, so a test can keep
/// one handle while the strategy under test owns another.
#[derive(Clone, Default)]
pub struct MockShell(Rc<RefCell<State>>);

impl MockShell {
    pub const CALLBACK: u32 = 0xC0DE;

    pub fn new() -> Self {
        Self::default()
    }

    /// A shell that refuses every new registration.
    pub fn refusing() -> Self {
        let shell = Self::new();
        shell.0.borrow_mut().refuse_new = true;
        shell
    }

    /// A shell that moves every queried rectangle by `(dx, dy)`.
    pub fn shifting(dx: i32, dy: i32) -> Self {
        let shell = Self::new();
        shell.0.borrow_mut().shift = (dx, dy);
        shell
    }

    /// A shell whose commit step always fails.
    pub fn failing_set() -> Self {
        let shell = Self::new();
        shell.0.borrow_mut().fail_set = true;
        shell
    }

    /// A shell whose remove step always fails.
    pub fn failing_remove() -> Self {
        let shell = Self::new();
        shell.0.borrow_mut().fail_remove = true;
        shell
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().calls.clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.0.borrow().calls.iter().filter(|&c| pred(c)).count()
    }

    pub fn is_live(&self, handle: WindowHandle) -> bool {
        self.0.borrow().live.contains(&handle)
    }

    pub fn live_handles(&self) -> HashSet<WindowHandle> {
        self.0.borrow().live.clone()
    }
}

impl Shell for MockShell {
    fn new_bar(&mut self, request: &NewRequest) -> WindowResult<CallbackId> {
        let mut s = self.0.borrow_mut();
        s.calls.push(Call::New(*request));
        if s.refuse_new || !s.live.insert(request.handle) {
            return Err("registration refused".into());
        }
        Ok(CallbackId(Self::CALLBACK))
    }

    fn query_pos(&mut self, request: &PositionRequest) -> WindowResult<Rect> {
        let mut s = self.0.borrow_mut();
        s.calls.push(Call::Query(*request));
        let (dx, dy) = s.shift;
        Ok(request.rect.offset(dx, dy))
    }

    fn set_pos(&mut self, request: &PositionRequest) -> WindowResult<Rect> {
        let mut s = self.0.borrow_mut();
        s.calls.push(Call::Set(*request));
        if s.fail_set {
            return Err("shell restarted".into());
        }
        Ok(request.rect)
    }

    fn remove(&mut self, request: &RemoveRequest) -> WindowResult<()> {
        let mut s = self.0.borrow_mut();
        s.calls.push(Call::Remove(*request));
        s.live.remove(&request.handle);
        if s.fail_remove {
            return Err("stale handle".into());
        }
        Ok(())
    }
}

/// Records every rectangle the controller moves the window to.
#[derive(Default)]
pub struct RecordingSurface {
    pub moves: Vec<Rect>,
}

impl Surface for RecordingSurface {
    fn set_rect(&mut self, rect: &Rect) -> WindowResult<()> {
        self.moves.push(*rect);
        Ok(())
    }
}
