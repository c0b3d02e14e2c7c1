use crate::ray::EffectInput;
use std::cell::RefCell;
use std::rc::Rc;

pub mod pointer;
pub mod visibility;
pub mod window;

pub use pointer::wire_card_hover;
pub use visibility::wire_section_observer;
pub use window::{wire_resize, wire_scroll};

/// Messages queued by event listeners; drained once per frame.
pub type Inbox = Rc<RefCell<Vec<EffectInput>>>;
