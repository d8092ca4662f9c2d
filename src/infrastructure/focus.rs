//! Keyboard focus capability.
//!
//! The controller never renders anything, so focus is modelled through the
//! [`FocusHost`] trait: the presentation layer reports what currently has focus,
//! moves focus on request, and says whether a page element is still attached.
//! Elements inside the submission dialog are known to the controller and are
//! named by [`DialogElement`]; everything outside it is an opaque [`ElementId`].

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Opaque handle to a focusable element outside the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

/// Interactive elements of the submission dialog surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogElement {
    CloseButton,
    KindSingle,
    KindTwoPart,
    TextInput,
    SetupInput,
    DeliveryInput,
    CancelButton,
    SubmitButton,
}

/// Something that can hold keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    Page(ElementId),
    Dialog(DialogElement),
}

impl FocusTarget {
    /// The page element, if this target lives outside the dialog.
    #[must_use]
    pub const fn page_element(self) -> Option<ElementId> {
        match self {
            Self::Page(id) => Some(id),
            Self::Dialog(_) => None,
        }
    }
}

/// Focus capability provided by the presentation layer.
pub trait FocusHost: Send {
    /// Element that currently has focus, if any.
    fn active(&self) -> Option<FocusTarget>;

    /// Moves focus to `target`. Focusing a detached page element is a no-op.
    fn focus(&mut self, target: FocusTarget);

    /// Whether `element` is still part of the live document.
    fn is_attached(&self, element: ElementId) -> bool;
}

#[derive(Debug, Default)]
struct DocumentInner {
    attached: HashSet<ElementId>,
    active: Option<FocusTarget>,
}

/// In-memory [`FocusHost`] standing in for a rendered document.
///
/// Clones share state, so a caller can hand one clone to the controller and
/// keep another to drive and inspect focus.
///
/// # Examples
///
/// ```
/// use jokebox::infrastructure::{ElementId, FocusHost, FocusTarget, VirtualDocument};
///
/// let mut doc = VirtualDocument::default();
/// doc.attach(ElementId(1));
/// doc.focus(FocusTarget::Page(ElementId(1)));
/// assert_eq!(doc.active(), Some(FocusTarget::Page(ElementId(1))));
///
/// doc.detach(ElementId(1));
/// assert_eq!(doc.active(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct VirtualDocument {
    inner: Arc<Mutex<DocumentInner>>,
}

impl VirtualDocument {
    pub fn attach(&self, element: ElementId) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.attached.insert(element);
        }
    }

    /// Removes `element`; focus is dropped if it was on that element.
    pub fn detach(&self, element: ElementId) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.attached.remove(&element);
            if inner.active == Some(FocusTarget::Page(element)) {
                inner.active = None;
            }
        }
    }

    /// Clears focus, as when the user clicks on an inert area.
    pub fn blur(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.active = None;
        }
    }
}

impl FocusHost for VirtualDocument {
    fn active(&self) -> Option<FocusTarget> {
        self.inner.lock().ok().and_then(|inner| inner.active)
    }

    fn focus(&mut self, target: FocusTarget) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };

        if let FocusTarget::Page(element) = target {
            if !inner.attached.contains(&element) {
                tracing::debug!(element = element.0, "ignoring focus on detached element");
                return;
            }
        }
        inner.active = Some(target);
    }

    fn is_attached(&self, element: ElementId) -> bool {
        self.inner
            .lock()
            .map(|inner| inner.attached.contains(&element))
            .unwrap_or(false)
    }
}
