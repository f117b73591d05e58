//! Document event handling helpers.
//!
//! The helpers are written against the minimal [`Node`] and [`EventHub`]
//! abstractions, a browser binding implements them over the real DOM.

use std::rc::Rc;

/// Attribute marking an element (and its subtree) as an interaction-safe
/// zone that does not dismiss overlays.
pub const INTERCEPT_ATTRIBUTE: &str = "data-intercept";

/// Element of a document tree.
pub trait Node: Clone {
    /// Tag name, e.g. `A` for anchors.
    fn node_name(&self) -> &str;

    fn attribute(&self, name: &str) -> Option<&str>;

    fn parent(&self) -> Option<Self>;
}

/// Keyboard modifiers held during the event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.alt || self.ctrl || self.meta || self.shift
    }
}

/// Mouse click.
#[derive(Clone, Debug)]
pub struct ClickEvent<N> {
    target: Option<N>,
    modifiers: Modifiers,
    default_prevented: bool,
}

impl<N: Node> ClickEvent<N> {
    pub fn new(target: Option<N>, modifiers: Modifiers) -> Self {
        Self {
            target,
            modifiers,
            default_prevented: false,
        }
    }

    pub fn target(&self) -> Option<&N> {
        self.target.as_ref()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Not handled yet and not altered by modifier keys.
    fn is_plain(&self) -> bool {
        !self.modifiers.any() && !self.default_prevented
    }
}

/// Key press.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Event propagation phase a listener is invoked in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Capture,
    Bubble,
}

pub type ClickListener<N> = Box<dyn FnMut(&mut ClickEvent<N>)>;

pub type KeyListener = Box<dyn FnMut(&KeyEvent)>;

/// Window-level event listener registration.
pub trait EventHub<N: Node> {
    fn add_click_listener(&mut self, phase: Phase, listener: ClickListener<N>);

    fn add_keydown_listener(&mut self, listener: KeyListener);
}

/// Overlay controllers. Closing an overlay that is not shown is a no-op.
pub trait Overlays {
    fn close_modal(&self);

    fn close_menu(&self);

    fn close_toast(&self);
}

/// Nearest node satisfying the predicate, starting at the target itself.
///
/// The walk stops below the root: a node without a parent is never tested.
pub fn find_ancestor<N: Node>(target: &N, mut predicate: impl FnMut(&N) -> bool) -> Option<N> {
    let mut node = target.clone();
    loop {
        let parent = node.parent()?;
        if predicate(&node) {
            return Some(node);
        }
        node = parent;
    }
}

/// Link the click should navigate to in-app, if any.
///
/// Plain clicks on anchors with a relative `href` get their default action
/// prevented, everything else is left to the browser.
pub fn handle_link_click<N: Node>(event: &mut ClickEvent<N>) -> Option<String> {
    if !event.is_plain() {
        return None;
    }
    let anchor = find_ancestor(event.target()?, |n| n.node_name().eq_ignore_ascii_case("a"))?;
    let href = anchor.attribute("href").filter(|href| !href.is_empty())?;
    if href.contains("http") {
        return None;
    }
    let href = href.to_string();
    event.prevent_default();
    Some(href)
}

/// Whether the click landed outside of every interaction-safe zone.
pub fn is_outside_interaction<N: Node>(event: &ClickEvent<N>) -> bool {
    if !event.is_plain() {
        return false;
    }
    let Some(target) = event.target() else {
        return true;
    };
    let intercepts = |n: &N| n.attribute(INTERCEPT_ATTRIBUTE).is_some_and(|v| !v.is_empty());
    !intercepts(target) && find_ancestor(target, intercepts).is_none()
}

/// Routes plain clicks on relative links to `on_navigate` instead of
/// the browser.
pub fn intercept_relative_links<N, H, F>(hub: &mut H, mut on_navigate: F)
where
    N: Node + 'static,
    H: EventHub<N>,
    F: FnMut(&str) + 'static,
{
    hub.add_click_listener(
        Phase::Capture,
        Box::new(move |event: &mut ClickEvent<N>| {
            if let Some(href) = handle_link_click(event) {
                on_navigate(&href);
            }
        }),
    );
}

/// Closes modal and menu on clicks outside of interaction-safe zones, and
/// modal, menu and toast on `Escape`.
pub fn dismiss_overlays_on_outside_interaction<N, H, O>(hub: &mut H, overlays: Rc<O>)
where
    N: Node + 'static,
    H: EventHub<N>,
    O: Overlays + 'static,
{
    let on_click = overlays.clone();
    hub.add_click_listener(
        Phase::Bubble,
        Box::new(move |event: &mut ClickEvent<N>| {
            if is_outside_interaction(event) {
                on_click.close_modal();
                on_click.close_menu();
            }
        }),
    );
    hub.add_keydown_listener(Box::new(move |event: &KeyEvent| {
        if event.key == "Escape" {
            overlays.close_modal();
            overlays.close_menu();
            overlays.close_toast();
        }
    }));
}
