//! Host containers and the per-container HUD registry
//!
//! A [`Container`] owns an insertion-ordered list of children. HUDs are found
//! by scanning that list from the most recently attached child downwards, so
//! the newest HUD on a container always wins.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::HudConfig;
use crate::hud::{Hud, Presenter};
use crate::scheduler::Scheduler;

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique container identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(u64);

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "container-{}", self.0)
    }
}

/// A child of a container
#[derive(Debug, Clone)]
pub enum Child {
    Hud(Hud),
    /// Any other view owned by the host
    View(String),
}

impl Child {
    pub fn as_hud(&self) -> Option<&Hud> {
        match self {
            Child::Hud(hud) => Some(hud),
            Child::View(_) => None,
        }
    }
}

pub(crate) struct ContainerInner {
    id: ContainerId,
    name: String,
    children: RefCell<Vec<Child>>,
}

/// The host surface HUDs are attached to and overlay
#[derive(Clone)]
pub struct Container {
    inner: Rc<ContainerInner>,
}

#[derive(Clone)]
pub(crate) struct WeakContainer(Weak<ContainerInner>);

impl WeakContainer {
    pub(crate) fn upgrade(&self) -> Option<Container> {
        self.0.upgrade().map(|inner| Container { inner })
    }
}

impl Container {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(ContainerInner {
                id: ContainerId(NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed)),
                name: name.into(),
                children: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn id(&self) -> ContainerId {
        self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub(crate) fn downgrade(&self) -> WeakContainer {
        WeakContainer(Rc::downgrade(&self.inner))
    }

    /// Children, bottom-most first
    pub fn children(&self) -> Vec<Child> {
        self.inner.children.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.children.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.children.borrow().is_empty()
    }

    /// Append a non-HUD child
    pub fn add_view(&self, name: impl Into<String>) {
        self.inner.children.borrow_mut().push(Child::View(name.into()));
    }

    /// Attach `hud` on top of every other child.
    ///
    /// A HUD already attached here moves to the top; one attached to another
    /// container is taken off it first.
    pub fn attach(&self, hud: &Hud) {
        if let Some(previous) = hud.container() {
            if previous.id() != self.id() {
                previous.detach(hud);
            }
        }

        {
            let mut children = self.inner.children.borrow_mut();
            children.retain(|child| !matches!(child, Child::Hud(h) if h.ptr_eq(hud)));
            children.push(Child::Hud(hud.clone()));
        }
        hud.set_container(self.downgrade());
        tracing::debug!(hud = %hud.id(), container = %self.id(), "attached HUD");
    }

    /// Remove `hud`. Returns false if it was not attached here.
    pub fn detach(&self, hud: &Hud) -> bool {
        let mut children = self.inner.children.borrow_mut();
        let before = children.len();
        children.retain(|child| !matches!(child, Child::Hud(h) if h.ptr_eq(hud)));
        children.len() != before
    }

    pub fn contains(&self, hud: &Hud) -> bool {
        self.inner
            .children
            .borrow()
            .iter()
            .any(|child| matches!(child, Child::Hud(h) if h.ptr_eq(hud)))
    }

    /// Topmost attached HUD, if any
    pub fn find_hud(&self) -> Option<Hud> {
        self.inner
            .children
            .borrow()
            .iter()
            .rev()
            .find_map(Child::as_hud)
            .cloned()
    }

    /// Attached HUDs, bottom-most first
    pub fn huds(&self) -> Vec<Hud> {
        self.inner
            .children
            .borrow()
            .iter()
            .filter_map(Child::as_hud)
            .cloned()
            .collect()
    }
}

impl PartialEq for Container {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("children", &self.len())
            .finish()
    }
}

/// Container-level show/hide/find convenience API
pub struct HudRegistry {
    scheduler: Rc<dyn Scheduler>,
    config: HudConfig,
    presenter: Option<Rc<dyn Presenter>>,
}

impl HudRegistry {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self::with_config(scheduler, HudConfig::default())
    }

    pub fn with_config(scheduler: Rc<dyn Scheduler>, config: HudConfig) -> Self {
        Self {
            scheduler,
            config,
            presenter: None,
        }
    }

    /// Presenter handed to every HUD this registry creates
    pub fn with_presenter(mut self, presenter: Rc<dyn Presenter>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    pub fn config(&self) -> &HudConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: HudConfig) {
        self.config = config;
    }

    pub fn scheduler(&self) -> Rc<dyn Scheduler> {
        Rc::clone(&self.scheduler)
    }

    /// Create a configured, hidden, unattached HUD
    pub fn create(&self, container: &Container) -> Hud {
        let hud = Hud::new(container, Rc::clone(&self.scheduler));
        self.config.apply(&hud);
        if let Some(presenter) = &self.presenter {
            hud.set_presenter(Rc::clone(presenter));
        }
        hud
    }

    /// Create a HUD, attach it on top of `container` and show it.
    ///
    /// The HUD removes itself from the container once hidden. The returned
    /// handle can be configured further before or after it appears.
    pub fn show_hud(&self, container: &Container, animated: bool) -> Hud {
        let hud = self.create(container);
        hud.set_remove_from_host_on_hide(true);
        container.attach(&hud);
        tracing::debug!(hud = %hud.id(), container = %container.id(), animated, "showing HUD");
        hud.show(animated);
        hud
    }

    /// Hide the topmost HUD on `container`.
    ///
    /// Returns whether a HUD was found, not whether it is hidden yet.
    pub fn hide_hud(&self, container: &Container, animated: bool) -> bool {
        match Self::find_hud(container) {
            Some(hud) => {
                tracing::debug!(
                    hud = %hud.id(),
                    container = %container.id(),
                    animated,
                    "hiding HUD"
                );
                hud.set_remove_from_host_on_hide(true);
                hud.hide(animated);
                true
            }
            None => {
                tracing::debug!(container = %container.id(), "no HUD to hide");
                false
            }
        }
    }

    /// Most recently attached HUD still on `container`
    pub fn find_hud(container: &Container) -> Option<Hud> {
        container.find_hud()
    }
}
