use std::{
    any::{self, Any, TypeId},
    borrow::Cow,
    cell::{Cell, RefCell},
    collections::HashMap,
    fmt, mem,
    rc::Rc,
    thread_local,
};

use crate::{
    error::DefinitionError,
    node::{Node, NodeKind},
};

thread_local! {
    static STACK: RefCell<Vec<Component>> = RefCell::default();
}

/// Typed values seeded into a component before its body runs.
#[derive(Default)]
pub struct Contexts(HashMap<TypeId, Rc<dyn Any>>);

impl Contexts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<T: 'static>(&mut self, value: T) {
        self.0.insert(TypeId::of::<T>(), Rc::new(value));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Contexts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Contexts").field("len", &self.len()).finish()
    }
}

pub(crate) struct Component {
    name: Cow<'static, str>,
    pub(crate) frozen: Cell<bool>,
    pub(crate) mounted: Cell<bool>,

    contexts: Contexts,
    pub(crate) on_mount: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl Component {
    fn new(name: Cow<'static, str>, contexts: Contexts) -> Self {
        Self {
            name,
            frozen: Cell::new(false),
            mounted: Cell::new(false),
            contexts,
            on_mount: RefCell::default(),
        }
    }

    pub(crate) fn create<F>(name: Cow<'static, str>, f: F) -> Node
    where
        F: FnOnce() -> Node,
    {
        Self::create_with(name, Contexts::new(), f)
    }

    pub(crate) fn create_with<F>(name: Cow<'static, str>, contexts: Contexts, f: F) -> Node
    where
        F: FnOnce() -> Node,
    {
        STACK.with_borrow_mut(|stack| stack.push(Self::new(name, contexts)));
        let guard = PopOnUnwind;
        let content = f();
        mem::forget(guard);
        let component = STACK
            .with_borrow_mut(|stack| stack.pop())
            .expect("component stack emptied during creation");

        let node = Node::create(NodeKind::Component(component));
        node.insert(&content, None);
        node
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn on_mount(&self) {
        if !self.mounted.get() {
            self.mounted.set(true);
            for on_mount in mem::take(&mut *self.on_mount.borrow_mut()) {
                on_mount();
            }
        }
    }
}

/// Pops the frame pushed by [`Component::create_with`] if its body unwinds.
struct PopOnUnwind;

impl Drop for PopOnUnwind {
    fn drop(&mut self) {
        STACK.try_with(|stack| stack.borrow_mut().pop()).ok();
    }
}

/// Registers `f` to run once the enclosing component is attached to a host.
pub fn on_mount<F>(f: F)
where
    F: FnOnce() + 'static,
{
    active(|component| {
        component.on_mount.borrow_mut().push(Box::new(f));
    });
}

pub fn register_context<T: 'static>(context: T) {
    active(|component| component.contexts.insert(context))
}

/// Looks up a context of type `T`, innermost component first.
pub fn try_with_context<T, U, F>(f: F) -> Option<U>
where
    T: 'static,
    F: FnOnce(&T) -> U,
{
    // cloned out so `f` may create components or register contexts of its own
    let ctx = STACK.with_borrow(|stack| {
        stack
            .iter()
            .rev()
            .find_map(|component| component.contexts.0.get(&TypeId::of::<T>()))
            .cloned()
    })?;

    Some(f(ctx.downcast_ref::<T>().unwrap_or_else(|| {
        panic!("context type mismatch (expected {})", any::type_name::<T>())
    })))
}

pub fn with_context<T, U, F>(f: F) -> U
where
    T: 'static,
    F: FnOnce(&T) -> U,
{
    try_with_context(f)
        .unwrap_or_else(|| panic!("context of type `{}` not registered", any::type_name::<T>()))
}

pub fn try_context<T>() -> Option<T>
where
    T: Clone + 'static,
{
    try_with_context(Clone::clone)
}

pub fn context<T>() -> T
where
    T: Clone + 'static,
{
    with_context(Clone::clone)
}

fn active<F>(f: F)
where
    F: FnOnce(&mut Component),
{
    STACK
        .try_with(|stack| {
            f(stack
                .borrow_mut()
                .last_mut()
                .expect("not invoked during component creation"))
        })
        .ok();
}

type Render = Rc<dyn Fn() -> Node>;

/// A named template for the root of an application.
///
/// Definitions are cheap to clone and hold no state of their own; every mount calls the render
/// function afresh.
#[derive(Clone)]
pub struct ComponentDefinition {
    name: Cow<'static, str>,
    render: Option<Render>,
}

impl ComponentDefinition {
    pub fn new<F>(name: impl Into<Cow<'static, str>>, render: F) -> Self
    where
        F: Fn() -> Node + 'static,
    {
        Self::named(name).with_render(render)
    }

    /// A definition with no render function yet. Mounting it fails until
    /// [`with_render`](Self::with_render) completes it.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            render: None,
        }
    }

    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn() -> Node + 'static,
    {
        self.render = Some(Rc::new(render));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn validate(&self) -> Result<(), DefinitionError> {
        let mut chars = self.name.chars();
        match chars.next() {
            None => return Err(DefinitionError::EmptyName),
            Some(first) if !first.is_ascii_uppercase() => {
                return Err(DefinitionError::MalformedName)
            }
            Some(_) => {}
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(DefinitionError::MalformedName);
        }

        if self.render.is_none() {
            return Err(DefinitionError::MissingRender);
        }
        Ok(())
    }

    /// Validates `self` and hands back its render function.
    pub(crate) fn checked_render(&self) -> Result<&dyn Fn() -> Node, DefinitionError> {
        self.validate()?;
        self.render.as_deref().ok_or(DefinitionError::MissingRender)
    }

    pub(crate) fn name_cow(&self) -> Cow<'static, str> {
        self.name.clone()
    }
}

impl fmt::Debug for ComponentDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDefinition")
            .field("name", &self.name)
            .field("render", &self.render.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{
        cell::Cell,
        panic::{self, AssertUnwindSafe},
        rc::Rc,
    };

    use crate::node::render::{render_to_string, Mode};

    fn empty() -> Node {
        Node::fragment()
    }

    #[test]
    fn validates_names() {
        assert_eq!(ComponentDefinition::new("App", empty).validate(), Ok(()));
        assert_eq!(ComponentDefinition::new("Root_2", empty).validate(), Ok(()));
        assert_eq!(
            ComponentDefinition::new("", empty).validate(),
            Err(DefinitionError::EmptyName)
        );
        assert_eq!(
            ComponentDefinition::new("app", empty).validate(),
            Err(DefinitionError::MalformedName)
        );
        assert_eq!(
            ComponentDefinition::new("My App", empty).validate(),
            Err(DefinitionError::MalformedName)
        );
    }

    #[test]
    fn incomplete_definition() {
        let definition = ComponentDefinition::named("App");
        assert_eq!(definition.validate(), Err(DefinitionError::MissingRender));
        assert!(definition.with_render(empty).validate().is_ok());
    }

    #[test]
    fn contexts_resolve_innermost_first() {
        let mut outer = Contexts::new();
        outer.insert(1u32);
        outer.insert("outer");

        let seen = Rc::new(Cell::new((0, "")));
        Component::create_with("Outer".into(), outer, {
            let seen = seen.clone();
            move || {
                Node::component("Inner", move || {
                    register_context(2u32);
                    seen.set((context::<u32>(), context::<&str>()));
                    Node::fragment()
                })
            }
        });

        assert_eq!(seen.get(), (2, "outer"));
        assert_eq!(try_context::<u32>(), None);
    }

    #[test]
    fn nested_components_inside_context_closure() {
        let mut outer = Contexts::new();
        outer.insert(7u32);

        let node = Component::create_with("Outer".into(), outer, || {
            with_context(|n: &u32| {
                let n = *n;
                register_context("inner");
                Node::component("Inner", move || {
                    register_context(n + 1);
                    Node::text(format!("{}-{}", context::<&str>(), context::<u32>()))
                })
            })
        });

        assert_eq!(render_to_string(Mode::empty(), &node), "inner-8");
    }

    #[test]
    fn unwinding_body_leaves_no_frame_behind() {
        let mut seeded = Contexts::new();
        seeded.insert(42u32);

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            Component::create_with("Bad".into(), seeded, || panic!("render failed"))
        }));
        assert!(result.is_err());

        let seen = Rc::new(Cell::new(Some(0)));
        Component::create("Good".into(), {
            let seen = seen.clone();
            move || {
                seen.set(try_context::<u32>());
                Node::fragment()
            }
        });
        assert_eq!(seen.get(), None);
    }

    #[test]
    fn on_mount_fires_once() {
        let calls = Rc::new(Cell::new(0));
        let node = Node::component("Counter", {
            let calls = calls.clone();
            move || {
                on_mount(move || calls.set(calls.get() + 1));
                Node::fragment()
            }
        });

        assert_eq!(calls.get(), 0);
        node.set_attached(true);
        node.set_attached(true);
        assert_eq!(calls.get(), 1);
    }
}
