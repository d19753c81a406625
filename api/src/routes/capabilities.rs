//! Capability sets for resource routers.
//!
//! A resource declares which operations it supports. `ResourceRoutes` only mounts
//! handlers for enabled capabilities, so a disabled operation answers
//! `405 Method Not Allowed` (or `404` when nothing is mounted at the path).

use axum::{
    Router,
    handler::Handler,
    routing::MethodRouter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    List,
    Create,
    Retrieve,
    Update,
    Destroy,
}

impl Capability {
    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// A set of enabled operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities(u8);

impl Capabilities {
    pub const ALL: Self = Self::of(&[
        Capability::List,
        Capability::Create,
        Capability::Retrieve,
        Capability::Update,
        Capability::Destroy,
    ]);

    pub const fn of(capabilities: &[Capability]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < capabilities.len() {
            bits |= capabilities[i].bit();
            i += 1;
        }
        Self(bits)
    }

    pub const fn contains(self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }
}

/// Collects the handlers of one resource and mounts the enabled ones.
///
/// Collection operations (`List`, `Create`) live on the collection path, member
/// operations (`Retrieve`, `Update`, `Destroy`) on the member path.
pub struct ResourceRoutes<S> {
    capabilities: Capabilities,
    collection: Option<MethodRouter<S>>,
    member: Option<MethodRouter<S>>,
}

impl<S> ResourceRoutes<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            collection: None,
            member: None,
        }
    }

    /// `GET` on the collection path.
    pub fn list<H, T>(mut self, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        if self.capabilities.contains(Capability::List) {
            add(&mut self.collection, |r| r.get(handler));
        }
        self
    }

    /// `POST` on the collection path.
    pub fn create<H, T>(mut self, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        if self.capabilities.contains(Capability::Create) {
            add(&mut self.collection, |r| r.post(handler));
        }
        self
    }

    /// `GET` on the member path.
    pub fn retrieve<H, T>(mut self, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        if self.capabilities.contains(Capability::Retrieve) {
            add(&mut self.member, |r| r.get(handler));
        }
        self
    }

    /// `PUT` on the member path.
    pub fn update<H, T>(mut self, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        if self.capabilities.contains(Capability::Update) {
            add(&mut self.member, |r| r.put(handler));
        }
        self
    }

    /// `PATCH` on the member path. Enabled by the `Update` capability.
    pub fn partial_update<H, T>(mut self, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        if self.capabilities.contains(Capability::Update) {
            add(&mut self.member, |r| r.patch(handler));
        }
        self
    }

    /// `DELETE` on the member path.
    pub fn destroy<H, T>(mut self, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        if self.capabilities.contains(Capability::Destroy) {
            add(&mut self.member, |r| r.delete(handler));
        }
        self
    }

    pub fn into_router(self, collection_path: &str, member_path: &str) -> Router<S> {
        let mut router = Router::new();
        if let Some(collection) = self.collection {
            router = router.route(collection_path, collection);
        }
        if let Some(member) = self.member {
            router = router.route(member_path, member);
        }
        router
    }
}

fn add<S>(slot: &mut Option<MethodRouter<S>>, f: impl FnOnce(MethodRouter<S>) -> MethodRouter<S>)
where
    S: Clone + Send + Sync + 'static,
{
    *slot = Some(f(slot.take().unwrap_or_else(MethodRouter::new)));
}
