pub(crate) trait Resolve {
    type Resolved;

    fn resolve(self) -> Self::Resolved;
}

pub(crate) trait TryResolve {
    type Resolved;
    type Error;

    fn try_resolve(self) -> Result<Self::Resolved, Self::Error>;
}


pub(crate) trait TryResolveWithContext<'r> {
    type Resolved;
    type Context: 'r;
    type Error;

    fn try_resolve_with_context(self, context: Self::Context)
        -> Result<Self::Resolved, Self::Error>;
}
