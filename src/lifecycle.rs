/// Mount/unmount hooks for a dashboard view.
///
/// A view is mounted while its tab is active. `unmount` must release every
/// subscription and timer the view holds; `mount` starts the view from fresh
/// state.
pub trait ViewLifecycle {
    fn mount(&mut self);
    fn unmount(&mut self);
}
