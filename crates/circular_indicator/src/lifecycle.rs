//! Mount lifecycle
//!
//! `Lifecycle` is the mount/unmount hook pair every indicator is built on.
//! Mount hooks run in registration order and may register tweens through
//! the `MountScope` they receive; the lifecycle keeps the resulting
//! `Registration` guards and drops them on unmount, which removes the tweens
//! from the scheduler. Dropping a mounted lifecycle unmounts it first.
//!
//! ```text
//!   Unmounted ──mount()──▶ Mounted ──unmount()──▶ Unmounted
//! ```
//!
//! Mounting twice or unmounting twice is a no-op.

use circular_animation::{MountHook, MountScope, Mountable, Registration, SchedulerHandle, TweenId};

/// Callback run each time a node unmounts
pub type UnmountHook = Box<dyn FnMut()>;

/// Where a node is in its mount lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Unmounted,
    Mounted,
}

/// Registered mount and unmount callbacks, run in registration order
#[derive(Default)]
struct LifecycleHooks {
    mount: Vec<MountHook>,
    unmount: Vec<UnmountHook>,
}

/// Mount state of one node and the registrations it owns while mounted
pub struct Lifecycle {
    handle: SchedulerHandle,
    hooks: LifecycleHooks,
    phase: Phase,
    registrations: Vec<Registration>,
}

impl Lifecycle {
    pub fn new(handle: SchedulerHandle) -> Self {
        Self {
            handle,
            hooks: LifecycleHooks::default(),
            phase: Phase::Unmounted,
            registrations: Vec::new(),
        }
    }

    pub fn handle(&self) -> &SchedulerHandle {
        &self.handle
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_mounted(&self) -> bool {
        self.phase == Phase::Mounted
    }

    /// Register a callback for when the node leaves the tree (builder pattern)
    pub fn on_unmount<F>(mut self, hook: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.hooks.unmount.push(Box::new(hook));
        self
    }

    /// Number of live registrations owned by this node
    pub fn registration_count(&self) -> usize {
        self.registrations.len()
    }

    /// Scheduler ids of the live registrations, in the order they were made
    pub fn registration_ids(&self) -> Vec<TweenId> {
        self.registrations.iter().map(Registration::id).collect()
    }

    /// Enter the tree, running every mount hook in order
    pub fn mount(&mut self) {
        if self.is_mounted() {
            tracing::debug!("mount ignored: node is already mounted");
            return;
        }
        if !self.handle.is_alive() {
            tracing::warn!("mounting without a live scheduler: nothing will animate");
        }

        let mut scope = MountScope::new(self.handle.clone());
        for hook in &mut self.hooks.mount {
            hook(&mut scope);
        }
        self.registrations = scope.into_registrations();
        self.phase = Phase::Mounted;

        tracing::debug!("mounted with {} registration(s)", self.registrations.len());
    }

    /// Leave the tree, releasing every registration before the unmount hooks run
    pub fn unmount(&mut self) {
        if !self.is_mounted() {
            return;
        }

        let released = self.registrations.len();
        self.registrations.clear();
        for hook in &mut self.hooks.unmount {
            hook();
        }
        self.phase = Phase::Unmounted;

        tracing::debug!("unmounted, released {} registration(s)", released);
    }
}

impl Mountable for Lifecycle {
    fn on_mount(&mut self, hook: MountHook) {
        self.hooks.mount.push(hook);
    }
}

impl Drop for Lifecycle {
    fn drop(&mut self) {
        self.unmount();
    }
}
