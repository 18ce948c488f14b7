//! Activation of embedded styles and scripts after a markup swap
//!
//! Markup assigned as raw HTML does not apply its `<style>` blocks to the
//! page or run its `<script>` blocks. [`ContentActivator::activate`] lifts
//! each such fragment out to the [`PageHost`] exactly once, marking the
//! original so that repeated activation of the same container is a no-op,
//! then runs the optional injected hooks.

mod fragments;
mod page;

pub use fragments::{ScriptFragment, StyleDeclaration, EXECUTED_ATTR, PROCESSED_ATTR};
pub use page::Page;

use crate::dom::Document;
use crate::error::Result;
use crate::traits::PageHost;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, debug_span, warn};

/// Callback run against the container after both activation passes
pub type Hook = Box<dyn FnMut(&mut Document) -> Result<()>>;

/// Optional "initialize interactive regions" and "cleanup stale elements" hooks
#[derive(Default)]
pub struct ActivationHooks {
    pub on_activate: Option<Hook>,
    pub on_cleanup: Option<Hook>,
}

impl ActivationHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_activate<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut Document) -> Result<()> + 'static,
    {
        self.on_activate = Some(Box::new(hook));
        self
    }

    pub fn on_cleanup<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut Document) -> Result<()> + 'static,
    {
        self.on_cleanup = Some(Box::new(hook));
        self
    }
}

impl fmt::Debug for ActivationHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivationHooks")
            .field("on_activate", &self.on_activate.is_some())
            .field("on_cleanup", &self.on_cleanup.is_some())
            .finish()
    }
}

/// What one activation pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivationReport {
    pub styles_injected: usize,
    pub scripts_executed: usize,
    /// Malformed fragments and fragments the host refused
    pub fragments_skipped: usize,
    pub hook_failures: usize,
}

#[derive(Debug, Default)]
pub struct ContentActivator {
    hooks: ActivationHooks,
}

impl ContentActivator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hooks(hooks: ActivationHooks) -> Self {
        Self { hooks }
    }

    /// Activate every unprocessed fragment in `container`, then run the hooks
    pub fn activate<H: PageHost>(&mut self, container: &mut Document, host: &mut H) -> ActivationReport {
        let span = debug_span!("activate");
        let _guard = span.enter();

        let mut report = ActivationReport::default();
        self.activate_styles(container, host, &mut report);
        self.activate_scripts(container, host, &mut report);

        if let Some(hook) = self.hooks.on_activate.as_mut() {
            if !run_hook("on_activate", hook, container) {
                report.hook_failures += 1;
            }
        }
        if let Some(hook) = self.hooks.on_cleanup.as_mut() {
            if !run_hook("on_cleanup", hook, container) {
                report.hook_failures += 1;
            }
        }

        debug!(
            styles = report.styles_injected,
            scripts = report.scripts_executed,
            skipped = report.fragments_skipped,
            "activation finished"
        );
        report
    }

    fn activate_styles<H: PageHost>(
        &self,
        container: &mut Document,
        host: &mut H,
        report: &mut ActivationReport,
    ) {
        for (fragment, id) in container.elements_by_tag("style").into_iter().enumerate() {
            if container.attr(id, PROCESSED_ATTR).is_some() {
                continue;
            }
            let style = StyleDeclaration::from_element(container, id);
            container.set_attr(id, PROCESSED_ATTR, "true");

            match host.inject_style(style) {
                Ok(()) => report.styles_injected += 1,
                Err(e) => {
                    warn!(fragment, error = %e, "failed to inject style");
                    report.fragments_skipped += 1;
                }
            }
        }
    }

    fn activate_scripts<H: PageHost>(
        &self,
        container: &mut Document,
        host: &mut H,
        report: &mut ActivationReport,
    ) {
        for (fragment, id) in container.elements_by_tag("script").into_iter().enumerate() {
            if container.attr(id, EXECUTED_ATTR).is_some() {
                continue;
            }
            let script = ScriptFragment::from_element(container, id);
            container.set_attr(id, EXECUTED_ATTR, "true");

            let script = match script {
                Ok(script) => script,
                Err(e) => {
                    warn!(fragment, error = %e, "skipping script");
                    report.fragments_skipped += 1;
                    continue;
                }
            };

            container.detach(id);
            match host.run_script(script) {
                Ok(()) => report.scripts_executed += 1,
                Err(e) => {
                    warn!(fragment, error = %e, "failed to run script");
                    report.fragments_skipped += 1;
                }
            }
        }
    }
}

/// Run one hook, logging and swallowing errors and panics
fn run_hook(name: &str, hook: &mut Hook, container: &mut Document) -> bool {
    match catch_unwind(AssertUnwindSafe(|| hook(container))) {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            warn!(hook = name, error = %e, "activation hook failed");
            false
        }
        Err(panic) => {
            let message = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            warn!(hook = name, error = %message, "activation hook panicked");
            false
        }
    }
}
