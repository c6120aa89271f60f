//! Convention-based resolution for paths no routing rule matched.
//!
//! Up to three bare segments are interpreted as module, controller and
//! action by asking the [`Registry`] what exists. The precedence is written
//! down as a decision table rather than nested branches:
//!
//! | segments | probes                                         | module | controller | action  |
//! |----------|------------------------------------------------|--------|------------|---------|
//! | 0        | -                                              | root   | default    | default |
//! | 1        | module(s0)                                     | s0     | default    | default |
//! | 1        | !module(s0), controller("", s0)                | root   | s0         | default |
//! | 1        | !module(s0), !controller("", s0)               | root   | default    | s0      |
//! | 2        | module(s0), controller(s0, s1)                 | s0     | s1         | default |
//! | 2        | module(s0), !controller(s0, s1)                | s0     | default    | s1      |
//! | 2        | !module(s0), controller("", s0)                | root   | s0         | s1      |
//! | 3        | module(s0), controller(s0, s1)                 | s0     | s1         | s2      |
//!
//! Rows are mutually exclusive, so a module always wins over a root
//! controller of the same name, and a controller over a bare action.
//! Anything not covered (four or more segments, or no satisfied row) is
//! [`RouterError::RouteNotFound`].

use crate::error::RouterError;
use crate::registry::Registry;
use crate::route::{capitalize, Route};
use tracing::debug;

/// Existence question asked about the path segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Is segment `i` a module?
    Module(usize),
    /// Is segment `name` a controller of module segment `module`
    /// (`None` = root module)?
    Controller {
        module: Option<usize>,
        name: usize,
    },
}

impl Probe {
    fn evaluate<R: Registry + ?Sized>(self, segments: &[&str], registry: &R) -> bool {
        match self {
            Probe::Module(i) => registry.exists_module(segments[i]),
            Probe::Controller { module, name } => {
                let module = module.map_or("", |m| segments[m]);
                registry.exists_controller(module, segments[name])
            }
        }
    }
}

/// Where a route component comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The component's default (root module, `Index`, `default`)
    Default,
    /// Path segment `i`, capitalized
    Segment(usize),
}

impl Slot {
    fn fill(self, segments: &[&str]) -> String {
        match self {
            Slot::Default => String::new(),
            Slot::Segment(i) => capitalize(segments[i]),
        }
    }
}

/// One row of the convention decision table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Number of path segments this row applies to
    pub arity: usize,
    /// Probes with the answer each must give, checked in order
    pub probes: &'static [(Probe, bool)],
    pub module: Slot,
    pub controller: Slot,
    pub action: Slot,
}

const MODULE_0: Probe = Probe::Module(0);
const ROOT_CONTROLLER_0: Probe = Probe::Controller {
    module: None,
    name: 0,
};
const MODULE_CONTROLLER_1: Probe = Probe::Controller {
    module: Some(0),
    name: 1,
};

/// Convention rows in precedence order
pub const DECISION_TABLE: &[Decision] = &[
    Decision {
        arity: 0,
        probes: &[],
        module: Slot::Default,
        controller: Slot::Default,
        action: Slot::Default,
    },
    Decision {
        arity: 1,
        probes: &[(MODULE_0, true)],
        module: Slot::Segment(0),
        controller: Slot::Default,
        action: Slot::Default,
    },
    Decision {
        arity: 1,
        probes: &[(MODULE_0, false), (ROOT_CONTROLLER_0, true)],
        module: Slot::Default,
        controller: Slot::Segment(0),
        action: Slot::Default,
    },
    Decision {
        arity: 1,
        probes: &[(MODULE_0, false), (ROOT_CONTROLLER_0, false)],
        module: Slot::Default,
        controller: Slot::Default,
        action: Slot::Segment(0),
    },
    Decision {
        arity: 2,
        probes: &[(MODULE_0, true), (MODULE_CONTROLLER_1, true)],
        module: Slot::Segment(0),
        controller: Slot::Segment(1),
        action: Slot::Default,
    },
    Decision {
        arity: 2,
        probes: &[(MODULE_0, true), (MODULE_CONTROLLER_1, false)],
        module: Slot::Segment(0),
        controller: Slot::Default,
        action: Slot::Segment(1),
    },
    Decision {
        arity: 2,
        probes: &[(MODULE_0, false), (ROOT_CONTROLLER_0, true)],
        module: Slot::Default,
        controller: Slot::Segment(0),
        action: Slot::Segment(1),
    },
    Decision {
        arity: 3,
        probes: &[(MODULE_0, true), (MODULE_CONTROLLER_1, true)],
        module: Slot::Segment(0),
        controller: Slot::Segment(1),
        action: Slot::Segment(2),
    },
];

impl Decision {
    /// Whether every probe gives its expected answer.
    ///
    /// Stops at the first mismatch; answers are not remembered between rows.
    pub fn accepts<R: Registry + ?Sized>(&self, segments: &[&str], registry: &R) -> bool {
        self.arity == segments.len()
            && self
                .probes
                .iter()
                .all(|(probe, expected)| probe.evaluate(segments, registry) == *expected)
    }

    fn build(&self, segments: &[&str]) -> Route {
        Route::new(
            self.module.fill(segments),
            self.controller.fill(segments),
            self.action.fill(segments),
        )
    }
}

/// The first table row satisfied by `segments`, if any
pub fn decide<R: Registry + ?Sized>(segments: &[&str], registry: &R) -> Option<&'static Decision> {
    DECISION_TABLE
        .iter()
        .find(|decision| decision.accepts(segments, registry))
}

/// Infer a route from bare path segments.
///
/// # Errors
///
/// [`RouterError::RouteNotFound`] when no table row applies. Only the
/// segments are known here, so the error names the normalized path
/// `/s0/s1/...` (empty segments and trailing slashes are gone). `Router::resolve`
/// replaces it with an error naming the request's base path as received.
pub fn guess<R: Registry + ?Sized>(
    segments: &[&str],
    format: &str,
    registry: &R,
) -> Result<Route, RouterError> {
    let decision = decide(segments, registry).ok_or_else(|| RouterError::RouteNotFound {
        path: format!("/{}", segments.join("/")),
    })?;

    debug!(
        segments = ?segments,
        arity = decision.arity,
        module = ?decision.module,
        controller = ?decision.controller,
        action = ?decision.action,
        "Convention row selected"
    );

    Ok(decision.build(segments).with_format(format))
}
