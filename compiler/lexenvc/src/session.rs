//! Scenario session: identifier interning plus an output transcript.

use lexenv_env::{EnvError, EnvResult, Name, ScopeRef, WeakScopeRef};
use lexenv_ir::SharedInterner;

use crate::dump::{render_chain, ScopeSnapshot};
use crate::host::{HostError, HostResult};
use crate::value::Value;

/// State threaded through one scenario run.
pub struct Session {
    interner: SharedInterner,
    transcript: Vec<String>,
    snapshots: Vec<ScopeSnapshot>,
    watched: Vec<(String, WeakScopeRef<Value>)>,
}

impl Session {
    pub fn new() -> Self {
        Session {
            interner: SharedInterner::new(),
            transcript: Vec::new(),
            snapshots: Vec::new(),
            watched: Vec::new(),
        }
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    /// Intern an identifier.
    pub fn name(&self, text: &str) -> HostResult<Name> {
        self.interner
            .try_intern(text)
            .map_err(|err| HostError::Env(EnvError::from(err)))
    }

    /// Record `label: value`.
    pub fn emit(&mut self, label: &str, value: &Value) {
        self.transcript.push(format!("{label}: {value}"));
    }

    /// Record a lookup outcome, rendering failures inline.
    pub fn emit_lookup(&mut self, label: &str, result: EnvResult<Value>) {
        match result {
            Ok(value) => self.emit(label, &value),
            Err(err) => {
                let line = format!("{label}: <{}>", err.render(&self.interner));
                self.transcript.push(line);
            }
        }
    }

    /// Record the chain of `scope` as it looks right now.
    pub fn snapshot(&mut self, label: &str, scope: &ScopeRef<Value>) {
        self.snapshots.push(ScopeSnapshot {
            label: label.to_owned(),
            chain: Some(render_chain(scope, &self.interner)),
        });
    }

    /// Track a scope so the final report can say whether it is still live.
    pub fn watch(&mut self, label: &str, scope: &ScopeRef<Value>) {
        self.watched.push((label.to_owned(), scope.downgrade()));
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Close the session, snapshotting watched scopes.
    pub fn finish(self, name: &str, result: HostResult<()>) -> Report {
        let mut scopes = self.snapshots;
        scopes.extend(
            self.watched
                .iter()
                .map(|(label, weak)| ScopeSnapshot::capture(label, weak, &self.interner)),
        );
        Report {
            name: name.to_owned(),
            error: result.err().map(|err| err.render(&self.interner)),
            transcript: self.transcript,
            scopes,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one scenario run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub name: String,
    pub transcript: Vec<String>,
    pub scopes: Vec<ScopeSnapshot>,
    /// Rendered failure, if the scenario stopped early.
    pub error: Option<String>,
}

impl Report {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
