use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use benchmatrix::exec::{Invocation, SolverBackend, solver_args};
use benchmatrix::matrix::Task;

/// What the scripted solver does for one (instance, variant) pair.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Exit cleanly after printing this to stdout.
    Prints(String),
    /// Exit with this non-zero code.
    Crashes(i32),
}

/// A fake solver that:
/// - records which tasks were "run", as `"<instance>/<variant>"`
/// - answers from a script keyed on (instance id, variant name), falling
///   back to a default answer.
pub struct ScriptedSolver {
    script: HashMap<(String, String), Scripted>,
    fallback: Scripted,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedSolver {
    /// Every task prints `stdout` unless scripted otherwise.
    pub fn always(stdout: &str) -> Self {
        Self {
            script: HashMap::new(),
            fallback: Scripted::Prints(stdout.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every task crashes unless scripted otherwise.
    pub fn always_crashing() -> Self {
        Self {
            script: HashMap::new(),
            fallback: Scripted::Crashes(1),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn prints(mut self, instance: &str, variant: &str, stdout: &str) -> Self {
        self.script.insert(
            (instance.to_string(), variant.to_string()),
            Scripted::Prints(stdout.to_string()),
        );
        self
    }

    pub fn crashes(mut self, instance: &str, variant: &str) -> Self {
        self.script.insert(
            (instance.to_string(), variant.to_string()),
            Scripted::Crashes(1),
        );
        self
    }

    /// Shared handle on the list of executed tasks.
    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

impl SolverBackend for ScriptedSolver {
    fn invoke<'a>(
        &'a mut self,
        task: &'a Task,
    ) -> Pin<Box<dyn Future<Output = Invocation> + Send + 'a>> {
        let key = (task.instance.id().to_string(), task.variant.name.clone());
        {
            let mut guard = self.calls.lock().unwrap();
            guard.push(format!("{}/{}", key.0, key.1));
        }

        let answer = self.script.get(&key).unwrap_or(&self.fallback).clone();

        Box::pin(async move {
            match answer {
                Scripted::Prints(stdout) => Invocation::Completed { stdout },
                Scripted::Crashes(code) => Invocation::Failed {
                    cause: format!("solver exited with code {code}"),
                },
            }
        })
    }

    fn describe(&self, task: &Task) -> String {
        format!("scripted {}", solver_args(task).join(" "))
    }
}
