//! Action bindings.
//!
//! An action is a named list of tasks. Each task only declares what the
//! external runtime should do: run a script over SSH against a service, or
//! scale a deployment by a runtime-supplied count.

use serde::Serialize;

use super::Ref;

/// A named lifecycle hook or operator action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<Variable>,
    pub tasks: Vec<Task>,
}

impl Action {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            tasks: Vec::new(),
        }
    }

    /// Append a task
    pub fn task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Append an action-level variable
    pub fn variable(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    /// Every reference made by this action's tasks
    pub fn refs(&self) -> impl Iterator<Item = &Ref> {
        self.tasks.iter().map(Task::target)
    }
}

/// A single delegated step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Task {
    /// Run a script over SSH
    Exec(ExecTask),
    /// Scale a deployment
    Scaling(ScalingTask),
}

impl Task {
    /// Exec task over SSH with the script body already read
    pub fn ssh(
        name: impl Into<String>,
        filename: impl Into<String>,
        script: impl Into<String>,
        target: Ref,
    ) -> Self {
        Task::Exec(ExecTask {
            name: name.into(),
            script_type: "sh",
            filename: filename.into(),
            script: script.into(),
            target,
        })
    }

    pub fn scale_out(name: impl Into<String>, count: impl Into<String>, target: Ref) -> Self {
        Self::scaling(name, ScalingDirection::ScaleOut, count, target)
    }

    pub fn scale_in(name: impl Into<String>, count: impl Into<String>, target: Ref) -> Self {
        Self::scaling(name, ScalingDirection::ScaleIn, count, target)
    }

    pub fn scaling(
        name: impl Into<String>,
        direction: ScalingDirection,
        count: impl Into<String>,
        target: Ref,
    ) -> Self {
        Task::Scaling(ScalingTask {
            name: name.into(),
            scaling_type: direction,
            scaling_count: count.into(),
            target,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Task::Exec(t) => &t.name,
            Task::Scaling(t) => &t.name,
        }
    }

    pub fn target(&self) -> &Ref {
        match self {
            Task::Exec(t) => &t.target,
            Task::Scaling(t) => &t.target,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecTask {
    pub name: String,
    pub script_type: &'static str,
    pub filename: String,
    pub script: String,
    pub target: Ref,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScalingDirection {
    #[serde(rename = "SCALEOUT")]
    ScaleOut,
    #[serde(rename = "SCALEIN")]
    ScaleIn,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalingTask {
    pub name: String,
    pub scaling_type: ScalingDirection,
    /// Count template, usually a runtime macro such as `@@{COUNT}@@`
    pub scaling_count: String,
    pub target: Ref,
}

/// Value type of a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    Int,
    String,
    /// Stored encrypted by the platform and hidden from launch forms
    Secret,
}

/// A simple variable attached to a profile or action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: VariableKind,
    pub value: String,
    pub is_mandatory: bool,
    pub runtime: bool,
}

impl Variable {
    /// A plain string variable, editable at launch
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: VariableKind::String,
            value: value.into(),
            is_mandatory: false,
            runtime: true,
        }
    }

    /// A secret string variable, fixed at compile time
    pub fn secret(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: VariableKind::Secret,
            value: value.into(),
            is_mandatory: false,
            runtime: false,
        }
    }

    /// An integer variable
    pub fn int(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: VariableKind::Int,
            value: value.into(),
            is_mandatory: false,
            runtime: false,
        }
    }

    pub fn mandatory(mut self) -> Self {
        self.is_mandatory = true;
        self
    }

    pub fn runtime(mut self) -> Self {
        self.runtime = true;
        self
    }

    pub fn is_secret(&self) -> bool {
        self.kind == VariableKind::Secret
    }
}
