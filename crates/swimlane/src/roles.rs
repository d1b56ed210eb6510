//! Task-to-role assignment.
//!
//! The role of every task comes from the event log the process model was
//! discovered from: each log row names an activity and the resource or role
//! that performed it. [`RoleAssignment`] is the resulting map.

use indexmap::{IndexMap, IndexSet};

/// Maps task display names to role names.
///
/// Role names end up inside lane ids, where spaces are not allowed, so every
/// role is normalized on insertion (spaces become underscores). The map keeps
/// insertion order; [`RoleAssignment::roles`] therefore lists roles in the
/// order they were first seen, which fixes the lane stacking order.
///
/// # Examples
///
/// ```
/// use swimlane::RoleAssignment;
///
/// let roles = RoleAssignment::from_records([
///     ("Register", "Front Office"),
///     ("Analyze Defect", "Tester 3"),
///     ("Register", "System"),
/// ]);
///
/// // Later rows win for the same activity.
/// assert_eq!(roles.role_of("Register"), Some("System"));
/// assert_eq!(roles.role_of("Analyze Defect"), Some("Tester_3"));
/// assert_eq!(roles.roles().collect::<Vec<_>>(), ["System", "Tester_3"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleAssignment {
    roles_by_task: IndexMap<String, String>,
}

impl RoleAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an assignment from `(activity, role)` rows.
    ///
    /// When an activity appears on several rows the last row wins.
    pub fn from_records<I, T, R>(records: I) -> Self
    where
        I: IntoIterator<Item = (T, R)>,
        T: Into<String>,
        R: AsRef<str>,
    {
        let mut assignment = Self::new();
        for (task, role) in records {
            assignment.insert(task, role.as_ref());
        }
        assignment
    }

    /// Assigns `role` to `task`, returning the previously assigned role.
    pub fn insert(&mut self, task: impl Into<String>, role: &str) -> Option<String> {
        self.roles_by_task.insert(task.into(), normalize_role(role))
    }

    /// Returns the normalized role of `task`.
    pub fn role_of(&self, task: &str) -> Option<&str> {
        self.roles_by_task.get(task).map(String::as_str)
    }

    /// Returns the distinct roles in first-seen order.
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.roles_by_task
            .values()
            .map(String::as_str)
            .collect::<IndexSet<_>>()
            .into_iter()
    }

    /// Iterates `(task, role)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.roles_by_task
            .iter()
            .map(|(task, role)| (task.as_str(), role.as_str()))
    }

    pub fn len(&self) -> usize {
        self.roles_by_task.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles_by_task.is_empty()
    }
}

impl<T, R> FromIterator<(T, R)> for RoleAssignment
where
    T: Into<String>,
    R: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (T, R)>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}

/// Replaces spaces with underscores so the role can be embedded in element ids.
pub fn normalize_role(role: &str) -> String {
    role.replace(' ', "_")
}
