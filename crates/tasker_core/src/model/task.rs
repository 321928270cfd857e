use serde::{Deserialize, Serialize};

/// A single task within a day bucket. Identity is the exact `text` value;
/// the on-disk format carries no separate id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub text: String,
    pub status: TaskStatus,
}

impl Task {
    pub fn pending<T: Into<String>>(text: T) -> Self {
        Self {
            text: text.into(),
            status: TaskStatus::Pending,
        }
    }
}

// Variant names serialize as-is ("Pending"/"Completed") to match the
// persisted file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }

    /// Case-insensitive parse of a user-supplied status label.
    pub fn parse_label(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "completed" | "done" => Some(Self::Completed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskStatus};

    #[test]
    fn status_serializes_capitalized() {
        let task = Task::pending("demo");
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(json, "{\"text\":\"demo\",\"status\":\"Pending\"}");
    }

    #[test]
    fn task_ignores_unknown_keys_on_read() {
        let task: Task =
            serde_json::from_str("{\"text\":\"demo\",\"status\":\"Completed\",\"color\":\"red\"}")
                .unwrap();
        assert_eq!(task.text, "demo");
        assert_eq!(task.status, TaskStatus::Completed);
    }

    #[test]
    fn parse_label_accepts_case_variants() {
        assert_eq!(TaskStatus::parse_label("PENDING"), Some(TaskStatus::Pending));
        assert_eq!(
            TaskStatus::parse_label(" completed "),
            Some(TaskStatus::Completed)
        );
        assert_eq!(TaskStatus::parse_label("done"), Some(TaskStatus::Completed));
        assert_eq!(TaskStatus::parse_label("archived"), None);
    }
}
