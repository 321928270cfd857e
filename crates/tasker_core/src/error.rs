use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    EmptyText,
    DuplicateTask(String),
    TaskNotFound(String),
    InvalidDate(String),
    InvalidData(String),
    Io(String),
}

impl AppError {
    pub fn duplicate_task<M: Into<String>>(text: M) -> Self {
        Self::DuplicateTask(text.into())
    }

    pub fn task_not_found<M: Into<String>>(text: M) -> Self {
        Self::TaskNotFound(text.into())
    }

    pub fn invalid_date<M: Into<String>>(message: M) -> Self {
        Self::InvalidDate(message.into())
    }

    pub fn invalid_data<M: Into<String>>(message: M) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyText => "empty_text",
            Self::DuplicateTask(_) => "duplicate_task",
            Self::TaskNotFound(_) => "task_not_found",
            Self::InvalidDate(_) => "invalid_date",
            Self::InvalidData(_) => "invalid_data",
            Self::Io(_) => "io_error",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::EmptyText => "task text is required".to_string(),
            Self::DuplicateTask(text) => format!("task '{text}' already exists for this day"),
            Self::TaskNotFound(text) => format!("task '{text}' not found for this day"),
            Self::InvalidDate(message) => message.clone(),
            Self::InvalidData(message) => message.clone(),
            Self::Io(message) => message.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}
