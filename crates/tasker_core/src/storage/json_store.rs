use crate::error::AppError;
use crate::model::Task;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "DailyTasker";
const STORE_FILE_NAME: &str = "tasks.json";
const STORE_ENV_VAR: &str = "DAILYTASKER_STORE_PATH";

/// The full persisted document: day key -> ordered task bucket.
pub type TaskDocument = BTreeMap<String, Vec<Task>>;

pub fn store_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(STORE_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    Ok(app_data_dir()?.join(APP_DIR_NAME).join(STORE_FILE_NAME))
}

fn app_data_dir() -> Result<PathBuf, AppError> {
    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata))
    } else if cfg!(target_os = "macos") {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join("Library")
            .join("Application Support"))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home).join(".config"))
    }
}

/// Read the backing file. A missing file, unparseable JSON, or a non-object
/// top level all yield an empty document; within an object, a day whose value
/// is not an array is skipped, as is any array element that does not parse to
/// a task with non-blank text.
pub fn load_document(path: &Path) -> Result<TaskDocument, AppError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(TaskDocument::new()),
        Err(err) => return Err(AppError::io(err.to_string())),
    };

    let Ok(value) = serde_json::from_str::<serde_json::Value>(&content) else {
        return Ok(TaskDocument::new());
    };
    let Some(entries) = value.as_object() else {
        return Ok(TaskDocument::new());
    };

    let mut document = TaskDocument::new();
    for (day, bucket) in entries {
        let Some(items) = bucket.as_array() else {
            continue;
        };

        let mut tasks = Vec::with_capacity(items.len());
        for item in items {
            let Ok(task) = serde_json::from_value::<Task>(item.clone()) else {
                continue;
            };
            if task.text.trim().is_empty() {
                continue;
            }
            tasks.push(task);
        }
        document.insert(day.clone(), tasks);
    }

    Ok(document)
}

pub fn save_document(path: &Path, document: &TaskDocument) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|err| AppError::io(err.to_string()))?;
    }

    let content = serde_json::to_string_pretty(document)
        .map_err(|err| AppError::invalid_data(err.to_string()))?;
    std::fs::write(path, content).map_err(|err| AppError::io(err.to_string()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions).map_err(|err| AppError::io(err.to_string()))?;
    }

    Ok(())
}
