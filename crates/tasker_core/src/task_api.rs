use crate::date_key;
use crate::error::AppError;
use crate::model::{Task, TaskStatus};
use crate::storage::json_store::{self, TaskDocument};
use std::path::{Path, PathBuf};

/// Single owner of the task document. Mutations persist the full document
/// before returning; a failed persist rolls the in-memory change back so
/// memory and disk never silently diverge.
pub struct TaskStore {
    path: PathBuf,
    document: TaskDocument,
}

impl TaskStore {
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self, AppError> {
        let path = path.into();
        let document = json_store::load_document(&path)?;
        Ok(Self { path, document })
    }

    /// Open at the environment-resolved store path.
    pub fn open_default() -> Result<Self, AppError> {
        Self::open(json_store::store_path()?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &TaskDocument {
        &self.document
    }

    pub fn tasks_for(&self, day: &str) -> &[Task] {
        self.document
            .get(day.trim())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Re-read the backing file, replacing the in-memory view.
    pub fn reload(&mut self) -> Result<&TaskDocument, AppError> {
        self.document = json_store::load_document(&self.path)?;
        Ok(&self.document)
    }

    /// Append a new pending task to `day`'s bucket. The day key is validated
    /// and canonicalized since this is the one operation that creates buckets.
    pub fn add_task(&mut self, day: &str, text: &str) -> Result<Task, AppError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AppError::EmptyText);
        }

        let day = date_key::parse_day(day)?;
        if let Some(bucket) = self.document.get(&day)
            && bucket.iter().any(|task| task.text == trimmed)
        {
            return Err(AppError::duplicate_task(trimmed));
        }

        let created = Task::pending(trimmed);
        let bucket_existed = self.document.contains_key(&day);
        self.document
            .entry(day.clone())
            .or_default()
            .push(created.clone());

        if let Err(err) = json_store::save_document(&self.path, &self.document) {
            if bucket_existed {
                if let Some(bucket) = self.document.get_mut(&day) {
                    bucket.pop();
                }
            } else {
                self.document.remove(&day);
            }
            return Err(err);
        }

        Ok(created)
    }

    /// Set the status of the first task in `day` whose text matches exactly.
    pub fn update_status(
        &mut self,
        day: &str,
        text: &str,
        status: TaskStatus,
    ) -> Result<Task, AppError> {
        let day = day.trim().to_string();
        let text = text.trim();

        let Some(bucket) = self.document.get_mut(&day) else {
            return Err(AppError::task_not_found(text));
        };
        let Some(index) = bucket.iter().position(|task| task.text == text) else {
            return Err(AppError::task_not_found(text));
        };

        let previous = bucket[index].status;
        bucket[index].status = status;
        let updated = bucket[index].clone();

        if let Err(err) = json_store::save_document(&self.path, &self.document) {
            if let Some(task) = self
                .document
                .get_mut(&day)
                .and_then(|bucket| bucket.get_mut(index))
            {
                task.status = previous;
            }
            return Err(err);
        }

        Ok(updated)
    }

    /// Remove the first task in `day` whose text matches exactly. The emptied
    /// bucket stays in the document.
    pub fn delete_task(&mut self, day: &str, text: &str) -> Result<(), AppError> {
        let day = day.trim().to_string();
        let text = text.trim();

        let Some(bucket) = self.document.get_mut(&day) else {
            return Err(AppError::task_not_found(text));
        };
        let Some(index) = bucket.iter().position(|task| task.text == text) else {
            return Err(AppError::task_not_found(text));
        };

        let removed = bucket.remove(index);

        if let Err(err) = json_store::save_document(&self.path, &self.document) {
            if let Some(bucket) = self.document.get_mut(&day) {
                bucket.insert(index, removed);
            }
            return Err(err);
        }

        Ok(())
    }

    /// Case-insensitive substring filter over `day`'s tasks, in bucket order.
    /// Recomputed from current state on every call.
    pub fn search<'a>(&'a self, day: &str, query: &str) -> impl Iterator<Item = &'a Task> + 'a {
        let needle = query.trim().to_lowercase();
        self.tasks_for(day)
            .iter()
            .filter(move |task| task.text.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::TaskStore;
    use crate::model::{Task, TaskStatus};
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    const DAY: &str = "2024-01-01";

    fn temp_path(file_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("dailytasker-{nanos}-{file_name}"))
    }

    #[test]
    fn add_then_search_finds_single_pending_task() {
        let path = temp_path("add-search.json");
        let mut store = TaskStore::open(&path).unwrap();

        store.add_task(DAY, "Buy milk").unwrap();
        let found: Vec<&Task> = store.search(DAY, "Buy milk").collect();
        fs::remove_file(&path).ok();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "Buy milk");
        assert_eq!(found[0].status, TaskStatus::Pending);
    }

    #[test]
    fn add_task_trims_text() {
        let path = temp_path("add-trim.json");
        let mut store = TaskStore::open(&path).unwrap();

        let task = store.add_task(DAY, "  Buy milk  ").unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(task.text, "Buy milk");
    }

    #[test]
    fn add_task_rejects_blank_text() {
        let path = temp_path("add-blank.json");
        let mut store = TaskStore::open(&path).unwrap();

        assert_eq!(store.add_task(DAY, "").unwrap_err().code(), "empty_text");
        assert_eq!(store.add_task(DAY, "   ").unwrap_err().code(), "empty_text");
        assert!(store.document().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn add_task_rejects_invalid_day() {
        let path = temp_path("add-bad-day.json");
        let mut store = TaskStore::open(&path).unwrap();

        let err = store.add_task("2024-13-40", "Buy milk").unwrap_err();
        assert_eq!(err.code(), "invalid_date");
        assert!(!path.exists());
    }

    #[test]
    fn add_task_rejects_duplicate_text_for_same_day() {
        let path = temp_path("add-duplicate.json");
        let mut store = TaskStore::open(&path).unwrap();

        store.add_task(DAY, "Buy milk").unwrap();
        let err = store.add_task(DAY, "  Buy milk ").unwrap_err();
        let remaining = store.tasks_for(DAY).len();
        fs::remove_file(&path).ok();

        assert_eq!(err.code(), "duplicate_task");
        assert_eq!(remaining, 1);
    }

    #[test]
    fn add_task_allows_same_text_on_another_day() {
        let path = temp_path("add-other-day.json");
        let mut store = TaskStore::open(&path).unwrap();

        store.add_task(DAY, "Buy milk").unwrap();
        store.add_task("2024-01-02", "Buy milk").unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(store.tasks_for(DAY).len(), 1);
        assert_eq!(store.tasks_for("2024-01-02").len(), 1);
    }

    #[test]
    fn update_status_round_trips() {
        let path = temp_path("update-round-trip.json");
        let mut store = TaskStore::open(&path).unwrap();
        store.add_task(DAY, "Buy milk").unwrap();

        let completed = store
            .update_status(DAY, "Buy milk", TaskStatus::Completed)
            .unwrap();
        assert_eq!(completed.status, TaskStatus::Completed);

        let pending = store
            .update_status(DAY, "Buy milk", TaskStatus::Pending)
            .unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(pending.status, TaskStatus::Pending);
        assert_eq!(store.tasks_for(DAY)[0].status, TaskStatus::Pending);
    }

    #[test]
    fn update_status_rejects_missing_task() {
        let path = temp_path("update-missing.json");
        let mut store = TaskStore::open(&path).unwrap();
        store.add_task(DAY, "Buy milk").unwrap();

        let err = store
            .update_status(DAY, "Buy bread", TaskStatus::Completed)
            .unwrap_err();
        fs::remove_file(&path).ok();

        assert_eq!(err.code(), "task_not_found");
    }

    #[test]
    fn delete_task_removes_first_match_and_keeps_bucket() {
        let path = temp_path("delete-task.json");
        let mut store = TaskStore::open(&path).unwrap();
        store.add_task(DAY, "Buy milk").unwrap();

        store.delete_task(DAY, "Buy milk").unwrap();
        let reopened = TaskStore::open(&path).unwrap();
        fs::remove_file(&path).ok();

        assert!(store.tasks_for(DAY).is_empty());
        assert!(reopened.document().contains_key(DAY));
        assert!(reopened.tasks_for(DAY).is_empty());
    }

    #[test]
    fn delete_task_rejects_missing_text_and_leaves_bucket_unchanged() {
        let path = temp_path("delete-missing.json");
        let mut store = TaskStore::open(&path).unwrap();
        store.add_task(DAY, "Buy milk").unwrap();
        store.add_task(DAY, "Walk dog").unwrap();

        let err = store.delete_task(DAY, "Buy bread").unwrap_err();
        let texts: Vec<&str> = store
            .tasks_for(DAY)
            .iter()
            .map(|task| task.text.as_str())
            .collect();
        fs::remove_file(&path).ok();

        assert_eq!(err.code(), "task_not_found");
        assert_eq!(texts, vec!["Buy milk", "Walk dog"]);
    }

    #[test]
    fn search_is_case_insensitive_and_preserves_order() {
        let path = temp_path("search-order.json");
        let mut store = TaskStore::open(&path).unwrap();
        store.add_task(DAY, "Buy milk").unwrap();
        store.add_task(DAY, "Walk dog").unwrap();
        store.add_task(DAY, "buy bread").unwrap();

        let found: Vec<&str> = store
            .search(DAY, "BUY")
            .map(|task| task.text.as_str())
            .collect();
        fs::remove_file(&path).ok();

        assert_eq!(found, vec!["Buy milk", "buy bread"]);
    }

    #[test]
    fn search_with_empty_query_returns_all_tasks() {
        let path = temp_path("search-all.json");
        let mut store = TaskStore::open(&path).unwrap();
        store.add_task(DAY, "Buy milk").unwrap();
        store.add_task(DAY, "Walk dog").unwrap();

        let count = store.search(DAY, "").count();
        fs::remove_file(&path).ok();

        assert_eq!(count, 2);
    }

    #[test]
    fn reopening_from_the_same_path_yields_equal_document() {
        let path = temp_path("reopen.json");
        let mut store = TaskStore::open(&path).unwrap();
        store.add_task(DAY, "Buy milk").unwrap();
        store.add_task("2024-01-02", "Walk dog").unwrap();
        store
            .update_status(DAY, "Buy milk", TaskStatus::Completed)
            .unwrap();

        let reopened = TaskStore::open(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(reopened.document(), store.document());
    }

    #[test]
    fn add_complete_reload_scenario() {
        let path = temp_path("scenario.json");
        let mut store = TaskStore::open(&path).unwrap();

        assert!(store.tasks_for(DAY).is_empty());
        store.add_task(DAY, "Buy milk").unwrap();
        assert_eq!(store.add_task(DAY, "Buy milk").unwrap_err().code(), "duplicate_task");

        let found: Vec<Task> = store.search(DAY, "milk").cloned().collect();
        assert_eq!(found, vec![Task::pending("Buy milk")]);

        store
            .update_status(DAY, "Buy milk", TaskStatus::Completed)
            .unwrap();

        let mut reloaded = TaskStore::open(&path).unwrap();
        let view = reloaded.reload().unwrap();
        let status = view[DAY][0].status;
        fs::remove_file(&path).ok();

        assert_eq!(status, TaskStatus::Completed);
    }

    #[test]
    fn failed_persist_rolls_back_in_memory_state() {
        let path = temp_path("rollback");
        let mut store = TaskStore::open(&path).unwrap();
        store.add_task(DAY, "Buy milk").unwrap();

        // Turn the backing path into a directory so every save fails.
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        let err = store.add_task(DAY, "Walk dog").unwrap_err();
        assert_eq!(err.code(), "io_error");
        assert_eq!(store.tasks_for(DAY).len(), 1);

        let err = store
            .update_status(DAY, "Buy milk", TaskStatus::Completed)
            .unwrap_err();
        assert_eq!(err.code(), "io_error");
        assert_eq!(store.tasks_for(DAY)[0].status, TaskStatus::Pending);

        let err = store.delete_task(DAY, "Buy milk").unwrap_err();
        assert_eq!(err.code(), "io_error");
        assert_eq!(store.tasks_for(DAY).len(), 1);

        fs::remove_dir(&path).ok();
    }
}
