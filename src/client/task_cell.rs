//! View model behind a task row in the native list.

use crate::models::TaskDetail;

pub const DONE_SYMBOL: &str = "checkmark.circle.fill";
pub const OPEN_SYMBOL: &str = "circle";

/// Anything a task row can display and tick off.
pub trait CheckableTask {
    fn title(&self) -> &str;
    fn is_done(&self) -> bool;
    fn set_done(&mut self, done: bool);
}

impl CheckableTask for TaskDetail {
    fn title(&self) -> &str {
        &self.title
    }

    fn is_done(&self) -> bool {
        self.is_done
    }

    fn set_done(&mut self, done: bool) {
        self.is_done = done;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellContent {
    pub title: String,
    pub is_done: bool,
    pub checkbox_symbol: &'static str,
    pub strikethrough: bool,
}

impl CellContent {
    fn render<T: CheckableTask>(task: &T) -> Self {
        let is_done = task.is_done();
        Self {
            title: task.title().to_string(),
            is_done,
            checkbox_symbol: if is_done { DONE_SYMBOL } else { OPEN_SYMBOL },
            strikethrough: is_done,
        }
    }
}

type CompletionHandler<T> = Box<dyn FnMut(&T) + Send>;

pub struct TaskCell<T: CheckableTask> {
    task: Option<T>,
    content: Option<CellContent>,
    on_completion: Option<CompletionHandler<T>>,
}

impl<T: CheckableTask> Default for TaskCell<T> {
    fn default() -> Self {
        Self {
            task: None,
            content: None,
            on_completion: None,
        }
    }
}

impl<T: CheckableTask> TaskCell<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_completion(&mut self, handler: impl FnMut(&T) + Send + 'static) {
        self.on_completion = Some(Box::new(handler));
    }

    pub fn configure(&mut self, task: T) {
        self.content = Some(CellContent::render(&task));
        self.task = Some(task);
    }

    pub fn content(&self) -> Option<&CellContent> {
        self.content.as_ref()
    }

    pub fn task(&self) -> Option<&T> {
        self.task.as_ref()
    }

    /// Flip the bound task's completion flag and report it upward.
    pub fn toggle_completion(&mut self) {
        let Some(task) = self.task.as_mut() else {
            return;
        };

        let done = !task.is_done();
        task.set_done(done);
        self.content = Some(CellContent::render(&*task));

        if let Some(handler) = self.on_completion.as_mut() {
            handler(task);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Todo {
        title: String,
        done: bool,
    }

    impl CheckableTask for Todo {
        fn title(&self) -> &str {
            &self.title
        }

        fn is_done(&self) -> bool {
            self.done
        }

        fn set_done(&mut self, done: bool) {
            self.done = done;
        }
    }

    fn todo(title: &str, done: bool) -> Todo {
        Todo {
            title: title.to_string(),
            done,
        }
    }

    #[test]
    fn configure_renders_title_and_state() {
        let mut cell = TaskCell::new();
        cell.configure(todo("buy milk", false));

        let content = cell.content().unwrap();
        assert_eq!(content.title, "buy milk");
        assert!(!content.is_done);
        assert_eq!(content.checkbox_symbol, OPEN_SYMBOL);
        assert!(!content.strikethrough);
    }

    #[test]
    fn toggle_flips_state_and_reports_the_task() {
        let reported = Arc::new(Mutex::new(Vec::new()));
        let sink = reported.clone();

        let mut cell = TaskCell::new();
        cell.on_completion(move |task: &Todo| sink.lock().unwrap().push((task.title.clone(), task.done)));
        cell.configure(todo("water plants", false));

        cell.toggle_completion();
        assert!(cell.task().unwrap().done);
        assert_eq!(cell.content().unwrap().checkbox_symbol, DONE_SYMBOL);

        cell.toggle_completion();
        assert!(!cell.content().unwrap().strikethrough);

        assert_eq!(
            reported.lock().unwrap().as_slice(),
            [
                ("water plants".to_string(), true),
                ("water plants".to_string(), false)
            ]
        );
    }

    #[test]
    fn toggle_without_task_is_a_no_op() {
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();

        let mut cell: TaskCell<Todo> = TaskCell::new();
        cell.on_completion(move |_| *counter.lock().unwrap() += 1);
        cell.toggle_completion();

        assert!(cell.content().is_none());
        assert_eq!(*calls.lock().unwrap(), 0);
    }
}
