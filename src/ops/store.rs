use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::io::storage::Storage;
use crate::model::filter::{SortCriteria, SortMode, SortOrder, StatusFilter};
use crate::model::todo::{Priority, Todo, TodoDraft, TodoId, TodoPatch};
use crate::ops::samples::sample_todos;
use crate::ops::stats::{Insights, TodoStats, compute_insights, compute_stats};
use crate::ops::transfer::{self, TransferError};
use crate::util::clock::Clock;

/// Suffix appended to the title of a duplicated todo
pub const COPY_SUFFIX: &str = " (copy)";

/// The filtered view split by priority
#[derive(Debug, Default)]
pub struct PriorityBuckets<'a> {
    pub high: Vec<&'a Todo>,
    pub medium: Vec<&'a Todo>,
    pub low: Vec<&'a Todo>,
}

/// Views recomputed from the collection after every change
#[derive(Debug, Default)]
struct Derived {
    /// Indices into `todos` that pass search + status filter, in collection order
    filtered: Vec<usize>,
    stats: TodoStats,
    categories: Vec<String>,
}

/// Sole owner of the todo collection.
///
/// Every mutating operation recomputes the derived views and hands the
/// collection to the storage backend. Storage failures are logged, never
/// returned.
pub struct TodoStore {
    todos: Vec<Todo>,
    filter: StatusFilter,
    search_term: String,
    next_id: TodoId,
    storage: Box<dyn Storage>,
    clock: Box<dyn Clock>,
    derived: Derived,
}

impl TodoStore {
    /// An empty store that does not load anything from `storage`
    pub fn new(storage: Box<dyn Storage>, clock: Box<dyn Clock>) -> Self {
        let mut store = TodoStore {
            todos: Vec::new(),
            filter: StatusFilter::All,
            search_term: String::new(),
            next_id: 1,
            storage,
            clock,
            derived: Derived::default(),
        };
        store.refresh();
        store
    }

    /// Load the collection from `storage`. A failed load degrades to an
    /// empty collection. Sample todos are seeded only when nothing has been
    /// stored yet and `seed_samples` is set; a stored empty list stays empty.
    pub fn open(storage: Box<dyn Storage>, clock: Box<dyn Clock>, seed_samples: bool) -> Self {
        let loaded = match storage.load() {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(error = %e, "could not load todos, starting empty");
                Some(Vec::new())
            }
        };
        let mut store = Self::new(storage, clock);
        match loaded {
            Some(items) => store.set_items(items),
            None if seed_samples => {
                let now = store.clock.now();
                store.set_items(sample_todos(now));
                tracing::debug!("seeded sample todos");
            }
            None => {}
        }
        store
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Whole collection in its current order
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Todos passing the search term and status filter
    pub fn filtered(&self) -> Vec<&Todo> {
        self.derived
            .filtered
            .iter()
            .map(|&i| &self.todos[i])
            .collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.derived.filtered.len()
    }

    /// The `n`th todo of the filtered view
    pub fn filtered_at(&self, n: usize) -> Option<&Todo> {
        self.derived.filtered.get(n).map(|&i| &self.todos[i])
    }

    pub fn stats(&self) -> TodoStats {
        self.derived.stats
    }

    /// Unique non-blank categories, sorted
    pub fn categories(&self) -> &[String] {
        &self.derived.categories
    }

    pub fn by_priority(&self) -> PriorityBuckets<'_> {
        let mut buckets = PriorityBuckets::default();
        for todo in self.filtered() {
            match todo.priority {
                Priority::High => buckets.high.push(todo),
                Priority::Medium => buckets.medium.push(todo),
                Priority::Low => buckets.low.push(todo),
            }
        }
        buckets
    }

    /// Number of todos matching each status filter under the current search
    pub fn filter_count(&self, filter: StatusFilter) -> usize {
        let needle = self.search_term.to_lowercase();
        let now = self.clock.now();
        self.todos
            .iter()
            .filter(|t| t.matches_search(&needle) && passes(filter, t, now))
            .count()
    }

    pub fn insights(&self) -> Insights {
        compute_insights(&self.todos, self.clock.now())
    }

    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    pub fn add(&mut self, draft: TodoDraft) -> Todo {
        let todo = Todo {
            id: self.take_id(),
            title: draft.title,
            description: draft.description,
            completed: false,
            created_at: self.clock.now(),
            updated_at: None,
            priority: draft.priority,
            category: draft.category,
            due_date: draft.due_date,
        };
        tracing::debug!(id = todo.id, title = %todo.title, "todo added");
        self.todos.push(todo.clone());
        self.commit();
        todo
    }

    /// Merge `patch` into the todo and stamp `updated_at`. False if absent.
    pub fn update(&mut self, id: TodoId, patch: TodoPatch) -> bool {
        let now = self.clock.now();
        let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) else {
            tracing::debug!(id, "update: no such todo");
            return false;
        };
        todo.apply(&patch);
        todo.updated_at = Some(now);
        tracing::debug!(id, "todo updated");
        self.commit();
        true
    }

    pub fn delete(&mut self, id: TodoId) -> bool {
        let Some(pos) = self.todos.iter().position(|t| t.id == id) else {
            tracing::debug!(id, "delete: no such todo");
            return false;
        };
        self.todos.remove(pos);
        tracing::debug!(id, "todo deleted");
        self.commit();
        true
    }

    pub fn toggle(&mut self, id: TodoId) -> bool {
        match self.get(id) {
            Some(todo) => {
                let completed = !todo.completed;
                self.update(id, TodoPatch::completed(completed))
            }
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Bulk operations
    // -----------------------------------------------------------------------

    pub fn mark_all_completed(&mut self) {
        let now = self.clock.now();
        for todo in &mut self.todos {
            todo.completed = true;
            todo.updated_at = Some(now);
        }
        tracing::debug!(count = self.todos.len(), "marked all completed");
        self.commit();
    }

    /// Remove every completed todo. Returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.todos.len();
        self.todos.retain(|t| !t.completed);
        let removed = before - self.todos.len();
        tracing::debug!(removed, "cleared completed");
        self.commit();
        removed
    }

    /// Copy a todo under a new id with a suffixed title
    pub fn duplicate(&mut self, id: TodoId) -> Option<Todo> {
        let source = self.get(id)?;
        let draft = TodoDraft {
            title: format!("{}{}", source.title, COPY_SUFFIX),
            description: source.description.clone(),
            priority: source.priority,
            category: source.category.clone(),
            due_date: source.due_date,
        };
        Some(self.add(draft))
    }

    // -----------------------------------------------------------------------
    // Filter, search, sort
    // -----------------------------------------------------------------------

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
        self.refresh();
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.refresh();
    }

    pub fn clear_search(&mut self) {
        self.set_search_term(String::new());
    }

    /// Reorder the collection in place. The sort is stable.
    pub fn sort(&mut self, mode: SortMode) {
        self.todos.sort_by(|a, b| order(a, b, mode));
        tracing::debug!(sort = %mode, "todos sorted");
        self.commit();
    }

    // -----------------------------------------------------------------------
    // Export / import
    // -----------------------------------------------------------------------

    pub fn export_json(&self) -> Result<String, TransferError> {
        transfer::export_todos(&self.todos)
    }

    /// Replace the collection with a validated batch. On any error the
    /// collection is left untouched.
    pub fn import_json(&mut self, json: &str) -> Result<usize, TransferError> {
        let todos = match transfer::parse_import(json) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(error = %e, "import rejected");
                return Err(e);
            }
        };
        let count = todos.len();
        self.set_items(todos);
        self.save();
        tracing::debug!(count, "todos imported");
        Ok(count)
    }

    /// Replace the collection without saving (used when loading)
    pub fn set_items(&mut self, todos: Vec<Todo>) {
        let max_id = todos.iter().map(|t| t.id).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_id.saturating_add(1));
        self.todos = todos;
        self.refresh();
    }

    /// Recompute derived views. Mutations call this; callers only need it
    /// when time has moved and overdue status may have changed.
    pub fn refresh(&mut self) {
        let now = self.clock.now();
        let needle = self.search_term.to_lowercase();
        let filter = self.filter;

        self.derived.filtered = self
            .todos
            .iter()
            .enumerate()
            .filter(|(_, t)| t.matches_search(&needle) && passes(filter, t, now))
            .map(|(i, _)| i)
            .collect();

        self.derived.stats = compute_stats(&self.todos, now);

        let categories: BTreeSet<&str> = self
            .todos
            .iter()
            .filter_map(|t| t.category.as_deref())
            .filter(|c| !c.trim().is_empty())
            .collect();
        self.derived.categories = categories.into_iter().map(str::to_string).collect();
    }

    fn take_id(&mut self) -> TodoId {
        let max_id = self.todos.iter().map(|t| t.id).max().unwrap_or(0);
        let id = self.next_id.max(max_id.saturating_add(1));
        self.next_id = id.saturating_add(1);
        id
    }

    fn commit(&mut self) {
        self.refresh();
        self.save();
    }

    fn save(&self) {
        if let Err(e) = self.storage.save(&self.todos) {
            tracing::warn!(error = %e, "could not save todos");
        }
    }
}

fn passes(filter: StatusFilter, todo: &Todo, now: DateTime<Utc>) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Active => !todo.completed,
        StatusFilter::Completed => todo.completed,
        StatusFilter::Overdue => todo.is_overdue(now),
    }
}

/// Comparison for a sort mode; `Desc` is the exact reverse of `Asc`
pub fn order(a: &Todo, b: &Todo, mode: SortMode) -> Ordering {
    let ord = compare(a, b, mode.criteria);
    match mode.order {
        SortOrder::Asc => ord,
        SortOrder::Desc => ord.reverse(),
    }
}

/// Ascending comparison for one sort criteria
fn compare(a: &Todo, b: &Todo, criteria: SortCriteria) -> Ordering {
    match criteria {
        SortCriteria::Title => a
            .title
            .to_lowercase()
            .cmp(&b.title.to_lowercase())
            .then_with(|| a.title.cmp(&b.title)),
        SortCriteria::Priority => a.priority.weight().cmp(&b.priority.weight()),
        SortCriteria::CreatedAt => a.created_at.cmp(&b.created_at),
        // Missing due dates compare as +infinity
        SortCriteria::DueDate => match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::{LogStorage, StorageError};
    use crate::util::clock::ManualClock;
    use chrono::{Duration, TimeZone};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap()
    }

    fn store_with_clock() -> (TodoStore, ManualClock) {
        let clock = ManualClock::new(start());
        let store = TodoStore::new(Box::new(LogStorage), Box::new(clock.clone()));
        (store, clock)
    }

    /// Storage that records every save and can be told to fail
    #[derive(Clone, Default)]
    struct RecordingStorage {
        saves: Rc<RefCell<Vec<usize>>>,
        fail: bool,
        initial: Option<Vec<Todo>>,
    }

    impl Storage for RecordingStorage {
        fn save(&self, items: &[Todo]) -> Result<(), StorageError> {
            self.saves.borrow_mut().push(items.len());
            if self.fail {
                return Err(StorageError::Write {
                    path: "todos.json".into(),
                    source: std::io::Error::other("disk full"),
                });
            }
            Ok(())
        }

        fn load(&self) -> Result<Option<Vec<Todo>>, StorageError> {
            if self.fail {
                return Err(StorageError::Read {
                    path: "todos.json".into(),
                    source: std::io::Error::other("unreadable"),
                });
            }
            Ok(self.initial.clone())
        }
    }

    fn ids(todos: &[&Todo]) -> Vec<TodoId> {
        todos.iter().map(|t| t.id).collect()
    }

    #[test]
    fn add_update_delete_scenario() {
        let (mut store, _clock) = store_with_clock();
        let todo = store.add(TodoDraft::new("A").priority(Priority::Low));
        assert_eq!(store.stats().total, 1);
        assert_eq!(store.stats().active, 1);
        assert!(!todo.completed);
        assert_eq!(todo.updated_at, None);

        assert!(store.update(todo.id, TodoPatch::completed(true)));
        assert_eq!(store.stats().completed, 1);
        assert_eq!(store.stats().active, 0);

        assert!(store.delete(todo.id));
        assert_eq!(store.stats().total, 0);
    }

    #[test]
    fn unknown_ids_report_failure() {
        let (mut store, _clock) = store_with_clock();
        store.add(TodoDraft::new("Existing"));
        assert!(!store.update(99, TodoPatch::completed(true)));
        assert!(!store.delete(99));
        assert!(!store.toggle(99));
        assert_eq!(store.todos().len(), 1);
    }

    #[test]
    fn ids_are_unique_and_never_reused() {
        let (mut store, _clock) = store_with_clock();
        let a = store.add(TodoDraft::new("a"));
        let b = store.add(TodoDraft::new("b"));
        store.delete(b.id);
        let c = store.add(TodoDraft::new("c"));
        assert_ne!(c.id, b.id);
        assert_ne!(c.id, a.id);
        store.update(a.id, TodoPatch {
            title: Some("renamed".into()),
            ..Default::default()
        });
        assert_eq!(store.get(a.id).unwrap().title, "renamed");
    }

    #[test]
    fn toggle_twice_restores_flag_and_advances_updated_at() {
        let (mut store, clock) = store_with_clock();
        let todo = store.add(TodoDraft::new("flip"));

        clock.advance(Duration::seconds(1));
        assert!(store.toggle(todo.id));
        let first = store.get(todo.id).unwrap().updated_at.unwrap();
        assert!(store.get(todo.id).unwrap().completed);

        clock.advance(Duration::seconds(1));
        assert!(store.toggle(todo.id));
        let second = store.get(todo.id).unwrap().updated_at.unwrap();
        assert!(!store.get(todo.id).unwrap().completed);
        assert!(second > first);
    }

    #[test]
    fn sort_priority_desc_orders_high_medium_low() {
        let (mut store, _clock) = store_with_clock();
        store.add(TodoDraft::new("m").priority(Priority::Medium));
        store.add(TodoDraft::new("l").priority(Priority::Low));
        store.add(TodoDraft::new("h").priority(Priority::High));
        store.add(TodoDraft::new("l2").priority(Priority::Low));
        store.sort("priority-desc".parse().unwrap());
        let order: Vec<Priority> = store.todos().iter().map(|t| t.priority).collect();
        assert_eq!(
            order,
            vec![Priority::High, Priority::Medium, Priority::Low, Priority::Low]
        );
    }

    #[test]
    fn sort_due_date_asc_puts_undated_last() {
        let (mut store, _clock) = store_with_clock();
        store.add(TodoDraft::new("none"));
        store.add(TodoDraft::new("late").due(start() + Duration::days(5)));
        store.add(TodoDraft::new("none2"));
        store.add(TodoDraft::new("soon").due(start() + Duration::days(1)));
        store.sort("dueDate-asc".parse().unwrap());
        let titles: Vec<&str> = store.todos().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["soon", "late", "none", "none2"]);
    }

    #[test]
    fn sort_title_is_case_insensitive() {
        let (mut store, _clock) = store_with_clock();
        store.add(TodoDraft::new("banana"));
        store.add(TodoDraft::new("Apple"));
        store.add(TodoDraft::new("cherry"));
        store.sort("title-asc".parse().unwrap());
        let titles: Vec<&str> = store.todos().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Apple", "banana", "cherry"]);
        store.sort("title-desc".parse().unwrap());
        assert_eq!(store.todos()[0].title, "cherry");
    }

    #[test]
    fn sort_created_at() {
        let (mut store, clock) = store_with_clock();
        store.add(TodoDraft::new("first"));
        clock.advance(Duration::minutes(1));
        store.add(TodoDraft::new("second"));
        store.sort("createdAt-desc".parse().unwrap());
        assert_eq!(store.todos()[0].title, "second");
    }

    #[test]
    fn empty_search_equals_status_filter_alone() {
        let (mut store, _clock) = store_with_clock();
        let a = store.add(TodoDraft::new("alpha"));
        store.add(TodoDraft::new("beta"));
        store.toggle(a.id);
        store.set_filter(StatusFilter::Active);
        let without: Vec<TodoId> = ids(&store.filtered());
        store.set_search_term("");
        assert_eq!(ids(&store.filtered()), without);
        assert_eq!(without.len(), 1);
    }

    #[test]
    fn search_matches_title_description_category_case_insensitively() {
        let (mut store, _clock) = store_with_clock();
        let a = store.add(TodoDraft::new("Groceries").category("Home"));
        let b = store.add(TodoDraft::new("Report").description("for the HOME office"));
        let c = store.add(TodoDraft::new("Gym"));
        store.set_search_term("home");
        assert_eq!(ids(&store.filtered()), vec![a.id, b.id]);
        store.set_search_term("GYM");
        assert_eq!(ids(&store.filtered()), vec![c.id]);
        store.clear_search();
        assert_eq!(store.filtered_len(), 3);
    }

    #[test]
    fn search_then_status_filter() {
        let (mut store, clock) = store_with_clock();
        let late = store.add(TodoDraft::new("pay rent").due(start() + Duration::hours(1)));
        store.add(TodoDraft::new("pay bills").due(start() + Duration::days(3)));
        store.add(TodoDraft::new("walk dog").due(start() - Duration::days(3)));
        clock.advance(Duration::hours(2));
        store.refresh();
        store.set_search_term("pay");
        store.set_filter(StatusFilter::Overdue);
        assert_eq!(ids(&store.filtered()), vec![late.id]);
        assert_eq!(store.filter_count(StatusFilter::All), 2);
        assert_eq!(store.stats().overdue, 2);
    }

    #[test]
    fn clear_completed_leaves_no_completed() {
        let (mut store, _clock) = store_with_clock();
        let a = store.add(TodoDraft::new("a"));
        store.add(TodoDraft::new("b"));
        let c = store.add(TodoDraft::new("c"));
        store.toggle(a.id);
        store.toggle(c.id);
        assert_eq!(store.clear_completed(), 2);
        assert_eq!(store.stats().completed, 0);
        assert_eq!(store.stats().total, 1);
    }

    #[test]
    fn mark_all_completed_stamps_every_item() {
        let (mut store, clock) = store_with_clock();
        store.add(TodoDraft::new("a"));
        store.add(TodoDraft::new("b"));
        clock.advance(Duration::minutes(3));
        store.mark_all_completed();
        assert_eq!(store.stats().completed, 2);
        assert!(
            store
                .todos()
                .iter()
                .all(|t| t.updated_at == Some(start() + Duration::minutes(3)))
        );
    }

    #[test]
    fn duplicate_missing_id_changes_nothing() {
        let (mut store, _clock) = store_with_clock();
        store.add(TodoDraft::new("only"));
        assert!(store.duplicate(42).is_none());
        assert_eq!(store.todos().len(), 1);
    }

    #[test]
    fn duplicate_copies_fields_under_new_id() {
        let (mut store, _clock) = store_with_clock();
        let due = start() + Duration::days(2);
        let src = store.add(
            TodoDraft::new("Plan trip")
                .description("flights")
                .priority(Priority::High)
                .category("Travel")
                .due(due),
        );
        let copy = store.duplicate(src.id).unwrap();
        assert_ne!(copy.id, src.id);
        assert_eq!(copy.title, "Plan trip (copy)");
        assert_eq!(copy.priority, Priority::High);
        assert_eq!(copy.category.as_deref(), Some("Travel"));
        assert_eq!(copy.due_date, Some(due));
        assert_eq!(copy.description, "flights");
        assert!(!copy.completed);
        assert_eq!(store.todos().len(), 2);
    }

    #[test]
    fn categories_are_unique_sorted_and_non_blank() {
        let (mut store, _clock) = store_with_clock();
        store.add(TodoDraft::new("a").category("Work"));
        store.add(TodoDraft::new("b").category("Home"));
        store.add(TodoDraft::new("c").category("Work"));
        store.add(TodoDraft::new("d").category("  "));
        store.add(TodoDraft::new("e"));
        assert_eq!(store.categories(), &["Home".to_string(), "Work".to_string()]);
    }

    #[test]
    fn priority_buckets_follow_filtered_view() {
        let (mut store, _clock) = store_with_clock();
        let done = store.add(TodoDraft::new("a").priority(Priority::High));
        store.add(TodoDraft::new("b").priority(Priority::High));
        store.add(TodoDraft::new("c").priority(Priority::Low));
        store.toggle(done.id);
        store.set_filter(StatusFilter::Active);
        let buckets = store.by_priority();
        assert_eq!(buckets.high.len(), 1);
        assert_eq!(buckets.medium.len(), 0);
        assert_eq!(buckets.low.len(), 1);
    }

    #[test]
    fn import_replaces_contents_and_bad_batch_leaves_them() {
        let (mut store, _clock) = store_with_clock();
        store.add(TodoDraft::new("keep me"));

        let bad = r#"[{"id": 1, "title": "x", "createdAt": "2025-05-01T08:00:00Z"}, {"title": "no id"}]"#;
        assert!(store.import_json(bad).is_err());
        assert_eq!(store.todos().len(), 1);
        assert_eq!(store.todos()[0].title, "keep me");

        let good = r#"[{"id": 10, "title": "imported", "createdAt": "2025-05-01T08:00:00Z"}]"#;
        assert_eq!(store.import_json(good).unwrap(), 1);
        assert_eq!(store.todos()[0].title, "imported");
        let next = store.add(TodoDraft::new("after"));
        assert_eq!(next.id, 11);
    }

    #[test]
    fn export_round_trips_through_import() {
        let (mut store, _clock) = store_with_clock();
        store.add(TodoDraft::new("a").category("Home"));
        store.add(TodoDraft::new("b").priority(Priority::High));
        let json = store.export_json().unwrap();
        let before = store.todos().to_vec();

        let (mut other, _c) = store_with_clock();
        other.import_json(&json).unwrap();
        assert_eq!(other.todos(), before.as_slice());
    }

    #[test]
    fn mutations_save_and_failures_do_not_escape() {
        let storage = RecordingStorage {
            fail: true,
            ..Default::default()
        };
        let saves = storage.saves.clone();
        let mut store = TodoStore::new(Box::new(storage), Box::new(ManualClock::new(start())));
        let todo = store.add(TodoDraft::new("a"));
        store.toggle(todo.id);
        store.set_filter(StatusFilter::Completed);
        assert_eq!(*saves.borrow(), vec![1, 1]);
        assert_eq!(store.filtered_len(), 1);
    }

    #[test]
    fn open_seeds_samples_only_when_nothing_stored() {
        let clock = ManualClock::new(start());
        let store = TodoStore::open(
            Box::new(RecordingStorage::default()),
            Box::new(clock.clone()),
            true,
        );
        assert_eq!(store.todos().len(), 3);
        assert_eq!(store.stats().completed, 1);

        let unseeded = TodoStore::open(
            Box::new(RecordingStorage::default()),
            Box::new(clock.clone()),
            false,
        );
        assert!(unseeded.todos().is_empty());

        let stored = RecordingStorage {
            initial: Some(vec![Todo {
                id: 8,
                title: "stored".into(),
                description: String::new(),
                completed: false,
                created_at: start(),
                updated_at: None,
                priority: Priority::Medium,
                category: None,
                due_date: None,
            }]),
            ..Default::default()
        };
        let mut loaded = TodoStore::open(Box::new(stored), Box::new(clock), true);
        assert_eq!(loaded.todos().len(), 1);
        assert_eq!(loaded.add(TodoDraft::new("next")).id, 9);
    }

    #[test]
    fn stored_empty_list_is_not_reseeded() {
        let storage = RecordingStorage {
            initial: Some(Vec::new()),
            ..Default::default()
        };
        let store = TodoStore::open(Box::new(storage), Box::new(ManualClock::new(start())), true);
        assert!(store.todos().is_empty());
        assert_eq!(store.stats().completed, 0);
    }

    #[test]
    fn import_of_largest_id_is_rejected() {
        let (mut store, _clock) = store_with_clock();
        store.add(TodoDraft::new("keep"));
        let json = r#"[{"id": 18446744073709551615, "title": "big", "createdAt": "2025-05-01T08:00:00Z"}]"#;
        assert!(matches!(
            store.import_json(json),
            Err(TransferError::IdTooLarge(_))
        ));
        assert_eq!(store.todos().len(), 1);
    }

    #[test]
    fn ids_near_the_top_do_not_overflow() {
        let (mut store, _clock) = store_with_clock();
        let mut top = store.add(TodoDraft::new("top"));
        top.id = TodoId::MAX - 1;
        store.set_items(vec![top]);
        assert_eq!(store.add(TodoDraft::new("last")).id, TodoId::MAX);
    }

    #[test]
    fn open_with_failing_storage_starts_empty() {
        let storage = RecordingStorage {
            fail: true,
            ..Default::default()
        };
        let store = TodoStore::open(Box::new(storage), Box::new(ManualClock::new(start())), true);
        assert!(store.todos().is_empty());
    }
}
